use std::vec::Vec;

use crate::backend::client::BackendClient;
use crate::backend::dto::QaPair;

/// Ordered Q&A list behind the "chatbot questions" modal. The list never
/// drops below one row while the dialog is open.
#[derive(Clone, Debug)]
pub struct QaEditor {
    student_id: i64,
    rows: Vec<QaPair>,
}

impl QaEditor {
    pub fn blank(student_id: i64) -> Self {
        QaEditor {
            student_id,
            rows: vec![QaPair::default()],
        }
    }

    /// Pulls the stored set from the backend; a failure or an empty answer
    /// both land on a single blank row ready for entry.
    pub async fn load(client: &BackendClient, student_id: i64) -> Self {
        match client.get_chatbot_questions(student_id).await {
            Ok(questions) if !questions.is_empty() => QaEditor {
                student_id,
                rows: questions,
            },
            Ok(_) => Self::blank(student_id),
            Err(e) => {
                log::error!("Loading chatbot questions failed: {:?}", e);
                Self::blank(student_id)
            }
        }
    }

    pub fn student_id(&self) -> i64 {
        self.student_id
    }

    pub fn rows(&self) -> &[QaPair] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut QaPair> {
        self.rows.get_mut(index)
    }

    pub fn add_row(&mut self) {
        self.rows.push(QaPair::default());
    }

    /// Refuses to remove the last remaining row.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Only pairs with both sides non-empty after trimming make it into the
    /// submitted sequence, in display order.
    pub fn collect_validated(&self) -> Vec<QaPair> {
        self.rows
            .iter()
            .filter_map(|r| {
                let question = r.question.trim();
                let answer = r.answer.trim();
                if question.is_empty() || answer.is_empty() {
                    None
                } else {
                    Some(QaPair {
                        question: String::from(question),
                        answer: String::from(answer),
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(pairs: &[(&str, &str)]) -> QaEditor {
        let mut ed = QaEditor::blank(1);
        ed.rows = pairs
            .iter()
            .map(|(q, a)| QaPair {
                question: String::from(*q),
                answer: String::from(*a),
            })
            .collect();
        ed
    }

    #[test]
    fn half_filled_pairs_are_filtered_out() {
        let ed = editor_with(&[("Q1", "A1"), ("", "A2"), ("Q3", "")]);
        let validated = ed.collect_validated();
        assert_eq!(validated.len(), 1);
        assert_eq!(validated[0].question, "Q1");
        assert_eq!(validated[0].answer, "A1");
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let ed = editor_with(&[("  ", "answer"), (" Q ", " A ")]);
        let validated = ed.collect_validated();
        assert_eq!(validated.len(), 1);
        assert_eq!(validated[0].question, "Q");
        assert_eq!(validated[0].answer, "A");
    }

    #[test]
    fn last_row_cannot_be_removed() {
        let mut ed = QaEditor::blank(1);
        assert_eq!(ed.rows().len(), 1);
        assert!(!ed.remove_row(0));
        assert_eq!(ed.rows().len(), 1);

        ed.add_row();
        assert!(ed.remove_row(1));
        assert!(!ed.remove_row(0));
        assert_eq!(ed.rows().len(), 1);
    }

    #[test]
    fn out_of_range_removal_is_refused() {
        let mut ed = QaEditor::blank(1);
        ed.add_row();
        assert!(!ed.remove_row(5));
        assert_eq!(ed.rows().len(), 2);
    }
}
