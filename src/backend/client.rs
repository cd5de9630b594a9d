use core::time::Duration;
use std::vec::Vec;

use serde_json::{Map, Value};

use super::dto::{
    ArrearsUpdate, ChatReply, MarksUpdate, MutationOutcome, NewStudent, PhotoUpload, QaPair,
    QuestionsPayload, StudentUpdate, SubjectNotesUpdate,
};
use crate::man::settings::Settings;
use crate::result::{Error, Result};

/// Typed client for the portal backend. One `reqwest::Client` is built up
/// front with the configured timeouts and shared by every operation; the
/// struct is cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_millis))
            .timeout(Duration::from_millis(settings.read_timeout_millis))
            .no_proxy()
            .build()?;
        Ok(BackendClient {
            client,
            base_url: String::from(settings.base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, path: &str) -> String {
        let mut url = String::with_capacity(self.base_url.len() + path.len());
        url.push_str(&self.base_url);
        url.push_str(path);
        url
    }

    /// POST `/chatbot/message` with `{"message": text}`, expecting a 2xx
    /// response carrying `{"response": ...}`.
    pub async fn send_chat_message(&self, text: &str) -> Result<String> {
        let mut map = Map::new();
        map.insert(String::from("message"), Value::from(text));
        let body = serde_json::to_string(&Value::Object(map))?;
        let res = self
            .client
            .post(self.url("/chatbot/message"))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        let status = res.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(Error::Server {
                status,
                message: None,
            });
        }
        let reply: ChatReply = serde_json::from_slice(res.bytes().await?.as_ref())?;
        Ok(reply.response)
    }

    pub async fn add_student(
        &self,
        form: &NewStudent,
        photo: Option<PhotoUpload>,
    ) -> Result<String> {
        let mut mp = reqwest::multipart::Form::new()
            .text("email_phone", form.email_phone.clone())
            .text("password", form.password.clone())
            .text("name", form.name.clone())
            .text("roll_number", form.roll_number.clone())
            .text("department", form.department.clone());
        if let Some(p) = photo {
            mp = mp.part(
                "photo",
                reqwest::multipart::Part::bytes(p.bytes).file_name(p.file_name),
            );
        }
        let res = self
            .client
            .post(self.url("/teacher/add-student"))
            .multipart(mp)
            .send()
            .await?;
        self.mutation_outcome(res).await
    }

    pub async fn edit_student(&self, student_id: i64, update: &StudentUpdate) -> Result<String> {
        let age = update.age.map_or(String::new(), |a| a.to_string());
        let fields: Vec<(&str, String)> = vec![
            ("name", update.name.clone()),
            ("roll_number", update.roll_number.clone()),
            ("department", update.department.clone()),
            ("age", age),
            ("blood_group", update.blood_group.clone()),
            ("subjects", update.subjects.join(", ")),
            ("parent_name", update.parent.name.clone()),
            ("parent_relationship", update.parent.relationship.clone()),
            ("parent_phone", update.parent.phone.clone()),
            ("parent_email", update.parent.email.clone()),
        ];
        let path = format!("/teacher/edit-student/{}", student_id);
        self.post_form(&path, &fields).await
    }

    /// Destructive. The confirmation gate lives in the controller, not here.
    pub async fn delete_student(&self, student_id: i64) -> Result<String> {
        let path = format!("/teacher/delete-student/{}", student_id);
        let res = self.client.post(self.url(&path)).send().await?;
        self.mutation_outcome(res).await
    }

    pub async fn reset_password(&self, student_id: i64, password: &str) -> Result<String> {
        let path = format!("/teacher/reset-password/{}", student_id);
        self.post_form(&path, &[("password", String::from(password))])
            .await
    }

    pub async fn update_marks(&self, student_id: i64, update: &MarksUpdate) -> Result<String> {
        let path = format!("/teacher/update-marks/{}", student_id);
        self.post_form(
            &path,
            &[
                ("semester", update.semester.clone()),
                ("subject", update.subject.clone()),
                ("marks", update.marks.clone()),
            ],
        )
        .await
    }

    pub async fn update_arrears(&self, student_id: i64, update: &ArrearsUpdate) -> Result<String> {
        let path = format!("/teacher/update-arrears/{}", student_id);
        self.post_form(
            &path,
            &[
                ("subject", update.subject.clone()),
                ("status", update.status.clone()),
            ],
        )
        .await
    }

    pub async fn update_notes_link(&self, student_id: i64, notes_link: &str) -> Result<String> {
        let path = format!("/teacher/update-notes-link/{}", student_id);
        self.post_form(&path, &[("notes_link", String::from(notes_link))])
            .await
    }

    pub async fn update_subject_notes(
        &self,
        student_id: i64,
        update: &SubjectNotesUpdate,
    ) -> Result<String> {
        let path = format!("/teacher/update-subject-notes/{}", student_id);
        self.post_form(
            &path,
            &[
                ("subject", update.subject.clone()),
                ("notes_link", update.notes_link.clone()),
            ],
        )
        .await
    }

    /// A `success: false` or empty payload is treated as "no questions yet",
    /// not as a failure.
    pub async fn get_chatbot_questions(&self, student_id: i64) -> Result<Vec<QaPair>> {
        let path = format!("/teacher/get-chatbot-questions/{}", student_id);
        let res = self.client.get(self.url(&path)).send().await?;
        let status = res.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(Error::Server {
                status,
                message: None,
            });
        }
        let payload: QuestionsPayload = serde_json::from_slice(res.bytes().await?.as_ref())?;
        if payload.success {
            Ok(payload.questions)
        } else {
            Ok(Vec::new())
        }
    }

    /// The questions travel as one form field holding the JSON-encoded array.
    pub async fn update_chatbot_questions(
        &self,
        student_id: i64,
        questions: &[QaPair],
    ) -> Result<String> {
        let encoded = serde_json::to_string(questions)?;
        let path = format!("/teacher/update-chatbot-questions/{}", student_id);
        self.post_form(&path, &[("questions", encoded)]).await
    }

    async fn post_form(&self, path: &str, fields: &[(&str, String)]) -> Result<String> {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await?;
        self.mutation_outcome(res).await
    }

    /// Success means a 2xx status AND a true success flag; anything else is
    /// a server-reported failure carrying whatever `error` text came back.
    async fn mutation_outcome(&self, res: reqwest::Response) -> Result<String> {
        let status = res.status().as_u16();
        let body = res.bytes().await?;
        if !(200..300).contains(&status) {
            let message = serde_json::from_slice::<MutationOutcome>(body.as_ref())
                .ok()
                .and_then(|o| o.error);
            return Err(Error::Server { status, message });
        }
        let outcome: MutationOutcome = serde_json::from_slice(body.as_ref())?;
        if outcome.success {
            Ok(outcome.message.unwrap_or_default())
        } else {
            Err(Error::Server {
                status,
                message: outcome.error,
            })
        }
    }
}
