use time::OffsetDateTime;

use crate::backend::client::BackendClient;
use crate::backend::dto::ParentDetails;
use crate::man::settings::Settings;
use crate::result::Error;
use crate::ui::notify::NotificationKind;
use crate::ui::UiContext;

use super::dto::{
    AddStudentFields, ArrearsFields, EditStudentFields, MarksFields, NotesLinkFields,
    ResetPasswordFields, StudentRecord, SubjectNotesFields,
};
use super::forms::{FormController, FormKind, PendingSubmission, SubmitOutcome, GENERIC_FAILURE};
use super::qa::QaEditor;

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this student? This action cannot be undone.";

/// Owns the admin dashboard's modal dialogs, one per mutation endpoint, and
/// the UI context they all report through. Each form follows the same
/// protocol: pending guard, one request, notify, then close/reload or
/// restore.
pub struct AdminEditor {
    client: BackendClient,
    pub ui: UiContext,
    pub add_student: FormController<AddStudentFields>,
    pub edit_student: FormController<EditStudentFields>,
    pub reset_password: FormController<ResetPasswordFields>,
    pub marks: FormController<MarksFields>,
    pub arrears: FormController<ArrearsFields>,
    pub notes_link: FormController<NotesLinkFields>,
    pub subject_notes: FormController<SubjectNotesFields>,
    pub chatbot_questions: FormController<QaEditor>,
}

impl AdminEditor {
    pub fn new(client: BackendClient, settings: &Settings) -> Self {
        AdminEditor {
            client,
            ui: UiContext::new(settings),
            add_student: FormController::new(FormKind::AddStudent),
            edit_student: FormController::new(FormKind::EditStudent),
            reset_password: FormController::new(FormKind::ResetPassword),
            marks: FormController::new(FormKind::UpdateMarks),
            arrears: FormController::new(FormKind::UpdateArrears),
            notes_link: FormController::new(FormKind::UpdateNotesLink),
            subject_notes: FormController::new(FormKind::UpdateSubjectNotes),
            chatbot_questions: FormController::new(FormKind::ChatbotQuestions),
        }
    }

    pub fn open_add_student(&mut self) {
        self.add_student.open_with(AddStudentFields::default());
    }

    /// Direct programmatic entry point; the tolerant-decode path below lands
    /// on the same population routine.
    #[allow(clippy::too_many_arguments)]
    pub fn open_edit(
        &mut self,
        student_id: i64,
        name: &str,
        roll_number: &str,
        department: &str,
        age: Option<u16>,
        blood_group: &str,
        subjects: &[String],
        parent: &ParentDetails,
    ) {
        self.edit_student.open_with(EditStudentFields::populate(
            student_id,
            name,
            roll_number,
            department,
            age,
            blood_group,
            subjects,
            parent,
        ));
    }

    pub fn open_edit_with_record(&mut self, record: StudentRecord) {
        self.edit_student
            .open_with(EditStudentFields::from_record(record));
    }

    pub fn open_reset_password(&mut self, student_id: i64) {
        self.reset_password.open_with(ResetPasswordFields {
            student_id,
            password: String::new(),
        });
    }

    pub fn open_marks(&mut self, student_id: i64) {
        self.marks.open_with(MarksFields {
            student_id,
            ..Default::default()
        });
    }

    pub fn open_arrears(&mut self, student_id: i64) {
        self.arrears.open_with(ArrearsFields {
            student_id,
            ..Default::default()
        });
    }

    pub fn open_notes_link(&mut self, student_id: i64, current_link: &str) {
        self.notes_link.open_with(NotesLinkFields {
            student_id,
            notes_link: String::from(current_link),
        });
    }

    pub fn open_subject_notes(&mut self, student_id: i64) {
        self.subject_notes.open_with(SubjectNotesFields {
            student_id,
            ..Default::default()
        });
    }

    /// Opens the Q&A dialog over the stored set; failures degrade to one
    /// blank row.
    pub async fn open_chatbot_questions(&mut self, student_id: i64) {
        let editor = QaEditor::load(&self.client, student_id).await;
        self.chatbot_questions.open_with(editor);
    }

    pub fn submit_add_student(&mut self) -> Option<PendingSubmission> {
        let fields = self.add_student.modal.state()?.clone();
        if fields.email_phone.trim().is_empty() || fields.password.is_empty() {
            self.ui.notifier.notify(
                "Email/Phone and Password are required",
                NotificationKind::Error,
            );
            return None;
        }
        let client = self.client.clone();
        let form = fields.to_form();
        let photo = fields.photo;
        self.add_student
            .begin(Box::pin(async move { client.add_student(&form, photo).await }))
    }

    pub fn submit_edit_student(&mut self) -> Option<PendingSubmission> {
        let fields = self.edit_student.modal.state()?;
        let student_id = fields.student_id;
        let update = fields.to_update();
        let client = self.client.clone();
        self.edit_student.begin(Box::pin(async move {
            client.edit_student(student_id, &update).await
        }))
    }

    pub fn submit_reset_password(&mut self) -> Option<PendingSubmission> {
        let fields = self.reset_password.modal.state()?.clone();
        if fields.password.is_empty() {
            self.ui
                .notifier
                .notify("Password is required", NotificationKind::Error);
            return None;
        }
        let client = self.client.clone();
        self.reset_password.begin(Box::pin(async move {
            client
                .reset_password(fields.student_id, &fields.password)
                .await
        }))
    }

    pub fn submit_marks(&mut self) -> Option<PendingSubmission> {
        let fields = self.marks.modal.state()?.clone();
        let client = self.client.clone();
        self.marks.begin(Box::pin(async move {
            client.update_marks(fields.student_id, &fields.update).await
        }))
    }

    pub fn submit_arrears(&mut self) -> Option<PendingSubmission> {
        let fields = self.arrears.modal.state()?.clone();
        let client = self.client.clone();
        self.arrears.begin(Box::pin(async move {
            client
                .update_arrears(fields.student_id, &fields.update)
                .await
        }))
    }

    pub fn submit_notes_link(&mut self) -> Option<PendingSubmission> {
        let fields = self.notes_link.modal.state()?.clone();
        let client = self.client.clone();
        self.notes_link.begin(Box::pin(async move {
            client
                .update_notes_link(fields.student_id, &fields.notes_link)
                .await
        }))
    }

    pub fn submit_subject_notes(&mut self) -> Option<PendingSubmission> {
        let fields = self.subject_notes.modal.state()?.clone();
        let client = self.client.clone();
        self.subject_notes.begin(Box::pin(async move {
            client
                .update_subject_notes(fields.student_id, &fields.update)
                .await
        }))
    }

    /// Validates client-side first: pairs missing either half are dropped,
    /// and an empty filtered set blocks the submission with no request.
    pub fn submit_chatbot_questions(&mut self) -> Option<PendingSubmission> {
        let editor = self.chatbot_questions.modal.state()?;
        let questions = editor.collect_validated();
        if questions.is_empty() {
            self.ui.notifier.notify(
                "Please add at least one question and answer",
                NotificationKind::Error,
            );
            return None;
        }
        let student_id = editor.student_id();
        let client = self.client.clone();
        self.chatbot_questions.begin(Box::pin(async move {
            client.update_chatbot_questions(student_id, &questions).await
        }))
    }

    /// Applies a settled (or cancelled) submission back to the form it came
    /// from.
    pub fn settle(&mut self, kind: FormKind, outcome: SubmitOutcome) {
        match kind {
            FormKind::AddStudent => self.add_student.settle(&mut self.ui, outcome),
            FormKind::EditStudent => self.edit_student.settle(&mut self.ui, outcome),
            FormKind::ResetPassword => self.reset_password.settle(&mut self.ui, outcome),
            FormKind::UpdateMarks => self.marks.settle(&mut self.ui, outcome),
            FormKind::UpdateArrears => self.arrears.settle(&mut self.ui, outcome),
            FormKind::UpdateNotesLink => self.notes_link.settle(&mut self.ui, outcome),
            FormKind::UpdateSubjectNotes => self.subject_notes.settle(&mut self.ui, outcome),
            FormKind::ChatbotQuestions => self.chatbot_questions.settle(&mut self.ui, outcome),
        }
    }

    /// Convenience for sequential callers: drive the request to completion
    /// and settle in one go.
    pub async fn run_submission(&mut self, pending: PendingSubmission) {
        let kind = pending.kind();
        let outcome = pending.run().await;
        self.settle(kind, outcome);
    }

    /// Destructive, so gated on a synchronous confirmation supplied by the
    /// caller. No modal is involved.
    pub async fn delete_student<C>(&mut self, student_id: i64, confirm: C)
    where
        C: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return;
        }
        match self.client.delete_student(student_id).await {
            Ok(_) => {
                self.ui
                    .notifier
                    .notify("Student deleted successfully!", NotificationKind::Success);
                self.ui.schedule_reload(OffsetDateTime::now_utc());
            }
            Err(e) => {
                log::error!("Deleting student {} failed: {:?}", student_id, e);
                let message = match &e {
                    Error::Validation(_) | Error::Server { .. } => e
                        .reported_message()
                        .map(String::from)
                        .unwrap_or_else(|| String::from("Failed to delete student")),
                    _ => String::from(GENERIC_FAILURE),
                };
                self.ui.notifier.notify(message, NotificationKind::Error);
            }
        }
    }
}
