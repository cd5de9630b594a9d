use std::future::Future;
use std::pin::Pin;

use time::OffsetDateTime;
use tokio::sync::oneshot;

use crate::result::{Error, Result};
use crate::ui::modal::Modal;
use crate::ui::notify::NotificationKind;
use crate::ui::UiContext;

pub(crate) const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    AddStudent,
    EditStudent,
    ResetPassword,
    UpdateMarks,
    UpdateArrears,
    UpdateNotesLink,
    UpdateSubjectNotes,
    ChatbotQuestions,
}

/// What happens to the view after a successful submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    ReloadView,
    CloseModalOnly,
}

impl FormKind {
    pub fn idle_label(&self) -> &'static str {
        match self {
            Self::AddStudent => "Add Student",
            Self::EditStudent => "Save Changes",
            Self::ResetPassword => "Reset Password",
            Self::UpdateMarks => "Update Marks",
            Self::UpdateArrears => "Update Arrears",
            Self::UpdateNotesLink => "Update Link",
            Self::UpdateSubjectNotes => "Add Notes",
            Self::ChatbotQuestions => "Save Questions",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::AddStudent | Self::UpdateSubjectNotes => "Adding...",
            Self::ResetPassword => "Resetting...",
            Self::ChatbotQuestions => "Saving...",
            _ => "Updating...",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::AddStudent => "Student added successfully!",
            Self::EditStudent => "Student updated successfully!",
            Self::ResetPassword => "Password reset successfully!",
            Self::UpdateMarks => "Marks updated successfully!",
            Self::UpdateArrears => "Arrears updated successfully!",
            Self::UpdateNotesLink => "Notes link updated successfully!",
            Self::UpdateSubjectNotes => "Subject notes added successfully!",
            Self::ChatbotQuestions => "Chatbot questions updated successfully!",
        }
    }

    pub fn fallback_error(&self) -> &'static str {
        match self {
            Self::AddStudent => "Failed to add student",
            Self::EditStudent => "Failed to update student",
            Self::ResetPassword => "Failed to reset password",
            Self::UpdateMarks => "Failed to update marks",
            Self::UpdateArrears => "Failed to update arrears",
            Self::UpdateNotesLink => "Failed to update notes link",
            Self::UpdateSubjectNotes => "Failed to add subject notes",
            Self::ChatbotQuestions => "Failed to update chatbot questions",
        }
    }

    pub fn follow_up(&self) -> FollowUp {
        match self {
            Self::ResetPassword | Self::ChatbotQuestions => FollowUp::CloseModalOnly,
            _ => FollowUp::ReloadView,
        }
    }
}

/// The submit control's visible state plus the remembered idle label, so a
/// failed submission restores exactly what the user saw before.
#[derive(Clone, Debug)]
pub struct SubmitButton {
    enabled: bool,
    label: String,
    original_label: String,
}

impl SubmitButton {
    fn new(idle_label: &str) -> Self {
        SubmitButton {
            enabled: true,
            label: String::from(idle_label),
            original_label: String::from(idle_label),
        }
    }

    fn begin(&mut self, busy_label: &str) {
        self.original_label = std::mem::replace(&mut self.label, String::from(busy_label));
        self.enabled = false;
    }

    fn restore(&mut self) {
        self.label = self.original_label.clone();
        self.enabled = true;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// How a pending submission ended up.
#[derive(Debug)]
pub enum SubmitOutcome {
    Settled(Result<String>),
    /// The originating modal was closed mid-flight; no notification is
    /// raised and the guard is released quietly.
    Cancelled,
}

type BoxedRequest = Pin<Box<dyn Future<Output = Result<String>> + Send>>;

/// An in-flight submission detached from the editor, so the editor stays
/// free for other interactions (including closing the modal, which cancels
/// this) while the request runs.
pub struct PendingSubmission {
    kind: FormKind,
    cancel_rx: oneshot::Receiver<()>,
    request: BoxedRequest,
}

impl PendingSubmission {
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub async fn run(self) -> SubmitOutcome {
        let PendingSubmission {
            kind,
            mut cancel_rx,
            request,
        } = self;
        tokio::select! {
            _ = &mut cancel_rx => {
                log::info!("{:?} submission cancelled by modal close", kind);
                SubmitOutcome::Cancelled
            }
            r = request => SubmitOutcome::Settled(r),
        }
    }
}

/// One modal-backed form: its dialog state, its submit control, and the
/// cancel handle of any outstanding request. The disabled submit control is
/// the pending guard; re-entry while disabled issues nothing.
pub struct FormController<F> {
    kind: FormKind,
    pub modal: Modal<F>,
    button: SubmitButton,
    cancel: Option<oneshot::Sender<()>>,
}

impl<F> FormController<F> {
    pub(crate) fn new(kind: FormKind) -> Self {
        FormController {
            kind,
            modal: Modal::Closed,
            button: SubmitButton::new(kind.idle_label()),
            cancel: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn open_with(&mut self, fields: F) {
        self.button = SubmitButton::new(self.kind.idle_label());
        self.modal.open_with(fields);
    }

    /// Explicit cancel, outside-click, or post-success teardown all route
    /// here. An outstanding request is told to stand down.
    pub fn close(&mut self) {
        self.modal.close();
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    pub(crate) fn begin(&mut self, request: BoxedRequest) -> Option<PendingSubmission> {
        if !self.button.enabled {
            log::debug!("{:?} submit ignored, already pending", self.kind);
            return None;
        }
        self.button.begin(self.kind.busy_label());
        let (tx, rx) = oneshot::channel();
        self.cancel = Some(tx);
        Some(PendingSubmission {
            kind: self.kind,
            cancel_rx: rx,
            request,
        })
    }

    /// Releases the pending guard on every path: success closes the modal
    /// and applies the follow-up, failure notifies and restores the control,
    /// cancellation restores quietly.
    pub(crate) fn settle(&mut self, ui: &mut UiContext, outcome: SubmitOutcome) {
        self.cancel = None;
        self.button.restore();
        match outcome {
            SubmitOutcome::Cancelled => {}
            SubmitOutcome::Settled(Ok(_)) => {
                ui.notifier
                    .notify(self.kind.success_message(), NotificationKind::Success);
                self.modal.close();
                if self.kind.follow_up() == FollowUp::ReloadView {
                    ui.schedule_reload(OffsetDateTime::now_utc());
                }
            }
            SubmitOutcome::Settled(Err(e)) => {
                log::error!("{:?} submission failed: {:?}", self.kind, e);
                ui.notifier
                    .notify(failure_message(&e, self.kind), NotificationKind::Error);
            }
        }
    }
}

/// Server-supplied text when there is one, the form's fallback when the
/// server answered without detail, the generic line for transport and
/// decode failures.
pub(crate) fn failure_message(err: &Error, kind: FormKind) -> String {
    match err {
        Error::Validation(_) | Error::Server { .. } => err
            .reported_message()
            .map(String::from)
            .unwrap_or_else(|| String::from(kind.fallback_error())),
        _ => String::from(GENERIC_FAILURE),
    }
}
