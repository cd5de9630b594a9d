use std::vec::Vec;

use serde::{Deserialize, Serialize};

/// One question/answer record of the admin-configurable chatbot knowledge
/// set. Order inside a list is display order and is meaningful.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize)]
pub(crate) struct ChatReply {
    pub(crate) response: String,
}

/// `{success, message?, error?}` envelope every mutation endpoint answers
/// with. Unknown fields are left untouched on the wire.
#[derive(Deserialize)]
pub(crate) struct MutationOutcome {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct QuestionsPayload {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) questions: Vec<QaPair>,
}

#[derive(Clone, Debug, Default)]
pub struct NewStudent {
    pub email_phone: String,
    pub password: String,
    pub name: String,
    pub roll_number: String,
    pub department: String,
}

#[derive(Clone, Debug)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ParentDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Partial overwrite posted to the edit-student endpoint. The server owns
/// the canonical record, this is only what the form carried.
#[derive(Clone, Debug, Default)]
pub struct StudentUpdate {
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub age: Option<u16>,
    pub blood_group: String,
    pub subjects: Vec<String>,
    pub parent: ParentDetails,
}

#[derive(Clone, Debug, Default)]
pub struct MarksUpdate {
    pub semester: String,
    pub subject: String,
    pub marks: String,
}

#[derive(Clone, Debug, Default)]
pub struct ArrearsUpdate {
    pub subject: String,
    pub status: String,
}

#[derive(Clone, Debug, Default)]
pub struct SubjectNotesUpdate {
    pub subject: String,
    pub notes_link: String,
}
