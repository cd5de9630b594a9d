use std::vec::Vec;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::dto::{
    ArrearsUpdate, MarksUpdate, NewStudent, ParentDetails, PhotoUpload, StudentUpdate,
    SubjectNotesUpdate,
};

/// A server field that may arrive either already structured or as
/// JSON-encoded text inside a string. `normalize` is the one place that
/// resolves the difference; a broken encoding falls back to the empty
/// structure instead of failing the whole record.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonField<T> {
    Structured(T),
    Raw(String),
}

impl<T> Default for JsonField<T>
where
    T: Default,
{
    fn default() -> Self {
        JsonField::Structured(T::default())
    }
}

impl<T> JsonField<T>
where
    T: DeserializeOwned + Default,
{
    pub fn normalize(self) -> T {
        match self {
            JsonField::Structured(v) => v,
            JsonField::Raw(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                log::warn!("Discarding undecodable field: {:?}", e);
                T::default()
            }),
        }
    }
}

/// Server-provided snapshot the edit form is populated from. The server
/// stays authoritative; this is never written back as-is.
#[derive(Clone, Debug, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub age: Option<u16>,
    #[serde(default)]
    pub blood_group: String,
    /// May be absent, `null`, structured, or a JSON-encoded string.
    #[serde(default)]
    pub subjects: Option<JsonField<Vec<String>>>,
    #[serde(default)]
    pub parent_details: Option<JsonField<ParentDetails>>,
}

#[derive(Clone, Debug, Default)]
pub struct AddStudentFields {
    pub email_phone: String,
    pub password: String,
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub photo: Option<PhotoUpload>,
}

impl AddStudentFields {
    pub(crate) fn to_form(&self) -> NewStudent {
        NewStudent {
            email_phone: self.email_phone.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            roll_number: self.roll_number.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }
}

/// Transient state of the edit-student dialog. Field values are the raw
/// form text; conversion back to wire types happens in `to_update`.
#[derive(Clone, Debug, Default)]
pub struct EditStudentFields {
    pub student_id: i64,
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub age: String,
    pub blood_group: String,
    /// Comma-separated, the way the form presents the subject list.
    pub subjects: String,
    pub parent_name: String,
    pub parent_relationship: String,
    pub parent_phone: String,
    pub parent_email: String,
}

impl EditStudentFields {
    /// Canonical population routine. Both the direct programmatic path and
    /// the tolerant-decode path (`from_record`) end up here.
    pub fn populate(
        student_id: i64,
        name: &str,
        roll_number: &str,
        department: &str,
        age: Option<u16>,
        blood_group: &str,
        subjects: &[String],
        parent: &ParentDetails,
    ) -> Self {
        EditStudentFields {
            student_id,
            name: String::from(name),
            roll_number: String::from(roll_number),
            department: String::from(department),
            age: age.map_or(String::new(), |a| a.to_string()),
            blood_group: String::from(blood_group),
            subjects: subjects.join(", "),
            parent_name: parent.name.clone(),
            parent_relationship: parent.relationship.clone(),
            parent_phone: parent.phone.clone(),
            parent_email: parent.email.clone(),
        }
    }

    pub fn from_record(record: StudentRecord) -> Self {
        let subjects = record.subjects.map_or_else(Vec::new, JsonField::normalize);
        let parent = record
            .parent_details
            .map_or_else(ParentDetails::default, JsonField::normalize);
        Self::populate(
            record.id,
            &record.name,
            &record.roll_number,
            &record.department,
            record.age,
            &record.blood_group,
            &subjects,
            &parent,
        )
    }

    pub(crate) fn to_update(&self) -> StudentUpdate {
        StudentUpdate {
            name: self.name.trim().to_string(),
            roll_number: self.roll_number.trim().to_string(),
            department: self.department.trim().to_string(),
            // Non-numeric input degrades to "no age", same as the backend.
            age: self.age.trim().parse().ok(),
            blood_group: self.blood_group.trim().to_string(),
            subjects: self
                .subjects
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            parent: ParentDetails {
                name: self.parent_name.trim().to_string(),
                relationship: self.parent_relationship.trim().to_string(),
                phone: self.parent_phone.trim().to_string(),
                email: self.parent_email.trim().to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResetPasswordFields {
    pub student_id: i64,
    pub password: String,
}

#[derive(Clone, Debug, Default)]
pub struct MarksFields {
    pub student_id: i64,
    pub update: MarksUpdate,
}

#[derive(Clone, Debug, Default)]
pub struct ArrearsFields {
    pub student_id: i64,
    pub update: ArrearsUpdate,
}

#[derive(Clone, Debug, Default)]
pub struct NotesLinkFields {
    pub student_id: i64,
    pub notes_link: String,
}

#[derive(Clone, Debug, Default)]
pub struct SubjectNotesFields {
    pub student_id: i64,
    pub update: SubjectNotesUpdate,
}
