use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::user::User;

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: Id<ContactRecord>,
    pub owner_id: Id<User>,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub work_email: Option<String>,
    pub personal_email: String,
    pub home_phone_number: Option<String>,
    pub personal_phone_number: String,
    pub work_phone_number: Option<String>,
}

impl ContactRecord {
    pub fn create(owner_id: Id<User>, draft: ContactDraft) -> Self {
        Self {
            id: Id::generate(),
            owner_id,
            title: draft.title,
            first_name: draft.first_name,
            last_name: draft.last_name,
            work_email: draft.work_email,
            personal_email: draft.personal_email,
            home_phone_number: draft.home_phone_number,
            personal_phone_number: draft.personal_phone_number,
            work_phone_number: draft.work_phone_number,
        }
    }

    /// Overwrites every field with the draft's values. Identity and owner stay.
    pub fn apply(&mut self, draft: ContactDraft) {
        self.title = draft.title;
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.work_email = draft.work_email;
        self.personal_email = draft.personal_email;
        self.home_phone_number = draft.home_phone_number;
        self.personal_phone_number = draft.personal_phone_number;
        self.work_phone_number = draft.work_phone_number;
    }

    pub fn draft(&self) -> ContactDraft {
        ContactDraft::from(self)
    }
}

/// The user-supplied fields of a contact, without identity or ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub work_email: Option<String>,
    pub personal_email: String,
    pub home_phone_number: Option<String>,
    pub personal_phone_number: String,
    pub work_phone_number: Option<String>,
}

impl From<&ContactRecord> for ContactDraft {
    fn from(record: &ContactRecord) -> Self {
        Self {
            title: record.title.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            work_email: record.work_email.clone(),
            personal_email: record.personal_email.clone(),
            home_phone_number: record.home_phone_number.clone(),
            personal_phone_number: record.personal_phone_number.clone(),
            work_phone_number: record.work_phone_number.clone(),
        }
    }
}
