use serde::{Deserialize, Serialize};

use super::contact::ContactRecord;
use super::ids::Id;

/// An account together with its address book.
///
/// `version` is the optimistic-lock counter of the contact collection: it is
/// read along with the contacts and must still match when the aggregate is
/// saved back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id<User>,
    pub name: String,
    pub email: String,
    pub saved_contacts: Vec<ContactRecord>,
    pub version: i64,
}

impl User {
    pub fn create(name: String, email: String) -> Self {
        Self {
            id: Id::generate(),
            name,
            email,
            saved_contacts: Vec::new(),
            version: 0,
        }
    }

    /// Takes ownership of `contact` and appends it to the address book.
    pub fn attach(&mut self, mut contact: ContactRecord) -> &ContactRecord {
        contact.owner_id = self.id;
        self.saved_contacts.push(contact);
        &self.saved_contacts[self.saved_contacts.len() - 1]
    }

    /// Removes a contact from the address book, returning it if it was there.
    pub fn detach(&mut self, contact_id: Id<ContactRecord>) -> Option<ContactRecord> {
        let pos = self.saved_contacts.iter().position(|c| c.id == contact_id)?;
        Some(self.saved_contacts.remove(pos))
    }

    pub fn contact_mut(&mut self, contact_id: Id<ContactRecord>) -> Option<&mut ContactRecord> {
        self.saved_contacts.iter_mut().find(|c| c.id == contact_id)
    }
}
