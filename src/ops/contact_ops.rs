use rusqlite::Connection;
use tracing::{error, info};

use crate::db::{contact_repo, user_repo};
use crate::error::{ContactError, ContactResult};
use crate::model::{ContactDraft, ContactRecord, Id, User};
use crate::ops::user_ops;
use crate::queries::contact_queries;
use crate::validation::{self, trim_optional};

pub fn add_contact(
    conn: &Connection,
    owner_id: Id<User>,
    draft: ContactDraft,
) -> ContactResult<ContactRecord> {
    let draft = validate(draft)?;
    let mut owner = user_ops::get_user(conn, owner_id)?;

    let contact = owner.attach(ContactRecord::create(owner_id, draft)).clone();
    user_repo::save(conn, &mut owner)?;

    info!(contact_id = %contact.id, owner_id = %owner_id, "contact created");
    Ok(contact)
}

pub fn update_contact(
    conn: &Connection,
    contact_id: Id<ContactRecord>,
    draft: ContactDraft,
) -> ContactResult<ContactRecord> {
    let draft = validate(draft)?;
    let existing = get_contact(conn, contact_id)?;
    let mut owner = user_ops::get_user(conn, existing.owner_id)?;

    let contact = owner
        .contact_mut(contact_id)
        .ok_or_else(|| contact_not_found(contact_id))?;
    contact.apply(draft);
    let updated = contact.clone();
    user_repo::save(conn, &mut owner)?;

    info!(contact_id = %contact_id, "contact updated");
    Ok(updated)
}

/// Removes a contact from the owner's address book. The contact must belong
/// to `owner_id`.
pub fn delete_contact(
    conn: &Connection,
    owner_id: Id<User>,
    contact_id: Id<ContactRecord>,
) -> ContactResult<()> {
    let mut owner = user_ops::get_user(conn, owner_id)?;

    if owner.detach(contact_id).is_none() {
        error!(contact_id = %contact_id, owner_id = %owner_id, "contact to be deleted not found");
        return Err(contact_not_found(contact_id));
    }
    user_repo::save(conn, &mut owner)?;

    info!(contact_id = %contact_id, owner_id = %owner_id, "contact deleted");
    Ok(())
}

pub fn get_contact(conn: &Connection, contact_id: Id<ContactRecord>) -> ContactResult<ContactRecord> {
    contact_repo::find_by_id(conn, contact_id)?.ok_or_else(|| contact_not_found(contact_id))
}

/// Searches the owner's contacts by first name. An empty result is an error.
pub fn find_by_first_name(
    conn: &Connection,
    owner_id: Id<User>,
    name: &str,
) -> ContactResult<Vec<ContactRecord>> {
    let found = contact_queries::contacts_named(conn, owner_id, name)?;
    if found.is_empty() {
        return Err(ContactError::NotFound {
            entity_type: "Contact".into(),
            id: name.to_string(),
        });
    }
    Ok(found)
}

fn validate(draft: ContactDraft) -> ContactResult<ContactDraft> {
    Ok(ContactDraft {
        title: validation::title(&draft.title)?,
        first_name: validation::name_part(&draft.first_name, "first name")?,
        last_name: validation::name_part(&draft.last_name, "last name")?,
        work_email: trim_optional(draft.work_email.as_deref()),
        personal_email: validation::non_blank(&draft.personal_email, "personal email")?,
        home_phone_number: trim_optional(draft.home_phone_number.as_deref()),
        personal_phone_number: validation::non_blank(
            &draft.personal_phone_number,
            "personal phone number",
        )?,
        work_phone_number: trim_optional(draft.work_phone_number.as_deref()),
    })
}

fn contact_not_found(contact_id: Id<ContactRecord>) -> ContactError {
    ContactError::NotFound {
        entity_type: "Contact".into(),
        id: contact_id.to_string(),
    }
}
