use rusqlite::Connection;

use crate::db::contact_repo;
use crate::error::ContactResult;
use crate::model::{ContactRecord, Id, User};

pub fn contacts_for(conn: &Connection, owner_id: Id<User>) -> ContactResult<Vec<ContactRecord>> {
    contact_repo::find_by_owner(conn, owner_id)
}

pub fn all_contacts(conn: &Connection) -> ContactResult<Vec<ContactRecord>> {
    contact_repo::find_all(conn)
}

pub fn contacts_named(
    conn: &Connection,
    owner_id: Id<User>,
    first_name: &str,
) -> ContactResult<Vec<ContactRecord>> {
    contact_repo::find_by_first_name(conn, owner_id, first_name.trim())
}

/// Size of the owner's address book, counted in the database.
pub fn contact_count(conn: &Connection, owner_id: Id<User>) -> ContactResult<usize> {
    contact_repo::count_by_owner(conn, owner_id)
}
