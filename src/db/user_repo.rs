use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::contact_repo::{self, parse_uuid};
use crate::error::{ContactError, ContactResult};
use crate::model::{Id, User};

pub fn insert(conn: &Connection, user: &User) -> ContactResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO users (id, name, email, version) VALUES (?1, ?2, ?3, ?4)",
        params![user.id.value.to_string(), user.name, user.email, user.version],
    )?;
    for (position, contact) in user.saved_contacts.iter().enumerate() {
        contact_repo::upsert(&tx, contact, position as i64)?;
    }
    tx.commit()?;
    Ok(())
}

/// Loads the user together with the address book and its version.
pub fn find_by_id(conn: &Connection, id: Id<User>) -> ContactResult<Option<User>> {
    let row = conn
        .query_row(
            "SELECT id, name, email, version FROM users WHERE id = ?1",
            params![id.value.to_string()],
            row_to_user,
        )
        .optional()?;

    row.map(|user| load_contacts(conn, user?)).transpose()
}

pub fn find_by_email(conn: &Connection, email: &str) -> ContactResult<Option<User>> {
    let row = conn
        .query_row(
            "SELECT id, name, email, version FROM users WHERE email = ?1 COLLATE NOCASE",
            params![email],
            row_to_user,
        )
        .optional()?;

    row.map(|user| load_contacts(conn, user?)).transpose()
}

pub fn find_all(conn: &Connection) -> ContactResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email, version FROM users ORDER BY name")?;

    let users = stmt
        .query_map([], row_to_user)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|user| load_contacts(conn, user?))
        .collect::<ContactResult<Vec<_>>>()?;

    Ok(users)
}

/// Writes the address book back, provided nobody else saved it since `user`
/// was loaded.
///
/// The version check, the upserts of every contact still in the book and the
/// deletion of the ones that left it happen in one transaction. On success
/// `user.version` is bumped to the stored value.
pub fn save(conn: &Connection, user: &mut User) -> ContactResult<()> {
    let tx = conn.unchecked_transaction()?;

    let changed = tx.execute(
        "UPDATE users SET name = ?1, email = ?2, version = version + 1
         WHERE id = ?3 AND version = ?4",
        params![user.name, user.email, user.id.value.to_string(), user.version],
    )?;
    if changed == 0 {
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![user.id.value.to_string()],
            |row| row.get(0),
        )?;
        return Err(if exists {
            ContactError::ConcurrentModification {
                owner_id: user.id.to_string(),
            }
        } else {
            ContactError::NotFound {
                entity_type: "User".into(),
                id: user.id.to_string(),
            }
        });
    }

    let kept: HashSet<_> = user.saved_contacts.iter().map(|c| c.id).collect();
    for stale in contact_repo::ids_by_owner(&tx, user.id)? {
        if !kept.contains(&stale) {
            contact_repo::delete(&tx, stale)?;
        }
    }
    for (position, contact) in user.saved_contacts.iter().enumerate() {
        contact_repo::upsert(&tx, contact, position as i64)?;
    }

    tx.commit()?;
    user.version += 1;
    Ok(())
}

fn load_contacts(conn: &Connection, mut user: User) -> ContactResult<User> {
    user.saved_contacts = contact_repo::find_by_owner(conn, user.id)?;
    Ok(user)
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<ContactResult<User>> {
    let id_str: String = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let version: i64 = row.get(3)?;

    Ok(parse_uuid(&id_str).map(|uuid| User {
        id: Id::new(uuid),
        name,
        email,
        saved_contacts: Vec::new(),
        version,
    }))
}
