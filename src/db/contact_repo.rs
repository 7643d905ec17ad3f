use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::{ContactError, ContactResult};
use crate::model::{ContactRecord, Id, User};

const COLUMNS: &str = "id, owner_id, title, first_name, last_name, work_email, personal_email,
     home_phone_number, personal_phone_number, work_phone_number";

/// Inserts the contact, or rewrites it in place if the id is already stored.
pub fn upsert(conn: &Connection, contact: &ContactRecord, position: i64) -> ContactResult<()> {
    conn.execute(
        "INSERT INTO contacts (id, owner_id, position, title, first_name, last_name, work_email,
             personal_email, home_phone_number, personal_phone_number, work_phone_number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(id) DO UPDATE SET
             position = excluded.position,
             title = excluded.title,
             first_name = excluded.first_name,
             last_name = excluded.last_name,
             work_email = excluded.work_email,
             personal_email = excluded.personal_email,
             home_phone_number = excluded.home_phone_number,
             personal_phone_number = excluded.personal_phone_number,
             work_phone_number = excluded.work_phone_number",
        params![
            contact.id.value.to_string(),
            contact.owner_id.value.to_string(),
            position,
            contact.title,
            contact.first_name,
            contact.last_name,
            contact.work_email,
            contact.personal_email,
            contact.home_phone_number,
            contact.personal_phone_number,
            contact.work_phone_number,
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, contact_id: Id<ContactRecord>) -> ContactResult<()> {
    conn.execute(
        "DELETE FROM contacts WHERE id = ?1",
        params![contact_id.value.to_string()],
    )?;
    Ok(())
}

pub fn find_by_id(
    conn: &Connection,
    contact_id: Id<ContactRecord>,
) -> ContactResult<Option<ContactRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM contacts WHERE id = ?1", COLUMNS))?;

    let result = stmt.query_row(params![contact_id.value.to_string()], |row| {
        Ok(row_to_contact(row))
    });

    match result {
        Ok(contact) => Ok(Some(contact?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The owner's address book in stored order.
pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> ContactResult<Vec<ContactRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM contacts WHERE owner_id = ?1 ORDER BY position",
        COLUMNS
    ))?;

    let contacts = stmt
        .query_map(params![owner_id.value.to_string()], |row| {
            Ok(row_to_contact(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

/// Case-insensitive substring match on the first name.
pub fn find_by_first_name(
    conn: &Connection,
    owner_id: Id<User>,
    query: &str,
) -> ContactResult<Vec<ContactRecord>> {
    let pattern = format!("%{}%", query.to_lowercase());
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM contacts WHERE owner_id = ?1 AND LOWER(first_name) LIKE ?2
         ORDER BY position",
        COLUMNS
    ))?;

    let contacts = stmt
        .query_map(params![owner_id.value.to_string(), pattern], |row| {
            Ok(row_to_contact(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn find_all(conn: &Connection) -> ContactResult<Vec<ContactRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM contacts ORDER BY owner_id, position",
        COLUMNS
    ))?;

    let contacts = stmt
        .query_map([], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn count_by_owner(conn: &Connection, owner_id: Id<User>) -> ContactResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM contacts WHERE owner_id = ?1",
        params![owner_id.value.to_string()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

pub fn ids_by_owner(
    conn: &Connection,
    owner_id: Id<User>,
) -> ContactResult<Vec<Id<ContactRecord>>> {
    let mut stmt = conn.prepare("SELECT id FROM contacts WHERE owner_id = ?1")?;

    let ids = stmt
        .query_map(params![owner_id.value.to_string()], |row| {
            row.get::<_, String>(0)
        })?
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .map(|s| parse_uuid(s).map(Id::new))
        .collect::<ContactResult<Vec<_>>>()?;

    Ok(ids)
}

pub(crate) fn parse_uuid(s: &str) -> ContactResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| ContactError::Other(format!("Invalid UUID: {}", e)))
}

fn row_to_contact(row: &rusqlite::Row) -> ContactResult<ContactRecord> {
    let id_str: String = row.get(0)?;
    let owner_str: String = row.get(1)?;

    Ok(ContactRecord {
        id: Id::new(parse_uuid(&id_str)?),
        owner_id: Id::new(parse_uuid(&owner_str)?),
        title: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        work_email: row.get(5)?,
        personal_email: row.get(6)?,
        home_phone_number: row.get(7)?,
        personal_phone_number: row.get(8)?,
        work_phone_number: row.get(9)?,
    })
}
