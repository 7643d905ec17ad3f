use rusqlite::Connection;
use tracing::info;

use crate::db::user_repo;
use crate::error::{ContactError, ContactResult};
use crate::model::{Id, User};
use crate::validation;

pub fn create_user(conn: &Connection, name: &str, email: &str) -> ContactResult<User> {
    let valid_name = validation::non_blank(name, "name")?;
    let valid_email = validation::non_blank(email, "email")?;

    if user_repo::find_by_email(conn, &valid_email)?.is_some() {
        return Err(ContactError::AlreadyExists {
            entity_type: "User".into(),
            identifier: valid_email,
        });
    }

    let user = User::create(valid_name, valid_email);
    user_repo::insert(conn, &user)?;
    info!(user_id = %user.id, "user created");
    Ok(user)
}

/// Resolves an owner; a missing user is a `NotFound` error.
pub fn get_user(conn: &Connection, user_id: Id<User>) -> ContactResult<User> {
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| ContactError::NotFound {
        entity_type: "User".into(),
        id: user_id.to_string(),
    })
}

pub fn list_users(conn: &Connection) -> ContactResult<Vec<User>> {
    user_repo::find_all(conn)
}
