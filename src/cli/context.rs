use rusqlite::Connection;

use crate::config::AppConfig;
use crate::model::ContactRecord;
use crate::vcard;

pub struct CLIContext {
    pub conn: Connection,
    pub config: AppConfig,
}

impl CLIContext {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        Self { conn, config }
    }

    /// One-line summary of a contact for listings.
    pub fn format_contact(contact: &ContactRecord) -> String {
        let mut line = format!(
            "{}  {}  cell {}  {}",
            contact.id,
            vcard::formatted_name(contact),
            contact.personal_phone_number,
            contact.personal_email
        );
        if let Some(home) = &contact.home_phone_number {
            line.push_str(&format!("  home {}", home));
        }
        if let Some(work) = &contact.work_phone_number {
            line.push_str(&format!("  work {}", work));
        }
        if let Some(email) = &contact.work_email {
            line.push_str(&format!("  {}", email));
        }
        line
    }
}
