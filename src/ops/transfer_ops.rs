//! Export and import of a user's address book as a vCard document.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{ImportConfig, MalformedPolicy};
use crate::db::user_repo;
use crate::error::{ContactError, ContactResult};
use crate::model::{Id, User};
use crate::ops::user_ops;
use crate::vcard::{self, DecodeOptions, MalformedRecord};

/// A downloadable vCard file.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: &'static str,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    /// Cards left out under [`MalformedPolicy::Skip`].
    pub skipped: Vec<MalformedRecord>,
    pub completed_at: DateTime<Utc>,
}

/// What the caller of an import gets to see: a flag and a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub success: bool,
}

impl ImportResponse {
    pub fn from_result(result: &ContactResult<ImportReport>) -> Self {
        match result {
            Ok(report) if report.skipped.is_empty() => Self {
                message: format!("{} contact(s) imported successfully", report.imported),
                success: true,
            },
            Ok(report) => Self {
                message: format!(
                    "{} contact(s) imported, {} skipped (first: {})",
                    report.imported,
                    report.skipped.len(),
                    report.skipped[0]
                ),
                success: true,
            },
            Err(ContactError::NotFound { .. }) => Self {
                message: "User Not Found".to_string(),
                success: false,
            },
            Err(ContactError::MalformedRecord(record)) => Self {
                message: format!("Import rejected, nothing was saved: {}", record),
                success: false,
            },
            Err(ContactError::InvalidEncoding(_)) => Self {
                message: "Import rejected: the file is not a UTF-8 vCard document".to_string(),
                success: false,
            },
            Err(ContactError::ConcurrentModification { .. }) => Self {
                message: "Import failed: the address book is being changed elsewhere, try again"
                    .to_string(),
                success: false,
            },
            Err(_) => Self {
                message: "Import failed due to an internal error".to_string(),
                success: false,
            },
        }
    }
}

pub fn export_contacts(conn: &Connection, owner_id: Id<User>) -> ContactResult<ExportFile> {
    let owner = user_ops::get_user(conn, owner_id)?;
    let bytes = vcard::encode(&owner.saved_contacts);

    info!(
        owner_id = %owner_id,
        contacts = owner.saved_contacts.len(),
        bytes = bytes.len(),
        "contacts exported"
    );
    Ok(ExportFile {
        filename: vcard::EXPORT_FILENAME,
        media_type: vcard::MEDIA_TYPE,
        bytes,
    })
}

/// Decodes `document` into the owner's address book and saves it.
///
/// Every attempt works on a freshly loaded copy of the owner and commits with
/// a version check; losing to a concurrent writer reloads and decodes again,
/// up to `config.max_attempts` times.
pub fn import_contacts(
    conn: &Connection,
    owner_id: Id<User>,
    document: &[u8],
    config: &ImportConfig,
    options: &DecodeOptions,
) -> ContactResult<ImportReport> {
    import_contacts_with(conn, owner_id, document, config, options, user_repo::save)
}

/// [`import_contacts`] with the commit step supplied by the caller.
///
/// `save` must behave like [`user_repo::save`]: persist the aggregate or fail
/// with `ConcurrentModification` when the stored version moved on.
pub fn import_contacts_with<S>(
    conn: &Connection,
    owner_id: Id<User>,
    document: &[u8],
    config: &ImportConfig,
    options: &DecodeOptions,
    mut save: S,
) -> ContactResult<ImportReport>
where
    S: FnMut(&Connection, &mut User) -> ContactResult<()>,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let mut owner = user_ops::get_user(conn, owner_id)?;
        let report = stage_import(&mut owner, document, config.on_malformed, options)
            .map_err(|e| {
                error!(owner_id = %owner_id, "error importing contacts: {}", e);
                e
            })?;

        match save(conn, &mut owner) {
            Ok(()) => {
                info!(
                    owner_id = %owner_id,
                    imported = report.imported,
                    skipped = report.skipped.len(),
                    attempt,
                    "contacts imported"
                );
                return Ok(report);
            }
            Err(ContactError::ConcurrentModification { .. }) if attempt < attempts => {
                warn!(owner_id = %owner_id, attempt, "address book changed during import, retrying");
                attempt += 1;
            }
            Err(e) => {
                error!(owner_id = %owner_id, attempt, "error importing contacts: {}", e);
                return Err(e);
            }
        }
    }
}

/// Appends the decoded cards to `owner` according to `policy`, without
/// touching the store.
pub fn stage_import(
    owner: &mut User,
    document: &[u8],
    policy: MalformedPolicy,
    options: &DecodeOptions,
) -> ContactResult<ImportReport> {
    let cards = vcard::decode_cards(document, owner.id, options)?;

    let mut records = Vec::with_capacity(cards.len());
    let mut skipped = Vec::new();
    for card in cards {
        match card {
            Ok(record) => records.push(record),
            Err(malformed) => match policy {
                MalformedPolicy::RejectAll => return Err(malformed.into()),
                MalformedPolicy::Skip => {
                    debug!("skipping {}", malformed);
                    skipped.push(malformed);
                }
            },
        }
    }

    let imported = records.len();
    for record in records {
        owner.attach(record);
    }

    Ok(ImportReport {
        imported,
        skipped,
        completed_at: Utc::now(),
    })
}
