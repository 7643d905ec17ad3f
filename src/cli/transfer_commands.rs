use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::context::CLIContext;
use crate::error::ContactResult;
use crate::model::{Id, User};
use crate::ops::transfer_ops::{self, ImportResponse};
use crate::queries::contact_queries;

pub fn export(ctx: &CLIContext, owner_id: Id<User>, out: Option<PathBuf>) -> ContactResult<()> {
    let file = transfer_ops::export_contacts(&ctx.conn, owner_id)?;
    let path = out.unwrap_or_else(|| PathBuf::from(file.filename));
    fs::write(&path, &file.bytes)?;
    println!(
        "Wrote {} bytes of {} to {}",
        file.len(),
        file.media_type,
        path.display()
    );
    Ok(())
}

/// Prints the import outcome as JSON; the error itself is still returned so
/// the process exit status reflects it.
pub fn import(ctx: &CLIContext, owner_id: Id<User>, path: &Path) -> ContactResult<()> {
    let document = fs::read(path)?;
    let result = transfer_ops::import_contacts(
        &ctx.conn,
        owner_id,
        &document,
        &ctx.config.import,
        &ctx.config.codec,
    );

    let response = ImportResponse::from_result(&result);
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Ok(report) = &result {
        for skipped in &report.skipped {
            println!("  skipped {}", skipped);
        }
        let total = contact_queries::contact_count(&ctx.conn, owner_id)?;
        println!("Address book now holds {} contact(s)", total);
    }
    result.map(|_| ())
}
