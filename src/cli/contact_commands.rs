use crate::cli::context::CLIContext;
use crate::error::ContactResult;
use crate::model::{ContactDraft, ContactRecord, Id, User};
use crate::ops::contact_ops;
use crate::queries::contact_queries;

pub fn add(ctx: &CLIContext, owner_id: Id<User>, draft: ContactDraft) -> ContactResult<()> {
    let contact = contact_ops::add_contact(&ctx.conn, owner_id, draft)?;
    println!("Contact created: {}", CLIContext::format_contact(&contact));
    Ok(())
}

pub fn update(
    ctx: &CLIContext,
    contact_id: Id<ContactRecord>,
    draft: ContactDraft,
) -> ContactResult<()> {
    let contact = contact_ops::update_contact(&ctx.conn, contact_id, draft)?;
    println!("Contact updated: {}", CLIContext::format_contact(&contact));
    Ok(())
}

pub fn list(ctx: &CLIContext, owner_id: Id<User>) -> ContactResult<()> {
    let contacts = contact_queries::contacts_for(&ctx.conn, owner_id)?;
    if contacts.is_empty() {
        println!("No contacts saved. Use 'contact add' or 'import'.");
        return Ok(());
    }

    println!("Contacts ({}):", contacts.len());
    for contact in &contacts {
        println!("  {}", CLIContext::format_contact(contact));
    }
    Ok(())
}

pub fn search(ctx: &CLIContext, owner_id: Id<User>, name: &str) -> ContactResult<()> {
    let found = contact_ops::find_by_first_name(&ctx.conn, owner_id, name)?;
    println!("Contacts matching '{}' ({}):", name.trim(), found.len());
    for contact in &found {
        println!("  {}", CLIContext::format_contact(contact));
    }
    Ok(())
}

pub fn delete(
    ctx: &CLIContext,
    owner_id: Id<User>,
    contact_id: Id<ContactRecord>,
) -> ContactResult<()> {
    contact_ops::delete_contact(&ctx.conn, owner_id, contact_id)?;
    println!("Contact deleted.");
    Ok(())
}
