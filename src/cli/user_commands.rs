use crate::cli::context::CLIContext;
use crate::error::ContactResult;
use crate::ops::user_ops;

pub fn add(ctx: &CLIContext, name: &str, email: &str) -> ContactResult<()> {
    let user = user_ops::create_user(&ctx.conn, name, email)?;
    println!("Created user {} ({})", user.name, user.id);
    Ok(())
}

pub fn list(ctx: &CLIContext) -> ContactResult<()> {
    let users = user_ops::list_users(&ctx.conn)?;
    if users.is_empty() {
        println!("No users yet. Use 'user add' to create one.");
        return Ok(());
    }

    println!("Users ({}):", users.len());
    for user in &users {
        println!(
            "  {}  {} <{}>  {} contact(s)",
            user.id,
            user.name,
            user.email,
            user.saved_contacts.len()
        );
    }
    Ok(())
}
