pub mod context;
pub mod user_commands;
pub mod contact_commands;
pub mod transfer_commands;

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;
use tracing::debug;

use crate::config::{AppConfig, MalformedPolicy};
use crate::db::schema;
use crate::error::ContactResult;
use crate::model::{ContactDraft, ContactRecord, Id, User};
use crate::vcard::UnmappedTagPolicy;
use context::CLIContext;

#[derive(Debug, Parser)]
#[command(name = "contact-manager")]
#[command(about = "Address books with vCard import and export")]
#[command(version)]
pub struct Cli {
    /// Database file path (overrides the config file)
    #[arg(short = 'f', long = "db", global = true)]
    pub db_path: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Address-book entries
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Write a user's contacts to a .vcf file
    Export {
        #[arg(long)]
        user: Id<User>,
        /// Output file (default: contacts.vcf)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Read a .vcf file into a user's contacts
    Import {
        #[arg(long)]
        user: Id<User>,
        #[arg(long)]
        file: PathBuf,
        /// Import the good cards and report the bad ones
        #[arg(long)]
        skip_malformed: bool,
        /// Treat TEL/EMAIL type tags other than CELL/HOME/WORK as errors
        #[arg(long)]
        reject_unmapped: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// List users
    List,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommands {
    /// Add a contact to a user's address book
    Add {
        #[arg(long)]
        user: Id<User>,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Replace every field of a contact
    Update {
        #[arg(long)]
        contact: Id<ContactRecord>,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// List a user's contacts in stored order
    List {
        #[arg(long)]
        user: Id<User>,
    },
    /// Find contacts by first name
    Search {
        #[arg(long)]
        user: Id<User>,
        #[arg(long)]
        name: String,
    },
    /// Remove a contact from a user's address book
    Delete {
        #[arg(long)]
        user: Id<User>,
        #[arg(long)]
        contact: Id<ContactRecord>,
    },
}

#[derive(Debug, Args)]
pub struct ContactFields {
    /// Honorific ending in a period, e.g. "Mr."
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub personal_email: String,
    #[arg(long)]
    pub personal_phone: String,
    #[arg(long)]
    pub work_email: Option<String>,
    #[arg(long)]
    pub home_phone: Option<String>,
    #[arg(long)]
    pub work_phone: Option<String>,
}

impl From<ContactFields> for ContactDraft {
    fn from(f: ContactFields) -> Self {
        ContactDraft {
            title: f.title,
            first_name: f.first_name,
            last_name: f.last_name,
            work_email: f.work_email,
            personal_email: f.personal_email,
            home_phone_number: f.home_phone,
            personal_phone_number: f.personal_phone,
            work_phone_number: f.work_phone,
        }
    }
}

/// Applies command-line overrides on top of the loaded configuration.
pub fn effective_config(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(path) = &cli.db_path {
        config.database.path = path.clone();
    }
    if let Commands::Import {
        skip_malformed,
        reject_unmapped,
        ..
    } = &cli.command
    {
        if *skip_malformed {
            config.import.on_malformed = MalformedPolicy::Skip;
        }
        if *reject_unmapped {
            config.codec.unmapped_tag = UnmappedTagPolicy::Reject;
        }
    }
    config
}

/// Opens the database and runs one command.
pub fn run(command: Commands, config: AppConfig) -> ContactResult<()> {
    if let Some(dir) = config.database.path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    debug!(path = %config.database.path.display(), "opening database");
    let conn = Connection::open(&config.database.path)?;
    schema::initialize(&conn)?;

    let ctx = CLIContext::new(conn, config);
    dispatch(&ctx, command)
}

pub fn dispatch(ctx: &CLIContext, command: Commands) -> ContactResult<()> {
    match command {
        Commands::User { command } => match command {
            UserCommands::Add { name, email } => user_commands::add(ctx, &name, &email),
            UserCommands::List => user_commands::list(ctx),
        },
        Commands::Contact { command } => match command {
            ContactCommands::Add { user, fields } => contact_commands::add(ctx, user, fields.into()),
            ContactCommands::Update { contact, fields } => {
                contact_commands::update(ctx, contact, fields.into())
            }
            ContactCommands::List { user } => contact_commands::list(ctx, user),
            ContactCommands::Search { user, name } => contact_commands::search(ctx, user, &name),
            ContactCommands::Delete { user, contact } => contact_commands::delete(ctx, user, contact),
        },
        Commands::Export { user, out } => transfer_commands::export(ctx, user, out),
        Commands::Import { user, file, .. } => transfer_commands::import(ctx, user, &file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_flags_override_config() {
        let user = Id::<User>::generate();
        let cli = Cli::parse_from([
            "contact-manager",
            "--db",
            "/tmp/other.db",
            "import",
            "--user",
            &user.to_string(),
            "--file",
            "in.vcf",
            "--skip-malformed",
            "--reject-unmapped",
        ]);
        let config = effective_config(&cli, AppConfig::default());
        assert_eq!(config.database.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.import.on_malformed, MalformedPolicy::Skip);
        assert_eq!(config.codec.unmapped_tag, UnmappedTagPolicy::Reject);
    }

    #[test]
    fn defaults_survive_other_commands() {
        let cli = Cli::parse_from(["contact-manager", "user", "list"]);
        let config = effective_config(&cli, AppConfig::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_malformed_ids() {
        let result = Cli::try_parse_from(["contact-manager", "contact", "list", "--user", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn contact_add_requires_title() {
        let user = Id::<User>::generate();
        let result = Cli::try_parse_from([
            "contact-manager",
            "contact",
            "add",
            "--user",
            &user.to_string(),
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--personal-email",
            "ada@home.example",
            "--personal-phone",
            "555-0100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn contact_fields_become_a_draft() {
        let user = Id::<User>::generate();
        let cli = Cli::parse_from([
            "contact-manager",
            "contact",
            "add",
            "--user",
            &user.to_string(),
            "--title",
            "Dr.",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--personal-email",
            "ada@home.example",
            "--personal-phone",
            "555-0100",
            "--work-phone",
            "555-0199",
        ]);
        let Commands::Contact {
            command: ContactCommands::Add { user: parsed, fields },
        } = cli.command
        else {
            panic!("expected contact add");
        };
        assert_eq!(parsed, user);
        let draft = ContactDraft::from(fields);
        assert_eq!(draft.title, "Dr.");
        assert_eq!(draft.work_phone_number, Some("555-0199".into()));
        assert_eq!(draft.home_phone_number, None);
    }
}
