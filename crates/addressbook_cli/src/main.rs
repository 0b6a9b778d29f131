//! Command-line front end for the address book core.
//!
//! # Responsibility
//! - Parse arguments, call `addressbook_core`, print results.
//! - Keep all contact rules inside core.

use addressbook_core::db::open_db;
use addressbook_core::interchange::DEFAULT_FILE_NAME;
use addressbook_core::{
    init_from_config, AppState, Contact, ContactDraft, ContactId, ContactMethod, ContactService,
    CoreConfig, FilterMode, MethodType, SqliteBackend, StoredContactRepository,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "addressbook", version, about = "Local address book")]
struct Cli {
    /// Store file; overrides ADDRESSBOOK_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List contacts, optionally filtered.
    List {
        #[arg(long)]
        favorites: bool,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one contact.
    Show { id: String },
    /// Add a contact.
    Add(ContactArgs),
    /// Edit a contact; omitted fields keep their stored values.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a contact.
    Delete { id: String },
    /// Toggle the favorite flag.
    Favorite { id: String },
    /// Export all contacts as CSV.
    Export { path: Option<PathBuf> },
    /// Import contacts from CSV and append them.
    Import { path: PathBuf },
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    /// Contact method as TYPE=VALUE, e.g. phone=123. Repeatable.
    #[arg(long = "method", value_name = "TYPE=VALUE")]
    methods: Vec<String>,
    #[arg(long, default_value = "")]
    note: String,
    #[arg(long)]
    favorite: bool,
}

impl ContactArgs {
    fn into_draft(self) -> Result<ContactDraft, String> {
        let methods = self
            .methods
            .iter()
            .map(|raw| parse_method(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContactDraft {
            id: None,
            name: self.name,
            methods,
            note: self.note,
            is_favorite: self.favorite,
        })
    }
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    /// Replaces all methods when given. Repeatable.
    #[arg(long = "method", value_name = "TYPE=VALUE")]
    methods: Vec<String>,
    #[arg(long)]
    note: Option<String>,
    #[arg(long, value_name = "true|false")]
    favorite: Option<bool>,
}

impl EditArgs {
    /// Builds a draft pre-filled from `current`, overriding only given fields.
    fn apply_to(self, current: Contact) -> Result<ContactDraft, String> {
        let methods = if self.methods.is_empty() {
            current.methods
        } else {
            self.methods
                .iter()
                .map(|raw| parse_method(raw))
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(ContactDraft {
            id: Some(current.id),
            name: self.name.unwrap_or(current.name),
            methods,
            note: self.note.unwrap_or(current.note),
            is_favorite: self.favorite.unwrap_or(current.is_favorite),
        })
    }
}

fn parse_method(raw: &str) -> Result<ContactMethod, String> {
    let (kind, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("method `{raw}` must look like TYPE=VALUE"))?;
    Ok(ContactMethod::new(MethodType::from(kind.trim()), value))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = CoreConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if let Err(err) = init_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig, command: Command) -> Result<(), String> {
    let conn = open_db(&config.db_path).map_err(|err| format!("store open failed: {err}"))?;
    let backend =
        SqliteBackend::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let service = ContactService::new(StoredContactRepository::new(backend));

    match command {
        Command::List { favorites, search } => {
            let mode = if favorites {
                FilterMode::Favorites
            } else {
                FilterMode::All
            };
            let state = AppState::new(service.list())
                .with_mode(mode)
                .with_term(search);
            let visible = state.visible();
            if visible.is_empty() {
                println!("No contacts.");
            }
            for contact in &visible {
                print_summary(contact);
            }
        }
        Command::Show { id } => {
            let state = AppState::new(service.list()).with_selection(&ContactId::from(id));
            let contact = state.selected().ok_or("contact not found")?;
            print_detail(contact);
        }
        Command::Add(fields) => {
            let saved = service
                .save_draft(fields.into_draft()?)
                .map_err(|err| err.to_string())?;
            println!("Added {}.", saved.contact.id);
        }
        Command::Edit { id, fields } => {
            let current = service
                .get(&ContactId::from(id))
                .ok_or("contact not found")?;
            let saved = service
                .save_draft(fields.apply_to(current)?)
                .map_err(|err| err.to_string())?;
            print_detail(&saved.contact);
        }
        Command::Delete { id } => {
            let remaining = service
                .delete(&ContactId::from(id))
                .map_err(|err| err.to_string())?;
            println!("Deleted. {} contact(s) left.", remaining.len());
        }
        Command::Favorite { id } => {
            let contact = service
                .toggle_favorite(&ContactId::from(id))
                .map_err(|err| err.to_string())?
                .ok_or("contact not found")?;
            print_summary(&contact);
        }
        Command::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
            let count = service
                .export_to_path(&path)
                .map_err(|err| err.to_string())?;
            println!("Exported {count} contact(s) to {}.", path.display());
        }
        Command::Import { path } => {
            let summary = service
                .import_from_path(&path)
                .map_err(|err| format!("import failed: {err}"))?;
            println!("Imported {} contact(s).", summary.imported);
        }
    }
    Ok(())
}

fn print_summary(contact: &Contact) {
    let star = if contact.is_favorite { "*" } else { " " };
    println!("{star} {}  {}", contact.id, contact.name);
}

fn print_detail(contact: &Contact) {
    print_summary(contact);
    for method in &contact.methods {
        println!("    {}: {}", method.kind.label(), method.value);
    }
    if !contact.note.is_empty() {
        println!("    {}", contact.note);
    }
}
