//! Contact book CLI.
//!
//! Every command opens the configured contact file, drives the same session
//! actions the web form uses, and prints the resulting list as
//! `row: name - phone - email`. Rows are 0-based positions in the printed
//! list; `edit` and `delete` accept `--search` so a row can refer to a
//! filtered list.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use contactbook::contact::ContactFields;
use contactbook::core::notice::NoticeKind;
use contactbook::core::session::{Event, Session};
use contactbook::dispatch::{Outcome, dispatch, open_session};
use contactbook::exit_codes;
use contactbook::io::codec::FileFormat;
use contactbook::io::config::{DEFAULT_CONFIG_FILE, load_config};
use contactbook::io::store::ContactFile;
use contactbook::logging;

#[derive(Parser)]
#[command(name = "contactbook", version, about = "Manage a small contact book")]
struct Cli {
    /// Config file (TOML).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Contacts file, overriding the config.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Contacts file format, overriding the config.
    #[arg(long, global = true, value_enum)]
    format: Option<FileFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every contact in store order.
    List,
    /// Append a contact.
    Add(FieldArgs),
    /// Print contacts whose name (any case) or phone contains TERM.
    Search {
        #[arg(default_value = "")]
        term: String,
    },
    /// Overwrite the contact at ROW with new fields.
    Edit {
        #[command(flatten)]
        target: RowArgs,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Remove the contact at ROW.
    Delete {
        #[command(flatten)]
        target: RowArgs,
    },
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    email: String,
}

impl From<FieldArgs> for ContactFields {
    fn from(args: FieldArgs) -> Self {
        ContactFields::new(args.name, args.phone, args.email)
    }
}

#[derive(Args)]
struct RowArgs {
    /// Row in the listed (or searched) contacts, starting at 0.
    #[arg(long)]
    row: Option<usize>,
    /// Resolve ROW against the results of this search instead of the full list.
    #[arg(long)]
    search: Option<String>,
}

fn main() {
    logging::init(logging::CLI_FILTER);
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?.with_overrides(cli.file, cli.format);
    let (mut session, file) = open_session(&config)?;

    let outcome = match cli.command {
        Command::List => Outcome::default(),
        Command::Add(fields) => dispatch(&mut session, &file, Event::Add(fields.into()))?,
        Command::Search { term } => dispatch(&mut session, &file, Event::Search(term))?,
        Command::Edit { target, fields } => {
            select_row(&mut session, &file, target)?;
            dispatch(&mut session, &file, Event::Edit(fields.into()))?
        }
        Command::Delete { target } => {
            select_row(&mut session, &file, target)?;
            dispatch(&mut session, &file, Event::Delete)?
        }
    };

    if let Some(notice) = outcome.notice() {
        eprintln!("{}: {}", notice.title, notice.message);
        return Ok(match notice.kind {
            NoticeKind::InputError => exit_codes::INPUT_ERROR,
            NoticeKind::SelectionError => exit_codes::SELECTION_ERROR,
        });
    }

    print_view(&session);
    Ok(exit_codes::OK)
}

fn select_row(session: &mut Session, file: &ContactFile, target: RowArgs) -> Result<()> {
    if let Some(term) = target.search {
        dispatch(session, file, Event::Search(term))?;
    }
    if let Some(row) = target.row {
        dispatch(session, file, Event::Select(row))?;
    }
    Ok(())
}

fn print_view(session: &Session) {
    for (row, (_, contact)) in session.visible().into_iter().enumerate() {
        println!("{}: {}", row, contact);
    }
}
