//! Command-line interface.
//!
//! Without a subcommand the TUI starts. The other commands run one action
//! against the local data and print its outcome.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use tracing::info;

use crate::actions::{import_csv, register_agent, submit_question, update_entity, ActionResponse};
use crate::config::Settings;
use crate::domain::{
    AgentRegistrationForm, Inquiry, MailTemplate, Property, QuestionForm, Realtor,
};
use crate::store::{default_data_dir, default_export_dir, Repository, Stores};
use crate::table::csv::write_csv;
use crate::table::TableRecord;

#[derive(Debug, Parser)]
#[command(name = "realtydesk", version)]
#[command(about = "Terminal admin dashboard for real-estate listings")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the local table data.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Table names as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableName {
    Properties,
    Realtors,
    Inquiries,
    #[value(name = "mail_templates", alias = "mail-templates")]
    MailTemplates,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the dashboard (default).
    Tui,

    /// Write rows of a table to a CSV file.
    Export {
        table: TableName,
        /// Only these row ids (all rows when omitted).
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
        /// Output directory.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Open the file once written.
        #[arg(long)]
        open: bool,
    },

    /// Check a CSV file against a table's export format.
    Import { table: TableName, file: PathBuf },

    /// Drop local edits of a table and its column layout.
    Reset { table: TableName },

    /// Change the status or price of a listing.
    UpdateProperty {
        id: String,
        /// New status (Draft, Active, Pending, Sold).
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        price: Option<u64>,
    },

    /// Submit a question as a site visitor.
    Ask {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Listing the question is about.
        #[arg(long)]
        property: Option<String>,
        #[arg(long)]
        message: String,
    },

    /// Register a new agent awaiting approval.
    RegisterAgent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        agency: String,
        #[arg(long)]
        license_no: String,
        #[arg(long, default_value = "")]
        bio: String,
    },
}

/// Data directory: the flag, then the setting, then the platform default.
pub fn resolve_data_dir(flag: Option<&Path>, settings: &Settings) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag.map(Path::to_path_buf).or_else(|| settings.data_dir.clone()) {
        return Ok(dir);
    }
    Ok(default_data_dir()?)
}

fn report<T>(response: &ActionResponse<T>) -> anyhow::Result<()> {
    if response.success {
        println!("{}", response.message);
        return Ok(());
    }
    for error in &response.errors {
        eprintln!("  {}", error);
    }
    bail!("{}", response.message)
}

fn export_table<R: TableRecord>(
    repo: &dyn Repository<R>,
    ids: &[String],
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let rows = repo.load()?;
    let chosen: Vec<&R> = rows
        .iter()
        .filter(|r| ids.is_empty() || ids.iter().any(|id| id == r.id()))
        .collect();
    if chosen.is_empty() {
        bail!("No {} rows to export", R::TABLE);
    }
    let path = write_csv(dir, R::TABLE, &chosen)
        .with_context(|| format!("writing export to {}", dir.display()))?;
    println!("Exported {} rows to {}", chosen.len(), path.display());
    Ok(path)
}

fn reset_table<R: TableRecord>(repo: &dyn Repository<R>, stores: &Stores) -> anyhow::Result<()> {
    repo.clear()?;
    stores.layouts.clear(R::TABLE)?;
    info!(table = R::TABLE, "Table reset");
    println!("Reset {}", R::TABLE);
    Ok(())
}

async fn import_table<R: TableRecord>(file: &Path, delay: Duration) -> anyhow::Result<()> {
    report(&import_csv::<R>(file, delay).await)
}

/// Run a non-interactive command.
pub async fn run(command: Command, settings: &Settings, data_dir: &Path) -> anyhow::Result<()> {
    let stores = Stores::local(data_dir);

    match command {
        Command::Tui => bail!("the dashboard is started by the binary"),
        Command::Export {
            table,
            ids,
            out,
            open,
        } => {
            let dir = out
                .or_else(|| settings.export_dir.clone())
                .unwrap_or_else(|| default_export_dir(data_dir));
            let path = match table {
                TableName::Properties => export_table(&*stores.properties, &ids, &dir)?,
                TableName::Realtors => export_table(&*stores.realtors, &ids, &dir)?,
                TableName::Inquiries => export_table(&*stores.inquiries, &ids, &dir)?,
                TableName::MailTemplates => export_table(&*stores.mail_templates, &ids, &dir)?,
            };
            if open {
                open::that(&path).with_context(|| format!("opening {}", path.display()))?;
            }
            Ok(())
        }
        Command::Import { table, file } => {
            let delay = Duration::from_millis(settings.import_delay_ms);
            match table {
                TableName::Properties => import_table::<Property>(&file, delay).await,
                TableName::Realtors => import_table::<Realtor>(&file, delay).await,
                TableName::Inquiries => import_table::<Inquiry>(&file, delay).await,
                TableName::MailTemplates => import_table::<MailTemplate>(&file, delay).await,
            }
        }
        Command::Reset { table } => match table {
            TableName::Properties => reset_table(&*stores.properties, &stores),
            TableName::Realtors => reset_table(&*stores.realtors, &stores),
            TableName::Inquiries => reset_table(&*stores.inquiries, &stores),
            TableName::MailTemplates => reset_table(&*stores.mail_templates, &stores),
        },
        Command::UpdateProperty { id, status, price } => {
            let mut patch = Map::new();
            if let Some(status) = status {
                patch.insert("status".to_string(), Value::String(status));
            }
            if let Some(price) = price {
                patch.insert("price".to_string(), Value::from(price));
            }
            if patch.is_empty() {
                bail!("Nothing to update; pass --status or --price");
            }
            report(&update_entity(&*stores.properties, &id, patch))
        }
        Command::Ask {
            name,
            email,
            phone,
            property,
            message,
        } => {
            let form = QuestionForm {
                name,
                email,
                phone,
                property_id: property,
                message,
            };
            report(&submit_question(&*stores.inquiries, form))
        }
        Command::RegisterAgent {
            name,
            email,
            phone,
            agency,
            license_no,
            bio,
        } => {
            let form = AgentRegistrationForm {
                name,
                email,
                phone,
                agency,
                license_no,
                bio,
            };
            report(&register_agent(&*stores.realtors, form))
        }
    }
}
