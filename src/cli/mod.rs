// ABOUTME: CLI definition and non-TUI subcommands
// parse: run the AI assist backend from the terminal
// draft: show saved-draft status, reset: discard the saved draft

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::assist::{coerce_fields, AssistClient};
use crate::config::AppConfig;
use crate::draft::{DraftStore, FileStorage};

#[derive(Parser)]
#[command(
    name = "quoteflow",
    version,
    about = "Terminal wizard for requesting interpretation service quotes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive wizard (default)
    Tui,
    /// Parse free text with the AI assist backend and print the fields
    Parse {
        /// The appointment details to parse
        text: String,
    },
    /// Show whether a saved draft exists
    Draft,
    /// Discard the saved draft
    Reset,
}

fn open_store(config: &AppConfig) -> Result<DraftStore> {
    let path = config.draft_storage_path()?;
    Ok(DraftStore::new(Box::new(FileStorage::open(path))))
}

pub async fn parse(config: &AppConfig, text: &str) -> Result<()> {
    let client = AssistClient::new(&config.assist)?;
    let result = client.parse(text).await;

    if !result.success {
        eprintln!(
            "Parse failed: {}",
            result.first_error().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    let assignments = coerce_fields(&result.fields);
    if assignments.is_empty() {
        println!("No recognizable fields in that text.");
        return Ok(());
    }
    for (field, value) in assignments {
        println!("{:<24} {}", field.wire_name(), value.display());
    }
    Ok(())
}

pub fn draft_status(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    match store.load() {
        Some(snapshot) => {
            let saved_at = DateTime::<Utc>::from_timestamp_millis(snapshot.updated_at)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| snapshot.updated_at.to_string());
            println!("Draft saved {} (page {} of 4)", saved_at, snapshot.current_page);
            if !snapshot.values.org_name.is_empty() {
                println!("Organization: {}", snapshot.values.org_name);
            }
        }
        None => println!("No saved draft."),
    }
    Ok(())
}

pub fn reset(config: &AppConfig) -> Result<()> {
    let mut store = open_store(config)?;
    if store.has_draft() {
        store.clear();
        println!("Saved draft discarded.");
    } else {
        println!("No saved draft to discard.");
    }
    Ok(())
}
