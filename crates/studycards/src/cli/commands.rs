//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::card::CardId;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show memorized cards
    #[arg(long, conflicts_with = "unmemorized")]
    pub memorized: bool,

    /// Only show cards not memorized yet
    #[arg(long)]
    pub unmemorized: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Which part of the list to show.
    #[must_use]
    pub fn filter(&self) -> ListFilter {
        if self.memorized {
            ListFilter::Memorized
        } else if self.unmemorized {
            ListFilter::Unmemorized
        } else {
            ListFilter::All
        }
    }
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Front of the card
    pub name: String,

    /// Back of the card
    pub notes: String,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Identifier of the card to edit
    pub id: String,

    /// New name (keeps the current one if omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// New notes (keeps the current ones if omitted)
    #[arg(short = 't', long)]
    pub notes: Option<String>,
}

/// Arguments for commands that target one card.
#[derive(Debug, Args)]
pub struct CardArg {
    /// Identifier of the card
    pub id: String,
}

impl CardArg {
    /// The identifier as a `CardId`.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        CardId::new(self.id.clone())
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Part of the card list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    /// Every card
    #[default]
    All,
    /// Memorized cards only
    Memorized,
    /// Unmemorized cards only
    Unmemorized,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_list_filter() {
        let mut cmd = ListCommand {
            memorized: false,
            unmemorized: false,
            format: OutputFormat::Table,
        };
        assert_eq!(cmd.filter(), ListFilter::All);

        cmd.unmemorized = true;
        assert_eq!(cmd.filter(), ListFilter::Unmemorized);

        cmd.unmemorized = false;
        cmd.memorized = true;
        assert_eq!(cmd.filter(), ListFilter::Memorized);
    }

    #[test]
    fn test_card_arg_id() {
        let arg = CardArg {
            id: "recABC".to_string(),
        };
        assert_eq!(arg.card_id(), CardId::from("recABC"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
