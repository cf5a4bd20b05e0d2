//! Command-line interface for studycards.
//!
//! This module provides the CLI structure for the `studycards` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CardArg, ConfigCommand, EditCommand, ListCommand, ListFilter, OutputFormat,
};

/// studycards - Flashcards kept in a hosted table
///
/// Lists, adds, edits, and deletes study cards, and marks them as memorized.
#[derive(Debug, Parser)]
#[command(name = "studycards")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List study cards
    List(ListCommand),

    /// Add a new study card
    Add(AddCommand),

    /// Edit a card's name or notes
    Edit(EditCommand),

    /// Mark a card as memorized
    Memorize(CardArg),

    /// Mark a card as not memorized
    Unmemorize(CardArg),

    /// Flip a card's memorized status
    Toggle(CardArg),

    /// Delete a card
    Delete(CardArg),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
