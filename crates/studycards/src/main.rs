//! `studycards` - CLI for studycards
//!
//! This binary drives the card manager against the configured remote table.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use studycards::cli::{
    AddCommand, CardArg, Cli, Command, ConfigCommand, EditCommand, ListCommand, ListFilter,
    OutputFormat,
};
use studycards::{init_logging, AirtableStore, CardManager, Config, Error, StudyCard};

type Manager = CardManager<AirtableStore>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Add(cmd) => handle_add(&config, cmd).await,
        Command::Edit(cmd) => handle_edit(&config, cmd).await,
        Command::Memorize(arg) => handle_set_memorized(&config, &arg, true).await,
        Command::Unmemorize(arg) => handle_set_memorized(&config, &arg, false).await,
        Command::Toggle(arg) => handle_toggle(&config, &arg).await,
        Command::Delete(arg) => handle_delete(&config, &arg).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_manager(config: &Config) -> anyhow::Result<Manager> {
    let store = AirtableStore::new(&config.remote).context("connecting to the card table")?;
    Ok(CardManager::with_query(store, config.remote.list_query()))
}

/// Open a manager and load the first page of cards. An empty table is fine.
async fn open_loaded(config: &Config) -> anyhow::Result<Manager> {
    let mut manager = open_manager(config)?;
    match manager.load().await {
        Ok(_) | Err(Error::NoRecords) => Ok(manager),
        Err(e) => Err(e).context("loading study cards"),
    }
}

fn find_card(manager: &Manager, arg: &CardArg) -> anyhow::Result<StudyCard> {
    let id = arg.card_id();
    manager
        .cards()
        .get(&id)
        .cloned()
        .ok_or(Error::CardNotFound { id })
        .context("looking up card")
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let manager = open_loaded(config).await?;
    let cards: Vec<&StudyCard> = match cmd.filter() {
        ListFilter::All => manager.cards().cards().iter().collect(),
        ListFilter::Memorized => manager.memorized_cards(),
        ListFilter::Unmemorized => manager.unmemorized_cards(),
    };
    print_cards(&cards, cmd.format)
}

async fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let mut manager = open_manager(config)?;
    manager.form_mut().name = cmd.name;
    manager.form_mut().notes = cmd.notes;

    match manager.save().await.context("saving card")? {
        Some(card) => {
            println!("Saved {}", card.id);
            Ok(())
        }
        None => bail!("name and notes must both be non-empty"),
    }
}

async fn handle_edit(config: &Config, cmd: EditCommand) -> anyhow::Result<()> {
    let mut manager = open_loaded(config).await?;
    let card = find_card(&manager, &CardArg { id: cmd.id })?;

    manager.begin_edit(&card);
    if let Some(name) = cmd.name {
        manager.form_mut().name = name;
    }
    if let Some(notes) = cmd.notes {
        manager.form_mut().notes = notes;
    }

    let updated = manager.update().await.context("updating card")?;
    println!("Updated {}", updated.id);
    Ok(())
}

async fn handle_set_memorized(
    config: &Config,
    arg: &CardArg,
    memorized: bool,
) -> anyhow::Result<()> {
    let mut manager = open_loaded(config).await?;
    let mut card = find_card(&manager, arg)?;
    card.fields.memorized = memorized;

    let updated = manager
        .set_memorized(&card)
        .await
        .context("updating card status")?;
    print_status(&updated);
    Ok(())
}

async fn handle_toggle(config: &Config, arg: &CardArg) -> anyhow::Result<()> {
    let mut manager = open_loaded(config).await?;
    let updated = manager
        .toggle_memorized(&arg.card_id())
        .await
        .context("toggling card status")?;
    print_status(&updated);
    Ok(())
}

async fn handle_delete(config: &Config, arg: &CardArg) -> anyhow::Result<()> {
    let mut manager = open_manager(config)?;
    let id = arg.card_id();
    manager.delete(&id).await.context("deleting card")?;
    println!("Deleted {id}");
    Ok(())
}

fn print_status(card: &StudyCard) {
    let status = if card.is_memorized() {
        "memorized"
    } else {
        "not memorized"
    };
    println!("{} ({}) is {status}", card.fields.name, card.id);
}

fn print_cards(cards: &[&StudyCard], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(cards)?);
        }
        OutputFormat::Plain => {
            for card in cards {
                let mark = if card.is_memorized() { "x" } else { " " };
                println!("[{mark}] {}: {}", card.fields.name, card.fields.notes);
            }
        }
        OutputFormat::Table => {
            if cards.is_empty() {
                println!("No study cards.");
                return Ok(());
            }
            let name_width = cards
                .iter()
                .map(|c| c.fields.name.chars().count())
                .max()
                .unwrap_or(0)
                .max("NAME".len());
            println!("{:<17}  {:<3}  {:<name_width$}  NOTES", "ID", "MEM", "NAME");
            for card in cards {
                let mark = if card.is_memorized() { "yes" } else { "no" };
                println!(
                    "{:<17}  {mark:<3}  {:<name_width$}  {}",
                    card.id.as_str(),
                    card.fields.name,
                    card.fields.notes
                );
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let remote = config.remote.redacted();
            if json {
                println!("{}", serde_json::to_string_pretty(&remote)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Remote]");
                println!("  Base URL:     {}", remote.base_url);
                println!("  Base ID:      {}", remote.base_id);
                println!("  Table:        {}", remote.table);
                println!(
                    "  View:         {}",
                    remote.view.as_deref().unwrap_or("(none)")
                );
                println!(
                    "  API key:      {}",
                    remote.api_key.as_deref().unwrap_or("(not set)")
                );
                println!("  Max records:  {}", remote.max_records);
                println!("  Timeout (s):  {}", remote.timeout_secs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
