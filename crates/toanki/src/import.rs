use crate::anki::AnkiClient;
use crate::config::Config;
use crate::prelude::{println, *};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use toanki_core::anki::note_from_card;
use toanki_core::classify::{classify_selection, DecksAndCards};
use toanki_core::root::select_root;

#[derive(Debug, clap::Args, Clone)]
pub struct ImportOptions {
    /// Send one `addNote` request per card instead of a single `addNotes` batch
    #[arg(long)]
    pub one_by_one: bool,
}

/// What an import sent to AnkiConnect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub decks: usize,
    pub notes: usize,
}

/// Load the outline and classify it into decks and cards, without any remote calls
pub fn plan_import(config: &Config) -> Result<DecksAndCards> {
    let document = crate::opml::load_outline_document(&config.input_path)?;
    log::info!("Document title: {}", document.title);

    let selection = select_root(document, &config.specific_path)?;
    let plan = classify_selection(&selection, &config.media_base_url);
    log::info!(
        "Classified {} deck(s) and {} card(s)",
        plan.decks.len(),
        plan.cards.len()
    );
    log::debug!("Decks: {:?}", plan.decks);

    Ok(plan)
}

/// Run the whole import: classify, then create decks, the note template, and the notes
///
/// Stops at the first failing step. Whatever earlier steps created stays in Anki.
pub async fn import_data(
    config: &Config,
    options: &ImportOptions,
    progress: Option<&ProgressBar>,
) -> Result<ImportSummary> {
    log::info!("Starting import...");
    let plan = plan_import(config)?;
    let client = AnkiClient::new(config.anki_connect_host.clone())?;

    log::info!("Creating decks...");
    if let Some(p) = progress {
        p.set_length((plan.decks.len() + plan.cards.len() + 1) as u64);
    }
    client
        .create_decks(&plan.decks, progress)
        .await
        .wrap_err("failed to create decks")?;

    log::info!("Creating note template {}...", config.model_name);
    if let Some(p) = progress {
        p.set_message(f!("Creating note template {}", config.model_name));
        p.inc(1);
    }
    client
        .create_model(&config.model_name)
        .await
        .wrap_err("failed to create note template")?;

    log::info!("Adding notes...");
    let notes: Vec<_> = plan
        .cards
        .iter()
        .map(|card| note_from_card(card, &config.model_name))
        .collect();
    let note_count = notes.len();

    if options.one_by_one {
        for note in notes {
            if let Some(p) = progress {
                p.set_message(f!("Adding note {}", note.fields.front));
                p.inc(1);
            }
            client.add_note(note).await.wrap_err("failed to create notes")?;
        }
    } else {
        if let Some(p) = progress {
            p.set_message(f!("Adding {note_count} notes"));
        }
        client
            .add_notes(notes)
            .await
            .wrap_err("failed to create notes")?;
        if let Some(p) = progress {
            p.inc(note_count as u64);
        }
    }

    log::info!("Import complete.");

    Ok(ImportSummary {
        decks: plan.decks.len(),
        notes: note_count,
    })
}

pub async fn run(options: ImportOptions, global: crate::Global) -> Result<()> {
    let config = Config::load(&global)?;

    if global.verbose {
        println!("Input: {}", config.input_path.display());
        println!("AnkiConnect: {}", config.anki_connect_host);
        println!();
    }

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| eyre!("Invalid progress template: {}", e))?,
    );

    let result = import_data(&config, &options, Some(&progress)).await;
    progress.finish_and_clear();
    let summary = result?;

    println!(
        "{} {} deck(s) and {} note(s) sent to {}",
        "Imported".green().bold(),
        summary.decks.to_string().bright_cyan(),
        summary.notes.to_string().bright_cyan(),
        config.anki_connect_host
    );

    Ok(())
}
