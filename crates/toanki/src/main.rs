#![allow(unused)]

use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod anki;
mod config;
mod error;
mod import;
mod opml;
mod prelude;
mod preview;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Import mind-map OPML exports into Anki through AnkiConnect"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// JSON config file (defaults to ./config.json when present)
    #[clap(long, env = "TOANKI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the OPML export, or the .opml file itself
    #[clap(long, env = "TOANKI_INPUT", global = true)]
    input: Option<String>,

    /// Deck path the exported branch belongs under (e.g. "Study::Biology")
    #[clap(long, env = "TOANKI_SPECIFIC_PATH", global = true)]
    specific_path: Option<String>,

    /// Base URL prepended to every image reference
    #[clap(long, env = "TOANKI_MEDIA_BASE_URL", global = true)]
    media_base_url: Option<String>,

    /// Name of the note template created in Anki
    #[clap(long, env = "TOANKI_MODEL_NAME", global = true)]
    model_name: Option<String>,

    /// AnkiConnect endpoint
    #[clap(long, env = "ANKI_CONNECT_HOST", global = true)]
    anki_host: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "TOANKI_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Create decks, the note template, and notes in Anki
    Import(crate::import::ImportOptions),

    /// Show the decks and cards an import would create, without contacting Anki
    Preview(crate::preview::PreviewOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Import(options) => crate::import::run(options, app.global).await,
        SubCommands::Preview(options) => crate::preview::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
