//! Command-line front end for voxdeck.
//!
//! Reads a phrase list, synthesizes audio for each front text and adds the
//! notes to Anki through AnkiConnect.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use voxdeck_engine::{
    CardStoreClient, Engine, GoogleTranslateSpeech, PartialConfig, RunConfig, RunReport, StopReason,
    TracingSink,
};

// ============================================================================
// CLI Arguments
// ============================================================================

/// Add audio flashcards to Anki from a delimited phrase list.
#[derive(Parser, Debug)]
#[command(name = "voxdeck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (use multiple times for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create cards for new phrases
    Run(RunArgs),
    /// Check that AnkiConnect is reachable
    Check {
        /// AnkiConnect URL
        #[arg(long, default_value = voxdeck_engine::config::DEFAULT_ANKI_URL)]
        url: String,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Settings file (.json or .toml); without it, built-in defaults apply
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Phrase file, one `front|back` pair per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination deck
    #[arg(long)]
    deck: Option<String>,

    /// Note type for new notes
    #[arg(long)]
    model: Option<String>,

    /// Maximum number of cards to add
    #[arg(short, long)]
    limit: Option<u64>,

    /// Language code for the audio (e.g. es, it, ja)
    #[arg(long)]
    lang: Option<String>,

    /// AnkiConnect URL
    #[arg(long)]
    url: Option<String>,

    /// Separator between front and back
    #[arg(long)]
    separator: Option<String>,

    /// Tag added to every new note
    #[arg(long)]
    tag: Option<String>,
}

impl RunArgs {
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            input_file: self.input.clone(),
            deck_name: self.deck.clone(),
            model_name: self.model.clone(),
            card_limit: self.limit,
            audio_lang: self.lang.clone(),
            anki_url: self.url.clone(),
            separator: self.separator.clone(),
            tag: self.tag.clone(),
            ..Default::default()
        }
    }

    /// Resolve the run configuration from file, defaults and flags.
    fn resolve(&self) -> voxdeck_engine::Result<RunConfig> {
        let base = match &self.config {
            Some(path) => PartialConfig::from_path(path)?,
            None => PartialConfig::defaults(),
        };
        base.overlay(self.overrides()).validate()
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn run(args: RunArgs) -> ExitCode {
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            println!("Total cards added: 0");
            return ExitCode::FAILURE;
        }
    };
    info!(
        input = %config.input_file.display(),
        deck = %config.deck_name,
        model = %config.model_name,
        limit = config.card_limit.get(),
        lang = %config.audio_lang,
        "Configuration loaded"
    );

    match execute(&config).await {
        Ok(report) => {
            println!("Total cards added: {}", report.cards_added);
            if report.stop == StopReason::ConnectionLost {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{}", e);
            println!("Total cards added: 0");
            ExitCode::FAILURE
        }
    }
}

async fn execute(config: &RunConfig) -> voxdeck_engine::Result<RunReport> {
    let engine = Engine::for_config(config)?;
    let speech = GoogleTranslateSpeech::new()?;
    engine.batch(config, &speech, &TracingSink).run().await
}

async fn check(url: String) -> ExitCode {
    let client = match CardStoreClient::builder().url(&url).build() {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.misc().version().await {
        Ok(version) => {
            println!("AnkiConnect v{} is reachable at {}", version, url);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(anki_url = %url, "{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Check { url } => check(url).await,
    }
}
