//! CLI flag definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use plextags_core::{ProgressReporter, SyncOptions, UpdateFlags};
use plextags_plex::{LibrarySection, PlexServer};
use plextags_shared::{
    AppConfig, PlexTagsError, init_config, load_config, load_config_from, resolve_token,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Manage Plex TV show labels and genres.
#[derive(Parser)]
#[command(
    name = "plex-metadata",
    version,
    about = "Manage Plex TV Show labels and genres",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Export TV shows to CSV.
    #[arg(long)]
    pub export: bool,

    /// Output CSV filename for --export (defaults to plex_tv_shows.csv).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Import metadata from CSV file.
    #[arg(long)]
    pub csv_file: Option<PathBuf>,

    /// Update labels from CSV.
    #[arg(long)]
    pub update_labels: bool,

    /// Update genres from CSV.
    #[arg(long)]
    pub update_genres: bool,

    /// Update both labels and genres.
    #[arg(long)]
    pub update_all: bool,

    /// Plex server URL (overrides the config file).
    #[arg(long, env = "PLEX_URL")]
    pub server_url: Option<String>,

    /// Name of the TV show library (overrides the config file).
    #[arg(long, env = "PLEX_LIBRARY")]
    pub library: Option<String>,

    /// Config file to use instead of ~/.plextags/plextags.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Subcommands beside the import/export flags.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

/// What a flag-driven invocation asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Import { csv_file: PathBuf, flags: UpdateFlags },
    Export { output: Option<PathBuf> },
    Help,
}

impl Cli {
    /// Resolve the flag combination. `--csv-file` wins over `--export`;
    /// with no category flag, an import updates both.
    fn action(&self) -> Action {
        if let Some(csv_file) = &self.csv_file {
            let mut flags = UpdateFlags {
                labels: self.update_labels || self.update_all,
                genres: self.update_genres || self.update_all,
            };
            if !flags.any() {
                flags = UpdateFlags::ALL;
            }
            Action::Import {
                csv_file: csv_file.clone(),
                flags,
            }
        } else if self.export {
            Action::Export {
                output: self.output.clone(),
            }
        } else {
            Action::Help
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "plextags=info,plex_metadata=info",
        1 => "plextags=debug,plex_metadata=debug",
        _ => "plextags=trace,plex_metadata=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if let Some(Command::Config { action }) = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&cli).await,
        };
    }

    match cli.action() {
        Action::Help => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
        Action::Import { csv_file, flags } => {
            let config = resolved_config(&cli)?;
            let library = open_library(&config).await?;
            cmd_import(&library, &config, csv_file, flags).await
        }
        Action::Export { output } => {
            let config = resolved_config(&cli)?;
            let library = open_library(&config).await?;
            let output = output.unwrap_or_else(|| PathBuf::from(&config.csv.export_file));
            cmd_export(&library, &output).await
        }
    }
}

/// Load the config file and apply CLI overrides.
fn resolved_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(url) = &cli.server_url {
        config.server.url = url.clone();
    }
    if let Some(library) = &cli.library {
        config.library.name = library.clone();
    }
    Ok(config)
}

/// Connect to the server and look up the configured library section.
async fn open_library(config: &AppConfig) -> Result<LibrarySection> {
    let token = resolve_token(config)?;
    let server = PlexServer::connect(&config.server, &token).await?;
    let section = server
        .section(&config.library.name)
        .await
        .map_err(|e| match e {
            PlexTagsError::LibraryNotFound { .. } => eyre!(
                "{e}\nSet library.name in the config file or pass --library to match one of these."
            ),
            other => other.into(),
        })?;
    info!(library = section.title(), "library ready");
    Ok(section)
}

async fn cmd_import(
    library: &LibrarySection,
    config: &AppConfig,
    csv_file: PathBuf,
    flags: UpdateFlags,
) -> Result<()> {
    let options = SyncOptions {
        csv_file,
        encodings: config.csv.text_encodings()?,
        flags,
    };

    let reporter = CliProgress::new();
    let summary = plextags_core::update_from_csv(library, &options, &reporter).await;
    reporter.clear();
    let summary = summary?;

    println!();
    print!("{}", summary.render());
    Ok(())
}

async fn cmd_export(library: &LibrarySection, output: &Path) -> Result<()> {
    let reporter = CliProgress::new();
    let result = plextags_core::export_to_csv(library, output, &reporter).await;
    reporter.clear();
    let result = result?;

    println!("Exported {} TV shows to {}", result.count, result.path.display());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(cli: &Cli) -> Result<()> {
    let config = resolved_config(cli)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn item(&self, title: &str, current: usize, total: usize) {
        self.spinner.set_message(format!("[{current}/{total}] {title}"));
    }

    fn done(&self) {
        self.spinner.finish_and_clear();
    }
}
