use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use reverie_core::session::ReflectionMode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod app;
mod commands;

use app::App;

const DEFAULT_LOG_FILTER: &str = "warn,reverie=info";

#[derive(Parser)]
#[command(name = "reverie")]
#[command(about = "Reverie - themed photo postcards with short poems", long_about = None)]
struct Cli {
    /// Directory holding config.toml and preferences.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available themes, favorites first
    Themes,
    /// Toggle a theme's favorite status
    Favorite { id: String },
    /// Unlock a secret theme
    Unlock { code: String },
    /// Show or set the reflection mode (full | visual)
    Mode { mode: Option<ReflectionMode> },
    /// Design a custom theme from a description
    CreateTheme {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Show or initialize the studio configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Turn a photo into a postcard with the offline studio
    Run(commands::run::RunArgs),
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file if none exists
    Init,
}

fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "reverie.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!("failed to initialise tracing: {err}"))?;
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keeps the file writer flushing until exit
    let _guard = init_logging(cli.log_dir.as_deref())?;

    let app = App::bootstrap(cli.config_dir.as_deref()).await?;

    match cli.command {
        Commands::Themes => commands::themes::list(&app),
        Commands::Favorite { id } => commands::themes::favorite(&app, &id).await?,
        Commands::Unlock { code } => commands::themes::unlock(&app, &code).await?,
        Commands::Mode { mode } => commands::mode::run(&app, mode).await?,
        Commands::CreateTheme { prompt } => {
            commands::themes::create(&app, &prompt.join(" ")).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&app)?,
            ConfigAction::Init => commands::config::init(&app)?,
        },
        Commands::Run(args) => commands::run::run(&app, args).await?,
    }

    Ok(())
}
