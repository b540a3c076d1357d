mod config_cmd;
mod doctor_cmd;
mod notice;
mod run_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tessnote_config::{config_dir, config_file_path, load_config};

#[derive(Parser)]
#[command(name = "tessnote")]
#[command(about = "Tessnote — OCR annotations for image embeds in your notes")]
#[command(version)]
struct Cli {
    /// Root directory of the note vault
    #[arg(short, long, default_value = ".", global = true)]
    vault: PathBuf,

    /// Log at debug level regardless of the persisted setting
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate every unannotated image embed in the vault
    Run,
    /// Check the configuration and the OCR engine installation
    Doctor,
    /// Show or edit the persisted configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as YAML
    Show,
    /// Print the config file path
    Path,
    /// Set one key, e.g. `tessnote config set tesseractLanguage eng+fra`
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The persisted debug flag raises verbosity too; RUST_LOG wins over both.
    let config = load_config(&config_file_path(&config_dir()))
        .await
        .unwrap_or_default();
    let level = if cli.debug || config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run => run_cmd::run(cli.vault).await,
        Commands::Doctor => doctor_cmd::run().await,
        Commands::Config { action } => match action {
            ConfigAction::Show => config_cmd::show().await,
            ConfigAction::Path => config_cmd::path(),
            ConfigAction::Set { key, value } => config_cmd::set(&key, &value).await,
        },
    };

    if let Err(err) = result {
        notice::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
