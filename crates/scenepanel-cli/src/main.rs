//! Scenepanel - Boot-time configuration loader
//!
//! Compiles the controller configuration into its runtime model and halts
//! with a diagnostic when the configuration is invalid.

mod report;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scenepanel_core::{FileStorage, Model};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "scenepanel")]
#[command(about = "Compile and inspect scene panel controller configurations")]
#[command(version)]
struct Args {
    /// Path to settings file
    #[arg(short, long, default_value = "scenepanel.toml")]
    settings: PathBuf,

    /// Controller configuration document (overrides the settings file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile the configuration and report whether it is valid
    Check,
    /// Compile the configuration and print a summary
    Show,
    /// Compile the configuration and print the model as JSON
    Dump,
    /// Write a default settings file
    InitSettings {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Command::InitSettings { path } = &args.command {
        settings::save_default_settings(path)?;
        info!(path = %path.display(), "Wrote default settings");
        return Ok(());
    }

    let settings = settings::load_settings(&args.settings)?;
    let config_path = args.config.unwrap_or(settings.source.path);

    let model = match Model::load(&FileStorage, &config_path) {
        Ok(model) => model,
        Err(e) => {
            error!(
                path = %config_path.display(),
                category = e.category(),
                "Configuration rejected: {}", e
            );
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Check => {
            println!(
                "{}: OK ({} groups, {} topics)",
                config_path.display(),
                model.groups.len(),
                model.subscribe_topics().len()
            );
        }
        Command::Show => print!("{}", report::render(&model)?),
        Command::Dump => println!("{}", serde_json::to_string_pretty(&model)?),
        Command::InitSettings { .. } => {}
    }

    Ok(())
}
