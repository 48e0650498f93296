//! Guide tools — developer harness for the tool registry.
//!
//! Usage:
//!   guide-tools list                          Print tool descriptors
//!   guide-tools call <name> --args '{...}'    Dispatch one tool call
//!   guide-tools status                        Show configuration
//!   guide-tools init [--force]                Write a default config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use guide_tools::config::{self, KeySource, ToolsConfig};
use guide_tools::tools::ToolRegistry;
use guide_tools::types::ToolRequest;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "guide-tools")]
#[command(version = "0.1.0")]
#[command(about = "Weather and local-time tools for a conversational agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (default: ~/.guide-tools/config.toml).
    #[arg(long)]
    config: Option<String>,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the registered tool descriptors as JSON.
    List,

    /// Dispatch a single tool call and print its result.
    Call {
        /// Tool name, e.g. get_current_time.
        name: String,

        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Show the resolved configuration.
    Status,

    /// Write the current (or default) configuration to the config path.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => PathBuf::from(ToolsConfig::resolve_path(path)),
        None => config::default_home_dir().join("config.toml"),
    };
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Loaded config from {}", config_path.display());

    match cli.command {
        Commands::List => cmd_list(&cfg),
        Commands::Call { name, args } => cmd_call(&cfg, name, &args).await,
        Commands::Status => cmd_status(&cfg, &config_path),
        Commands::Init { force } => cmd_init(&cfg, &config_path, force),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_list(cfg: &ToolsConfig) -> Result<()> {
    let registry = ToolRegistry::with_defaults(cfg)?;
    let functions: Vec<Value> = registry
        .descriptors()
        .iter()
        .map(|d| d.to_function_json())
        .collect();

    println!("{}", serde_json::to_string_pretty(&functions)?);
    Ok(())
}

async fn cmd_call(cfg: &ToolsConfig, name: String, raw_args: &str) -> Result<()> {
    let arguments = match serde_json::from_str::<Value>(raw_args)
        .context("Failed to parse --args as JSON")?
    {
        Value::Object(map) => map,
        other => bail!("--args must be a JSON object, got: {}", other),
    };

    let registry = ToolRegistry::with_defaults(cfg)?;
    let result = registry.dispatch(&ToolRequest::new(name, arguments)).await;

    let rendered = serde_json::to_string_pretty(&result)?;
    if result.is_ok() {
        println!("{}", rendered);
    } else {
        println!("{}", rendered.red());
    }
    Ok(())
}

fn cmd_init(cfg: &ToolsConfig, config_path: &std::path::Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    config::save_config(cfg, config_path)?;
    println!(
        "{} Wrote config to {}",
        ">>>".green().bold(),
        config_path.display()
    );
    Ok(())
}

fn cmd_status(cfg: &ToolsConfig, config_path: &std::path::Path) -> Result<()> {
    let key_present = KeySource::from(cfg).is_present();

    println!();
    println!("{}", "=== Guide Tools Status ===".bold());
    println!();
    println!(
        "  {}:   {}{}",
        "Config".bold(),
        config_path.display(),
        if config_path.exists() { "" } else { " (defaults)" }
    );
    println!();
    println!("  {}:", "Weather".bold());
    println!("    Endpoint: {}", cfg.weather_api_url);
    println!("    Timeout:  {}s", cfg.weather_timeout_secs);
    println!("    Units:    {}", cfg.default_units);
    println!(
        "    API key:  {} ({})",
        cfg.api_key_env,
        if key_present {
            "set".green().to_string()
        } else {
            "missing".red().to_string()
        }
    );
    println!();
    println!("  {}:", "Time".bold());
    println!("    Default:  {}", cfg.default_timezone);
    println!();

    Ok(())
}
