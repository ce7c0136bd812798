//! Config command - manage configuration

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use daily_quote::config::{Config, KEYS};

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the config file path
    Path,
}

/// `config` is the effective configuration (file plus overrides); `set`
/// edits the file itself so overrides are never written back.
pub fn run(args: Args, config: Config) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(&config),
        Some(ConfigCommand::Get { key }) => get_config(&config, &key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
        Some(ConfigCommand::Path) => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn show_config(config: &Config) -> Result<()> {
    println!("{}", "Daily Quote Configuration".bold());
    println!();

    println!("  {}  {}", "Config file:".dimmed(), Config::config_path()?.display());
    println!("  {}  {}", "Data dir:".dimmed(), Config::data_dir()?.display());
    println!();

    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("  {:20} {}", format!("{key}:").dimmed(), value);
    }

    Ok(())
}

fn get_config(config: &Config, key: &str) -> Result<()> {
    match config.get(key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("Unknown config key '{key}'. Valid keys: {}", KEYS.join(", ")),
    }
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(&Config::config_path()?)?;
    config.set(key, value)?;
    config.save()?;

    println!("{} {} = {}", "Set".green(), key, value);
    Ok(())
}
