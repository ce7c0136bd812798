use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod daemon;

use cli::commands;
use daily_quote::config::Config;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "dailyquote")]
#[command(version)]
#[command(about = "A quote of the day from a plain-text corpus")]
#[command(long_about = "Shows one quote per day picked from a plain-text corpus of dated\n\
    quotes. The same quote is shown for the whole day, and a background\n\
    daemon can deliver it as a desktop notification on a schedule.")]
#[command(after_help = "EXAMPLES:\n    \
    dailyquote today                Show today's quote\n    \
    dailyquote today --notify       Show it as a notification too\n    \
    dailyquote random               Show a random quote\n    \
    dailyquote list --year 2024     List quotes from 2024\n    \
    dailyquote sync                 Check the corpus for added or removed quotes\n    \
    dailyquote daemon start         Start the background scheduler\n\n\
    For more information about a command, run 'dailyquote <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read quotes from this corpus file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    corpus: Option<String>,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show today's quote (the same all day)
    #[command(long_about = "Shows the quote of the day. The first call on a new day picks a\n\
        quote and remembers it; every later call that day shows the same one.")]
    Today(commands::today::Args),

    /// Show a random quote
    #[command(long_about = "Shows a uniformly random quote. Does not affect the quote of the day.")]
    Random(commands::random::Args),

    /// List all quotes in the corpus
    List(commands::list::Args),

    /// Re-read the corpus and report added or removed quotes
    #[command(long_about = "Parses the corpus, compares it with the stored snapshot, and\n\
        rewrites the snapshot. Reports when the number of quotes changed.")]
    Sync(commands::sync::Args),

    /// Show corpus, snapshot, and daemon status
    Status,

    /// Send today's quote as a desktop notification
    Notify,

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.dailyquote/config.yaml.")]
    Config(commands::config::Args),

    /// Manage the background scheduler daemon
    Daemon(commands::daemon::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

impl Commands {
    /// The foreground daemon installs its own subscriber with a file layer.
    fn manages_own_logging(&self) -> bool {
        matches!(self, Commands::Daemon(args) if args.runs_daemon())
    }
}

/// Default tracing filter for the library and the binary.
pub fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "daily_quote=debug,dailyquote=debug"
    } else {
        "daily_quote=info,dailyquote=info"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.command.manages_own_logging() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| log_filter(cli.verbose).into()),
            )
            .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
            .init();
    }

    if let Commands::Completions(args) = &cli.command {
        commands::completions::generate_completions(&mut Cli::command(), args.shell);
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(corpus) = cli.corpus {
        config.corpus_path = corpus;
    }

    match cli.command {
        Commands::Today(args) => commands::today::run(args, &config),
        Commands::Random(args) => commands::random::run(args, &config),
        Commands::List(args) => commands::list::run(args, &config),
        Commands::Sync(args) => commands::sync::run(args, &config),
        Commands::Status => commands::status::run(&config),
        Commands::Notify => commands::notify::run(&config),
        Commands::Config(args) => commands::config::run(args, config),
        Commands::Daemon(args) => commands::daemon::run(args, config, cli.verbose),
        Commands::Completions(_) => Ok(()),
    }
}
