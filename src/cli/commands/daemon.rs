//! Daemon management commands.
//!
//! Provides CLI commands for starting, stopping, and monitoring the
//! background daemon that delivers the daily quote on a schedule.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::process::Command;

use daily_quote::config::Config;

use crate::daemon::{DaemonState, Schedule};

/// Daemon management subcommands.
#[derive(Subcommand)]
pub enum DaemonSubcommand {
    /// Start the background daemon.
    Start {
        /// Run in foreground (don't daemonize).
        #[arg(long)]
        foreground: bool,
    },

    /// Stop the running daemon.
    Stop,

    /// Show daemon status.
    Status,

    /// Show daemon logs.
    Logs {
        /// Number of lines to show.
        #[arg(short = 'n', long, default_value = "20")]
        lines: usize,

        /// Follow log output (like tail -f).
        #[arg(short, long)]
        follow: bool,
    },
}

/// Arguments for the daemon command.
#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: DaemonSubcommand,
}

impl Args {
    /// True when this invocation runs the daemon loop in-process.
    pub fn runs_daemon(&self) -> bool {
        matches!(self.command, DaemonSubcommand::Start { foreground: true })
    }
}

/// Executes the daemon command.
pub fn run(args: Args, config: Config, verbose: bool) -> Result<()> {
    match args.command {
        DaemonSubcommand::Start { foreground } => run_start(foreground, config, verbose),
        DaemonSubcommand::Stop => run_stop(),
        DaemonSubcommand::Status => run_status(&config),
        DaemonSubcommand::Logs { lines, follow } => run_logs(lines, follow),
    }
}

/// Starts the daemon.
fn run_start(foreground: bool, config: Config, verbose: bool) -> Result<()> {
    let state = DaemonState::new()?;

    if state.is_running() {
        let pid = state.get_pid().unwrap_or(0);
        println!(
            "{} Daemon is already running (PID {})",
            "Warning:".yellow(),
            pid
        );
        return Ok(());
    }

    // Fail early on a bad schedule rather than in the detached child
    let schedule = Schedule::from_config(&config)?;

    if foreground {
        println!("{}", format!("Starting daemon in foreground, delivering {schedule}...").green());
        println!("{}", "Press Ctrl+C to stop".dimmed());
        println!();

        let rt = tokio::runtime::Runtime::new()
            .context("Failed to create tokio runtime")?;

        rt.block_on(crate::daemon::run_daemon(config, verbose))?;
    } else {
        println!("{}", "Starting daemon in background...".green());

        let current_exe = std::env::current_exe()
            .context("Failed to get current executable path")?;

        // The child re-reads the config; pass the corpus along in case it
        // came from --corpus
        let mut command = Command::new(&current_exe);
        command
            .arg("--corpus")
            .arg(&config.corpus_path)
            .arg("daemon")
            .arg("start")
            .arg("--foreground");
        if verbose {
            command.arg("--verbose");
        }

        let child = command
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("Failed to spawn daemon process")?;

        println!(
            "{} Daemon started with PID {}, delivering {}",
            "Success:".green(),
            child.id(),
            schedule
        );
        println!(
            "{}",
            format!("Logs available at: {:?}", state.log_file).dimmed()
        );
    }

    Ok(())
}

/// Stops the running daemon.
fn run_stop() -> Result<()> {
    let state = DaemonState::new()?;

    if !state.is_running() {
        println!("{}", "Daemon is not running".yellow());
        return Ok(());
    }

    let pid = state.get_pid().unwrap_or(0);
    println!("Stopping daemon (PID {pid})...");
    kill_process(pid)?;

    for i in 0..30 {
        std::thread::sleep(std::time::Duration::from_millis(100));
        if !state.is_running() {
            let _ = state.cleanup();
            println!("{}", "Daemon stopped".green());
            return Ok(());
        }
        if i == 10 {
            println!("{}", "Waiting for daemon to stop...".dimmed());
        }
    }

    println!("{}", "Warning: Daemon may still be running".yellow());
    Ok(())
}

/// Sends SIGTERM to a process.
fn kill_process(pid: u32) -> Result<()> {
    #[cfg(unix)]
    {
        // SAFETY: sending SIGTERM has no memory-safety requirements.
        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if rc != 0 {
            return Err(std::io::Error::last_os_error())
                .with_context(|| format!("Failed to signal PID {pid}"));
        }
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        anyhow::bail!("Stopping the daemon is not supported on this platform");
    }

    Ok(())
}

/// Shows the daemon status.
fn run_status(config: &Config) -> Result<()> {
    let state = DaemonState::new()?;

    if !state.is_running() {
        println!("{}", "Daemon is not running".yellow());
        return Ok(());
    }

    println!("{}", "Daemon Status".green().bold());
    println!();
    println!("  {} {}", "Status:".dimmed(), "running".green());
    println!("  {} {}", "PID:".dimmed(), state.get_pid().unwrap_or(0));
    match Schedule::from_config(config) {
        Ok(schedule) => println!("  {} {}", "Schedule:".dimmed(), schedule),
        Err(e) => println!("  {} {}", "Schedule:".dimmed(), e.to_string().red()),
    }
    println!("  {} {:?}", "Log file:".dimmed(), state.log_file);

    Ok(())
}

/// Shows daemon logs.
fn run_logs(lines: usize, follow: bool) -> Result<()> {
    let state = DaemonState::new()?;

    if !state.log_file.exists() {
        println!("{}", "No log file found".yellow());
        println!(
            "{}",
            format!("Expected at: {:?}", state.log_file).dimmed()
        );
        return Ok(());
    }

    if follow {
        // Follow mode - continuously read new lines
        println!("{}", format!("Following {:?}...", state.log_file).dimmed());
        println!("{}", "Press Ctrl+C to stop".dimmed());
        println!();

        let file = File::open(&state.log_file)
            .context("Failed to open log file")?;
        let mut reader = BufReader::new(file);

        // Seek to end
        reader.seek(SeekFrom::End(0))?;

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => {
                    // No new data, sleep briefly
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
                Ok(_) => {
                    print!("{line}");
                }
                Err(e) => {
                    tracing::debug!("Error reading log: {}", e);
                    break;
                }
            }
        }
    } else {
        // Show last N lines
        let file = File::open(&state.log_file)
            .context("Failed to open log file")?;
        let reader = BufReader::new(file);

        let all_lines: Vec<String> = reader
            .lines()
            .map_while(Result::ok)
            .collect();

        for line in &all_lines[all_lines.len().saturating_sub(lines)..] {
            println!("{line}");
        }
    }

    Ok(())
}
