//! Background daemon that delivers the daily quote on a schedule.
//!
//! On start the daemon delivers today's quote right away, then sleeps
//! until the next trigger of its [`Schedule`] and delivers again. Each
//! delivery re-reads the corpus, so edits to the file are picked up
//! without a restart. Because the daily pick is persisted, repeated
//! deliveries on the same day show the same quote.
//!
//! The daemon is typically started via `dailyquote daemon start` and
//! stopped via `dailyquote daemon stop`.

pub mod schedule;
pub mod state;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;

use daily_quote::config::Config;
use daily_quote::notify::{notifier, TITLE};
use daily_quote::storage::{load_collection, open_selector};

pub use schedule::Schedule;
pub use state::DaemonState;

/// Runs the daemon in the foreground until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if another instance is already running, the schedule
/// in the config is invalid, or the PID file cannot be written. Errors
/// during a single delivery are logged and do not stop the daemon.
pub async fn run_daemon(config: Config, verbose: bool) -> Result<()> {
    let state = DaemonState::new()?;

    if state.is_running() {
        anyhow::bail!(
            "Daemon is already running (PID {})",
            state.get_pid().unwrap_or(0)
        );
    }

    let _guard = setup_logging(&state, verbose)?;

    let schedule = Schedule::from_config(&config)?;
    tracing::info!("Starting daily-quote daemon, delivering {}", schedule);

    let pid = std::process::id();
    state.write_pid(pid)?;
    tracing::info!("Daemon started with PID {}", pid);

    deliver_in_background(&config).await;

    loop {
        let now = chrono::Local::now().naive_local();
        let Some(next) = schedule.next_fire(now) else {
            tracing::error!("No delivery time after {}, stopping", now);
            break;
        };
        let wait = (next - now).to_std().unwrap_or_default();
        tracing::info!("Next quote at {}", next.format("%Y-%m-%d %H:%M"));

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                deliver_in_background(&config).await;
            }
            _ = shutdown_signal() => {
                tracing::info!("Received shutdown signal, shutting down...");
                break;
            }
        }
    }

    state.cleanup()?;
    tracing::info!("Daemon stopped");

    Ok(())
}

/// Delivers today's quote through the configured notifier.
pub fn deliver(config: &Config) -> Result<()> {
    let collection = load_collection(config)?;
    if let Some(divergence) = collection.divergence {
        tracing::warn!("{}", divergence);
    }

    let mut selector = open_selector()?;
    let quote = selector.get_daily_quote(&collection.quotes)?;

    notifier(config.notifications).notify(
        TITLE,
        &quote.truncated(config.max_message_chars),
        &quote.origin,
    )
}

/// Runs [`deliver`] off the async runtime and logs any failure.
async fn deliver_in_background(config: &Config) {
    let config = config.clone();
    match tokio::task::spawn_blocking(move || deliver(&config)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Quote delivery failed: {:#}", e),
        Err(e) => tracing::error!("Quote delivery task panicked: {}", e),
    }
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Sets up logging for the daemon.
///
/// Logs go to `<data dir>/daemon.log` and to stderr. Returns a guard that
/// must be kept alive for the duration of the daemon.
fn setup_logging(state: &DaemonState, verbose: bool) -> Result<WorkerGuard> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = state
        .log_file
        .parent()
        .context("Log file has no parent directory")?;
    let file_appender = tracing_appender::rolling::never(
        log_dir,
        state.log_file.file_name().unwrap_or_default(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    // try_init: tests and embedders may already have a subscriber
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| crate::log_filter(verbose).into()),
        )
        .with(file_layer)
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init();

    Ok(guard)
}
