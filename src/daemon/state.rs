//! Daemon state management.
//!
//! Tracks the PID file and log file the scheduler daemon uses, so CLI
//! commands can tell whether it is running and where it logs.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use daily_quote::config::Config;

/// Paths shared between the running daemon and the CLI.
pub struct DaemonState {
    /// Path to the PID file (`<data dir>/daemon.pid`).
    pub pid_file: PathBuf,
    /// Path to the log file (`<data dir>/daemon.log`).
    pub log_file: PathBuf,
}

impl DaemonState {
    /// Creates a DaemonState with paths in the data directory.
    ///
    /// Creates the data directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or
    /// created.
    pub fn new() -> Result<Self> {
        let data_dir = Config::data_dir()?;

        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {data_dir:?}"))?;

        Ok(Self {
            pid_file: data_dir.join("daemon.pid"),
            log_file: data_dir.join("daemon.log"),
        })
    }

    /// Checks if the daemon is currently running.
    ///
    /// True only if the PID file exists and names a live process.
    pub fn is_running(&self) -> bool {
        match self.get_pid() {
            Some(pid) => Self::process_exists(pid),
            None => false,
        }
    }

    /// Gets the PID of the running daemon, if available.
    pub fn get_pid(&self) -> Option<u32> {
        let contents = fs::read_to_string(&self.pid_file).ok()?;
        contents.trim().parse().ok()
    }

    /// Writes the current process ID to the PID file.
    pub fn write_pid(&self, pid: u32) -> Result<()> {
        let mut file = fs::File::create(&self.pid_file)
            .context("Failed to create PID file")?;
        write!(file, "{pid}")
            .context("Failed to write PID")?;
        Ok(())
    }

    /// Removes the PID file. A missing file is not an error.
    pub fn cleanup(&self) -> Result<()> {
        if self.pid_file.exists() {
            fs::remove_file(&self.pid_file)
                .context("Failed to remove PID file")?;
        }
        Ok(())
    }

    /// Checks if a process with the given PID exists.
    fn process_exists(pid: u32) -> bool {
        #[cfg(unix)]
        {
            // SAFETY: kill(pid, 0) only checks that the process exists;
            // no signal is delivered.
            unsafe {
                libc::kill(pid as libc::pid_t, 0) == 0
            }
        }

        #[cfg(not(unix))]
        {
            let _ = pid;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Creates a DaemonState with paths in a temporary directory.
    fn create_test_state() -> (DaemonState, tempfile::TempDir) {
        let dir = tempdir().expect("Failed to create temp directory");
        let state = DaemonState {
            pid_file: dir.path().join("daemon.pid"),
            log_file: dir.path().join("daemon.log"),
        };
        (state, dir)
    }

    #[test]
    fn test_is_running_no_pid_file() {
        let (state, _dir) = create_test_state();
        assert!(!state.is_running(), "Should not be running without PID file");
    }

    #[test]
    fn test_write_and_get_pid() {
        let (state, _dir) = create_test_state();

        state.write_pid(12345).expect("Failed to write PID");

        assert_eq!(state.get_pid(), Some(12345), "PID should match written value");
    }

    #[test]
    fn test_own_pid_is_running() {
        let (state, _dir) = create_test_state();

        state.write_pid(std::process::id()).expect("Failed to write PID");

        assert!(state.is_running(), "The test process itself is alive");
    }

    #[test]
    fn test_cleanup() {
        let (state, _dir) = create_test_state();

        state.write_pid(12345).expect("Failed to write PID");
        state.cleanup().expect("Failed to cleanup");
        assert!(!state.pid_file.exists(), "PID file should be cleaned up");

        // Second cleanup is a no-op
        state.cleanup().expect("Should not error on nonexistent file");
    }

    #[test]
    fn test_get_pid_invalid_content() {
        let (state, _dir) = create_test_state();

        fs::write(&state.pid_file, "not_a_number").expect("Failed to write");

        assert!(state.get_pid().is_none(), "Should return None for invalid PID");
    }
}
