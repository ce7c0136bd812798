//! Delivery of quotes as desktop notifications.
//!
//! Each platform has its own notification command. Delivery is best
//! effort: when the native command is missing or fails, the quote is
//! printed instead so it is never lost.

use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

/// Title shown on every notification.
pub const TITLE: &str = "Daily Quote";

/// Something that can show a quote to the user.
pub trait Notifier {
    /// Shows `message`, attributed to `origin`.
    fn notify(&self, title: &str, message: &str, origin: &str) -> Result<()>;
}

/// Prints notifications to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str, origin: &str) -> Result<()> {
        println!("{title}: {message}");
        println!("  -- {origin}");
        Ok(())
    }
}

/// Uses the platform's native notification command.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, origin: &str) -> Result<()> {
        match send_native(title, message, origin) {
            Ok(()) => {
                tracing::info!("Notification shown: {}", origin);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Desktop notification failed, printing instead: {:#}", e);
                ConsoleNotifier.notify(title, message, origin)
            }
        }
    }
}

/// Picks the notifier for the current settings.
pub fn notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(DesktopNotifier)
    } else {
        Box::new(ConsoleNotifier)
    }
}

/// Escapes text for embedding in a double-quoted script string.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"").replace('`', "\\`")
}

fn run(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to run {program}"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn send_native(title: &str, message: &str, origin: &str) -> Result<()> {
    let via_notifier = run(
        "terminal-notifier",
        &[
            "-title", title, "-subtitle", origin, "-message", message, "-sound", "default",
        ],
    );
    if via_notifier.is_ok() {
        return Ok(());
    }

    let script = format!(
        "display notification \"{}\" with title \"{}\" subtitle \"{}\" sound name \"default\"",
        escape(message),
        escape(title),
        escape(origin)
    );
    run("osascript", &["-e", script.as_str()])
}

#[cfg(target_os = "windows")]
fn send_native(title: &str, message: &str, origin: &str) -> Result<()> {
    let script = format!(
        "[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] > $null; \
         $t = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02); \
         $x = $t.GetElementsByTagName('text'); \
         $x.Item(0).AppendChild($t.CreateTextNode('{}')) > $null; \
         $x.Item(1).AppendChild($t.CreateTextNode('{} -- {}')) > $null; \
         [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('{}').Show([Windows.UI.Notifications.ToastNotification]::new($t))",
        title.replace('\'', "''"),
        message.replace('\'', "''"),
        origin.replace('\'', "''"),
        title.replace('\'', "''"),
    );
    run("powershell", &["-NoProfile", "-Command", script.as_str()])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn send_native(title: &str, message: &str, origin: &str) -> Result<()> {
    let body = format!("{message}\n\n-- {origin}");
    run(
        "notify-send",
        &[title, body.as_str(), "-t", "15000", "-i", "dialog-information"],
    )
}
