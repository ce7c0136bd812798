//! Completions command - generate shell completion scripts.
//!
//! Generates shell completion scripts for various shells that can be
//! installed to enable tab-completion of dailyquote commands and options.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    dailyquote completions bash > ~/.local/share/bash-completion/completions/dailyquote\n    \
    dailyquote completions zsh > ~/.zfunc/_dailyquote\n    \
    dailyquote completions fish > ~/.config/fish/completions/dailyquote.fish")]
pub struct Args {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generates completions for `cmd` on stdout.
///
/// Called from main.rs, which has access to the Cli struct.
pub fn generate_completions(cmd: &mut Command, shell: Shell) {
    generate(shell, cmd, "dailyquote", &mut io::stdout());
}
