//! Completions command implementation
//!
//! Handles the `idf-size-delta completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
///
/// ```bash
/// idf-size-delta completions bash > /etc/bash_completion.d/idf-size-delta
/// idf-size-delta completions zsh > ~/.zfunc/_idf-size-delta
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut clap::Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write the completion script for `cmd` into `out`
pub fn write_completions(shell: Shell, cmd: &mut clap::Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
