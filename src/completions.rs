//! Shell completion scripts.
//!
//! The shell is taken straight from clap_complete so every shell it knows
//! (bash, zsh, fish, elvish, powershell) is accepted on the command line.

use clap::Command;
use clap_complete::generate;
use std::io::Write;

pub use clap_complete::Shell;

/// Write the completion script for `cmd` to `out`.
pub fn generate_completions(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
