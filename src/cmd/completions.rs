//! Completions command implementation
//!
//! Handles the `shotdiff completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// shotdiff completions bash > /etc/bash_completion.d/shotdiff
///
/// # Zsh
/// shotdiff completions zsh > ~/.zfunc/_shotdiff
///
/// # Fish
/// shotdiff completions fish > ~/.config/fish/completions/shotdiff.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write the completion script for `cmd` into `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn command() -> Command {
        Command::new("shotdiff")
            .arg(Arg::new("root").long("root").global(true))
            .subcommand(Command::new("run"))
            .subcommand(Command::new("report"))
    }

    #[test]
    fn test_completions_for_all_shells_mention_subcommands() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out = Vec::new();
            write_completions(shell, &mut command(), &mut out);
            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("shotdiff"), "{shell:?}");
            assert!(script.contains("report"), "{shell:?}");
        }
    }
}
