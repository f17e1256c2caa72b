//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "innkeep";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            match self.shell {
                Shell::Bash => eprintln!(
                    "# innkeep completions bash > ~/.local/share/bash-completion/completions/innkeep"
                ),
                Shell::Zsh => eprintln!("# innkeep completions zsh > ~/.zsh/completions/_innkeep"),
                Shell::Fish => eprintln!(
                    "# innkeep completions fish > ~/.config/fish/completions/innkeep.fish"
                ),
                Shell::PowerShell => eprintln!("# innkeep completions powershell > $PROFILE"),
                _ => {}
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}
