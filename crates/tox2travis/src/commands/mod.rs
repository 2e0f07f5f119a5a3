//! Executable commands.

pub mod generate;

pub use generate::{GenerateOptions, GenerateReport, execute_generate};

use crate::cli::CliError;

/// A parsed command ready to run.
#[derive(Debug, Clone)]
pub enum Command {
    /// Write a `.travis.yml` from the tox configuration.
    Generate(GenerateOptions),
}

/// Output of a successful command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Result of `generate`.
    Generate(GenerateReport),
}

impl Command {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] describing the failure; nothing is written when
    /// configuration is invalid.
    pub fn execute(self) -> Result<CommandOutput, CliError> {
        let _span = tracing::info_span!("command", command = self.name()).entered();
        match self {
            Self::Generate(options) => execute_generate(&options).map(CommandOutput::Generate),
        }
    }

    /// Name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Generate(_) => "generate",
        }
    }
}
