use crate::commands::{Command, GenerateOptions};
use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use tox2travis_core::InterpreterOverride;
use tox2travis_travis::EmitterError;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// I/O or unexpected error exit code
pub const EXIT_IO: i32 = 3;

/// Default location of the tox configuration.
pub const DEFAULT_TOX_INI: &str = "tox.ini";

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// Configuration error: bad fallback, override or tox.ini (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tox2travis::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Reading or writing a file failed (exit code 3)
    #[error("I/O error: {message}")]
    #[diagnostic(code(tox2travis::cli::io))]
    Io {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(tox2travis::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new I/O error with help text
    #[must_use]
    pub fn io_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new other error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }
}

/// Convert `tox2travis_core::Error` to the appropriate `CliError` variant.
///
/// Fallback, override and tox.ini problems are configuration errors; failing to
/// read tox.ini is an I/O error.
impl From<tox2travis_core::Error> for CliError {
    fn from(err: tox2travis_core::Error) -> Self {
        let help = err.help().map(|h| h.to_string());
        match err {
            tox2travis_core::Error::Io { .. } => Self::Io {
                message: err.to_string(),
                help,
            },
            tox2travis_core::Error::UnknownFallback { .. }
            | tox2travis_core::Error::InvalidOverride { .. }
            | tox2travis_core::Error::ToxConfig { .. } => Self::Config {
                message: err.to_string(),
                help,
            },
        }
    }
}

impl From<EmitterError> for CliError {
    fn from(err: EmitterError) -> Self {
        match err {
            EmitterError::Io { .. } => Self::io_with_help(
                err.to_string(),
                "Check that the output directory exists and is writable",
            ),
            EmitterError::Serialization(_) => Self::other(err.to_string()),
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Io { .. } | CliError::Other { .. } => EXIT_IO,
    }
}

/// Render error to stderr with miette
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
    // Ensure output is flushed before process exit
    let _ = io::stderr().flush();
}

/// Main CLI entry point for tox2travis.
///
/// Generates a Travis CI build matrix from the environments in a tox configuration.
#[derive(Parser, Debug)]
#[command(name = "tox2travis")]
#[command(about = "Generate a .travis.yml build matrix from tox environments")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (repeatable)"
    )]
    pub verbose: u8,

    /// Log output format.
    #[arg(
        long = "log-format",
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,
}

impl Cli {
    /// Log level selected by the number of `-v` flags.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a .travis.yml whose matrix runs every tox environment.
    #[command(about = "Write a .travis.yml whose matrix runs every tox environment")]
    Generate {
        /// Path of the descriptor to write.
        #[arg(value_name = "OUTFILE", help = "Path of the .travis.yml to write")]
        outfile: PathBuf,
        /// Basepython that receives environments without a known interpreter.
        #[arg(
            long,
            short = 'f',
            env = "TOX2TRAVIS_FALLBACK",
            value_name = "BASEPYTHON",
            help = "Basepython that receives environments without a known interpreter \
                    (python2.7, python3.4, python3.5, python3.6, jython, pypy, pypy3, \
                    python3.7, or the SOURCE of an --override)"
        )]
        fallback: Option<String>,
        /// Extra interpreter mapping, as tox basepython=Travis version (repeatable).
        #[arg(
            long = "override",
            short = 'o',
            action = clap::ArgAction::Append,
            value_name = "SOURCE=TARGET",
            value_parser = parse_override,
            help = "Extra interpreter mapping, e.g. python3.8=3.8 (repeatable)"
        )]
        overrides: Vec<InterpreterOverride>,
        /// Path to the tox configuration.
        #[arg(
            long = "tox-ini",
            env = "TOX2TRAVIS_TOX_INI",
            default_value = DEFAULT_TOX_INI,
            help = "Path to the tox configuration"
        )]
        tox_ini: PathBuf,
        /// Report what would change without writing.
        #[arg(long, help = "Report what would change without writing")]
        dry_run: bool,
    },
}

impl Commands {
    /// Convert parsed arguments into an executable command.
    #[must_use]
    pub fn into_command(self) -> Command {
        match self {
            Self::Generate {
                outfile,
                fallback,
                overrides,
                tox_ini,
                dry_run,
            } => Command::Generate(GenerateOptions {
                outfile,
                fallback,
                overrides,
                tox_ini,
                dry_run,
            }),
        }
    }
}

fn parse_override(value: &str) -> Result<InterpreterOverride, String> {
    value.parse().map_err(|e: tox2travis_core::Error| e.to_string())
}

/// Parse command line arguments into a CLI structure.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
