//! tox2travis library
//!
//! Command-line plumbing for turning a `tox.ini` into a `.travis.yml`. The
//! binding and rendering logic lives in `tox2travis-core` and
//! `tox2travis-travis`; this crate wires them to arguments, logging and exit
//! codes.

pub mod cli;
pub mod commands;
pub mod tracing;

pub use cli::{CliError, exit_code_for};
pub use commands::{Command, CommandOutput};
