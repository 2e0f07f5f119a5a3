//! tox2travis CLI Application
//!
//! Reads the environments of a tox project and writes a Travis CI descriptor
//! whose build matrix runs each of them on its interpreter.

// CLI binary reports its result on stdout and startup failures on stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use tox2travis::cli::{self, EXIT_CLI, EXIT_OK, exit_code_for, render_error};
use tox2travis::commands::CommandOutput;
use tox2travis::tracing::{TracingConfig, init_tracing};

fn main() {
    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.log_level().into(),
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("{e:?}");
        std::process::exit(EXIT_CLI);
    }

    let exit_code = match cli.command.into_command().execute() {
        Ok(output) => {
            report(&output);
            EXIT_OK
        }
        Err(err) => {
            render_error(&err);
            exit_code_for(&err)
        }
    };
    std::process::exit(exit_code);
}

fn report(output: &CommandOutput) {
    match output {
        CommandOutput::Generate(report) => {
            println!(
                "{}: {} ({} matrix entries)",
                report.status,
                report.outfile.display(),
                report.entries
            );
        }
    }
}
