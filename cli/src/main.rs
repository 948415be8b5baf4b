//! `nexuscli` entrypoint.
//!
//! Resolves, downloads and verifies Maven artifacts from a Nexus repository
//! manager, and uploads files into raw repositories. Paths and URIs are
//! printed to stdout; logs go to stderr.

use clap::Parser;
use nexuscli::dirs::SystemBaseDirs;
use nexuscli_cli::cli::Cli;
use nexuscli_cli::commands::run;
use nexuscli_cli::error::Result;
use nexuscli_cli::output::{init_logging, write_line};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbosity, cli.global.quiet);

    let mut stdout = std::io::stdout().lock();
    let run_result = run(&cli, &SystemBaseDirs, &mut stdout);
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, format_args!("error: {err}"));
            err.exit_code()
        }
    }
}
