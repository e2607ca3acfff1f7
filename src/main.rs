//! Main entry point for csvdiff CLI

use clap::Parser;
use csvdiff::cli::Cli;
use csvdiff::commands::execute_command;
use csvdiff::CsvDiffError;

fn main() {
    // Parse command line arguments
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let code = e.exit_code();
            eprintln!("{}", CsvDiffError::from(e));
            std::process::exit(code);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    // Initialize logging, verbose raises the default level
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = execute_command(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
