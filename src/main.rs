use procbar::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; the bar owns the terminal, so prefer the log file.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("procbar error: {:#}", err);
        std::process::exit(1);
    }
}
