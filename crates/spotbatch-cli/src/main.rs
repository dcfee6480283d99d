use spotbatch_core::logging;

mod cli;

use crate::cli::{CliCommand, EXIT_ERROR};

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    match CliCommand::run_from_args().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("spotbatch error: {:#}", err);
            std::process::exit(EXIT_ERROR);
        }
    }
}
