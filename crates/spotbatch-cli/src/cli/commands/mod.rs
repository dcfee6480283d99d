//! CLI command handlers. Each command is in its own file.

mod batch;
mod check;
mod completions;
mod get;
mod man;

pub use batch::run_batch;
pub use check::run_check;
pub use completions::run_completions;
pub use get::run_get;
pub use man::run_man;

use spotbatch_core::journal::OutcomeJournal;

/// Journal under the state dir; `None` (with a warning) if it can't be created.
fn open_journal() -> Option<OutcomeJournal> {
    match OutcomeJournal::open_default() {
        Ok(journal) => Some(journal),
        Err(e) => {
            tracing::warn!("outcome journal unavailable: {:#}", e);
            None
        }
    }
}
