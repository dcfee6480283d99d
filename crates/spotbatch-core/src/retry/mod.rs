//! Retry controller.
//!
//! Wraps one job in a bounded retry loop with a fixed pause between attempts.
//! Metadata and lookup failures stop the loop immediately; any other failure
//! is treated as transient and retried until the attempt budget is spent.

mod classify;
mod policy;
mod run;

pub use classify::classify;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retries;
