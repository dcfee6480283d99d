pub mod config;
pub mod logging;

pub mod batch;
pub mod classify;
pub mod control;
pub mod downloader;
pub mod events;
pub mod job;
pub mod journal;
pub mod retry;
pub mod settings;
pub mod single;

#[cfg(test)]
pub(crate) mod testing;
