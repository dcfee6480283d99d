//! `spotbatch check` – verify the downloader is installed.

use anyhow::{bail, Result};
use spotbatch_core::config::SpotbatchConfig;

pub fn run_check(cfg: &SpotbatchConfig) -> Result<()> {
    let downloader = cfg.downloader.build();
    match downloader.version() {
        Ok(version) => {
            println!("{} is installed: {}", downloader.program().display(), version);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("downloader check failed: {:#}", e);
            bail!(
                "{} is not usable ({:#}); install it with `pip install spotdl` \
                 or set [downloader] program in the config file",
                cfg.downloader.program,
                e
            )
        }
    }
}
