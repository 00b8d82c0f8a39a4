use crate::config::Config;
use crate::helper::get_snapshotter_instance;
use crate::{Handler, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for our `ReleaseCommand`.
///
/// Example :
///
/// `thinsnap release /run/bundles/web1/rootfs`
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// The path given to `prepare`.
    target: PathBuf,
}

impl Handler for ReleaseCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        let volume = get_snapshotter_instance(config).release(&self.target)?;

        log::info!("removed snapshot {}", volume);
        Ok(())
    }
}
