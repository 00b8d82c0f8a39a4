use crate::config::Config;
use crate::helper::get_volume_manager_instance;
use crate::{Handler, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for our `BindCommand`.
///
/// Example :
///
/// `thinsnap bind /var/lib/thinsnap/snapshots/snap2 /run/bundle/rootfs`
///
/// The `rootfs` directory is created in the source when it is missing.
#[derive(Debug, Args)]
pub struct BindCommand {
    /// The directory holding the `rootfs` directory.
    src: PathBuf,
    /// The directory to bind `rootfs` on.
    dest: PathBuf,
}

impl Handler for BindCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        get_volume_manager_instance(config).bind_rootfs(&self.src, &self.dest)?;
        Ok(())
    }
}
