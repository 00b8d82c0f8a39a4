use crate::config::Config;
use crate::helper::get_volume_manager_instance;
use crate::{Handler, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for our `UmountCommand`.
///
/// Example :
///
/// `thinsnap umount /mnt`
#[derive(Debug, Args)]
pub struct UmountCommand {
    /// The mount point.
    path: PathBuf,
}

impl Handler for UmountCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        get_volume_manager_instance(config).unmount(&self.path)?;
        Ok(())
    }
}
