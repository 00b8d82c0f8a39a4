use crate::config::Config;
use crate::helper::get_volume_manager_instance;
use crate::{Handler, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for our `MountCommand`.
///
/// These arguments are parsed by `clap` and an instance of `MountCommand` containing
/// arguments is provided.
///
/// Example :
///
/// `thinsnap mount snap2 /mnt`
///
/// The volume must be active and the directory must exist.
#[derive(Debug, Args)]
pub struct MountCommand {
    /// The volume to mount.
    volume: String,
    /// The directory to mount the volume on.
    path: PathBuf,
}

impl Handler for MountCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        get_volume_manager_instance(config).mount(&self.volume, &self.path)?;
        Ok(())
    }
}
