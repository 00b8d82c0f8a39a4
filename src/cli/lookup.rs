use crate::config::Config;
use crate::helper::get_volume_manager_instance;
use crate::{Handler, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for our `LookupCommand`.
///
/// Example :
///
/// `thinsnap lookup /mnt`
///
/// Prints the name of the volume backing the mount point.
#[derive(Debug, Args)]
pub struct LookupCommand {
    /// The mount point.
    path: PathBuf,
}

impl Handler for LookupCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        let volume = get_volume_manager_instance(config).get_volume_by_path(&self.path)?;

        println!("{}", volume);
        Ok(())
    }
}
