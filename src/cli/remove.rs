use crate::config::Config;
use crate::helper::get_volume_manager_instance;
use crate::{Handler, Result};
use clap::Args;

/// Arguments for our `RemoveCommand`.
///
/// Example :
///
/// `thinsnap remove snap2`
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// The volume to remove.
    volume: String,
}

impl Handler for RemoveCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        get_volume_manager_instance(config).remove_volume(&self.volume)?;
        Ok(())
    }
}
