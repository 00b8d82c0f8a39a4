use crate::config::Config;
use crate::helper::get_volume_manager_instance;
use crate::{Handler, Result};
use clap::Args;

/// Arguments for our `CreateCommand`.
///
/// These arguments are parsed by `clap` and an instance of `CreateCommand` containing
/// arguments is provided.
///
/// Example :
///
/// `thinsnap create volume1 snap2`
///
/// The `handler` method provided below will be executed.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// The volume to snapshot.
    volume: String,
    /// The name of the new snapshot.
    snapshot: String,
}

impl Handler for CreateCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        get_volume_manager_instance(config).create_snapshot(&self.volume, &self.snapshot)?;
        Ok(())
    }
}
