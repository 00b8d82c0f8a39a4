use crate::config::Config;
use crate::helper::get_snapshotter_instance;
use crate::{Handler, Result};
use clap::Args;
use lvm::snapshots::Snapshotter;
use std::path::PathBuf;

/// Arguments for our `PrepareCommand`.
///
/// These arguments are parsed by `clap` and an instance of `PrepareCommand` containing
/// arguments is provided.
///
/// Example :
///
/// `thinsnap prepare web1 /run/bundles/web1/rootfs`
///
/// A snapshot of the configured base volume named after the key is created, and its
/// `rootfs` directory is bind mounted on the target.
#[derive(Debug, Args)]
pub struct PrepareCommand {
    /// The snapshot key, used as the volume name.
    key: String,
    /// Where the root filesystem should be mounted.
    target: PathBuf,
}

impl Handler for PrepareCommand {
    fn handler(&self, config: &Config) -> Result<()> {
        let mount_point = get_snapshotter_instance(config).mount(&self.key, &self.target)?;

        println!("{}", mount_point.mount_path.display());
        Ok(())
    }
}
