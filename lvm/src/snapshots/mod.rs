pub mod thin;

use crate::Result;
use std::path::{Path, PathBuf};

/// The `Snapshotter` trait defines methods that can be implemented in order to provide
/// writable container root filesystems.
pub trait Snapshotter: Send + Sync {
    /// Create the snapshot identified by `key` and expose its root filesystem at `mount_path`.
    fn mount(&self, key: &str, mount_path: &Path) -> Result<MountPoint>;
    /// Release everything `mount` set up for a mount point.
    fn umount(&self, mount_point: &MountPoint) -> Result<()>;
}

/// `MountPoint` holds information about a mount point on the host.
#[derive(Debug, Clone, PartialEq)]
pub struct MountPoint {
    /// The snapshotter type that created the mount point
    pub typ: String,
    /// The volume backing the mount point
    pub volume: String,
    /// The mount destination path
    pub mount_path: PathBuf,
}
