use crate::snapshots::{MountPoint, Snapshotter};
use crate::{Error, Result, VolumeManager};
use std::fs::{create_dir_all, remove_dir};
use std::path::{Path, PathBuf};

pub const THIN_SNAPSHOTTER: &str = "lvm-thin";

/// `ThinSnapshotter` gives every container a thin LVM snapshot of a base volume.
///
/// The snapshot device is mounted under `data_dir/<key>` and its `rootfs` directory is
/// bind mounted on the path requested by the caller.
pub struct ThinSnapshotter {
    manager: VolumeManager,
    /// The thin volume every snapshot is taken from
    base_volume: String,
    /// The directory where snapshot devices are mounted
    data_dir: PathBuf,
}

impl ThinSnapshotter {
    pub fn new(manager: VolumeManager, base_volume: &str, data_dir: &Path) -> Self {
        ThinSnapshotter {
            manager,
            base_volume: base_volume.to_string(),
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Tear down the snapshot whose root filesystem is bind mounted on `mount_path`.
    ///
    /// The backing volume is looked up from the mount table, so this works without any
    /// state kept from the call to `mount`.
    pub fn release(&self, mount_path: &Path) -> Result<String> {
        let volume = self.manager.get_volume_by_path(mount_path)?;
        self.teardown(&volume, mount_path)?;
        Ok(volume)
    }

    fn teardown(&self, volume: &str, mount_path: &Path) -> Result<()> {
        let volume_dir = self.data_dir.join(volume);

        self.manager.unmount(mount_path)?;
        self.manager.unmount(&volume_dir)?;
        self.manager.remove_volume(volume)?;

        remove_dir(&volume_dir).map_err(|e| {
            Error::SnapshotDirectory(format!("{}: {}", volume_dir.display(), e))
        })?;

        log::debug!("released snapshot {} from {}", volume, mount_path.display());
        Ok(())
    }

    /// Names are split on `-` when mapping a mount source back to a volume, so neither the
    /// volume group nor the key may contain one.
    fn check_names(&self, key: &str) -> Result<()> {
        if key.is_empty() || key.contains('/') {
            return Err(Error::InvalidName(format!("snapshot key `{}`", key)));
        }
        if key.contains('-') {
            return Err(Error::InvalidName(format!(
                "snapshot key `{}` contains a dash",
                key
            )));
        }
        let volume_group = self.manager.volume_group();
        if volume_group.contains('-') {
            return Err(Error::InvalidName(format!(
                "volume group `{}` contains a dash",
                volume_group
            )));
        }
        Ok(())
    }

    /// Snapshot, mount and bind the volume. The volume is removed again if a step fails
    /// once it exists.
    fn attach(&self, key: &str, volume_dir: &Path, mount_path: &Path) -> Result<()> {
        if let Err(e) = self.manager.create_snapshot(&self.base_volume, key) {
            // Only a failed activation leaves a volume behind; a failed lvcreate may mean
            // the name belongs to someone else.
            if is_activation_error(&e) {
                self.remove_partial_volume(key);
            }
            return Err(e);
        }

        if let Err(e) = self.manager.mount(key, volume_dir) {
            self.remove_partial_volume(key);
            return Err(e);
        }

        if let Err(e) = self.manager.bind_rootfs(volume_dir, mount_path) {
            if let Err(unmount_err) = self.manager.unmount(volume_dir) {
                log::warn!("failed to unmount {}: {}", volume_dir.display(), unmount_err);
            } else {
                self.remove_partial_volume(key);
            }
            return Err(e);
        }

        Ok(())
    }

    fn remove_partial_volume(&self, key: &str) {
        if let Err(e) = self.manager.remove_volume(key) {
            log::warn!("failed to remove partially created snapshot {}: {}", key, e);
        }
    }
}

impl Snapshotter for ThinSnapshotter {
    /// Create a snapshot of the base volume and bind mount its `rootfs` on `mount_path`.
    ///
    /// Missing directories are created. If a step fails, the steps that already succeeded
    /// are undone in reverse order before the error is returned, directories that existed
    /// before the call are left in place.
    fn mount(&self, key: &str, mount_path: &Path) -> Result<MountPoint> {
        self.check_names(key)?;

        let volume_dir = self.data_dir.join(key);
        let created = create_missing_dirs(&[volume_dir.as_path(), mount_path])?;

        if let Err(e) = self.attach(key, &volume_dir, mount_path) {
            remove_created_dirs(&created);
            return Err(e);
        }

        log::info!(
            "snapshot {} of {} mounted on {}",
            key,
            self.base_volume,
            mount_path.display()
        );

        Ok(MountPoint {
            typ: THIN_SNAPSHOTTER.to_string(),
            volume: key.to_string(),
            mount_path: mount_path.to_path_buf(),
        })
    }

    /// Tear down a mount point created by `mount`.
    ///
    /// Nothing is unmounted or removed if the mount table shows another volume than the
    /// one recorded in `mount_point`.
    fn umount(&self, mount_point: &MountPoint) -> Result<()> {
        let volume = self.manager.get_volume_by_path(&mount_point.mount_path)?;
        if volume != mount_point.volume {
            return Err(Error::VolumeMismatch {
                mount_path: mount_point.mount_path.display().to_string(),
                expected: mount_point.volume.clone(),
                found: volume,
            });
        }

        self.teardown(&volume, &mount_point.mount_path)
    }
}

fn is_activation_error(e: &Error) -> bool {
    matches!(e, Error::Command { program, .. } if program == "lvchange")
}

/// Create the directories that don't exist yet and return them, in creation order.
fn create_missing_dirs(dirs: &[&Path]) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in dirs {
        if dir.exists() {
            continue;
        }
        log::debug!("creating snapshot directory {}", dir.display());
        if let Err(e) = create_dir_all(dir) {
            remove_created_dirs(&created);
            return Err(Error::SnapshotDirectory(format!(
                "{}: {}",
                dir.display(),
                e
            )));
        }
        created.push(dir.to_path_buf());
    }
    Ok(created)
}

fn remove_created_dirs(created: &[PathBuf]) {
    for dir in created.iter().rev() {
        if let Err(e) = remove_dir(dir) {
            log::warn!("failed to remove {}: {}", dir.display(), e);
        }
    }
}
