use crate::executor::{Executor, System};
use crate::{Error, Result, ROOTFS_DIR};
use nix::errno::Errno;
use nix::sys::stat::Mode;
use std::path::Path;

/// The `VolumeManager` drives the LVM and mount command line tools for a single volume group.
///
/// It never keeps track of volumes itself: every name is derived from the volume group when an
/// operation is called, so one manager can be used for any number of volumes.
pub struct VolumeManager {
    /// The LVM volume group every volume belongs to.
    volume_group: String,
    /// The executor running the external commands.
    executor: Box<dyn Executor>,
}

impl VolumeManager {
    /// Build a manager for `volume_group`.
    ///
    /// When `executor` is `None`, commands are run on the host with [`System`].
    pub fn new(volume_group: &str, executor: Option<Box<dyn Executor>>) -> Self {
        VolumeManager {
            volume_group: volume_group.to_string(),
            executor: executor.unwrap_or_else(|| Box::new(System::new())),
        }
    }

    pub fn volume_group(&self) -> &str {
        &self.volume_group
    }

    /// Create a thin snapshot `snapshot_name` of `volume_name` and activate it.
    ///
    /// A failed activation leaves the snapshot behind, it must be cleaned up with
    /// [`VolumeManager::remove_volume`].
    pub fn create_snapshot(&self, volume_name: &str, snapshot_name: &str) -> Result<()> {
        let origin = self.full_volume_name(volume_name);
        self.run(&[
            "lvcreate",
            "--type",
            "thin",
            "-s",
            &origin,
            "-n",
            snapshot_name,
        ])?;
        log::info!("created snapshot {} of {}", snapshot_name, origin);

        self.activate_volume(snapshot_name)
    }

    /// Remove a volume without asking for confirmation.
    pub fn remove_volume(&self, volume_name: &str) -> Result<()> {
        let volume = self.full_volume_name(volume_name);
        self.run(&["lvremove", "-y", &volume])?;
        log::info!("removed volume {}", volume);
        Ok(())
    }

    /// Activate a volume, ignoring its activation skip flag, so its device node gets created.
    fn activate_volume(&self, volume_name: &str) -> Result<()> {
        let volume = self.full_volume_name(volume_name);
        self.run(&["lvchange", "-ay", "-Ky", &volume])?;
        log::debug!("activated volume {}", volume);
        Ok(())
    }

    /// Bind mount the `rootfs` directory of `src_dir` onto `dest_dir`.
    ///
    /// The `rootfs` directory is created with mode 0700 if it doesn't exist yet.
    pub fn bind_rootfs(&self, src_dir: &Path, dest_dir: &Path) -> Result<()> {
        let rootfs = src_dir.join(ROOTFS_DIR);
        match nix::unistd::mkdir(rootfs.as_path(), Mode::S_IRWXU) {
            Ok(()) => log::debug!("created {}", rootfs.display()),
            Err(Errno::EEXIST) => {}
            Err(e) => return Err(Error::CreateRootfs(e)),
        }

        self.run(&[
            "mount",
            "--bind",
            &rootfs.to_string_lossy(),
            &dest_dir.to_string_lossy(),
        ])
    }

    /// Mount the device of an activated volume on an existing directory.
    pub fn mount(&self, volume_name: &str, path: &Path) -> Result<()> {
        let device = format!("/dev/{}", self.full_volume_name(volume_name));
        self.run(&["mount", &device, &path.to_string_lossy()])?;
        log::debug!("mounted {} on {}", device, path.display());
        Ok(())
    }

    pub fn unmount(&self, path: &Path) -> Result<()> {
        self.run(&["umount", &path.to_string_lossy()])
    }

    /// Find the name of the volume mounted on `path`.
    ///
    /// The mount source reported by `findmnt` is expected to look like
    /// `/dev/mapper/<group>-<volume>`, optionally followed by a `[/subdir]` suffix for bind
    /// mounts. Device mapper escapes dashes inside LVM names by doubling them, so a volume
    /// group or volume name containing a dash can't be resolved and yields
    /// [`Error::ParseDevice`].
    pub fn get_volume_by_path(&self, path: &Path) -> Result<String> {
        let args = to_args(&["findmnt", "-n", "-o", "SOURCE", &path.to_string_lossy()]);
        let output = self
            .executor
            .exec_combined_output(&args)
            .map_err(Error::FindMount)?;

        volume_from_device(trim_device_subdir(output.trim()))
    }

    fn full_volume_name(&self, volume_name: &str) -> String {
        format!("{}/{}", self.volume_group, volume_name)
    }

    /// Execute a command, attaching its output to the error when it fails.
    fn run(&self, args: &[&str]) -> Result<()> {
        let args = to_args(args);
        self.executor
            .exec_combined_output(&args)
            .map(|_| ())
            .map_err(|source| Error::Command {
                program: args.first().cloned().unwrap_or_default(),
                command: args.join(" "),
                source,
            })
    }
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Strip the `[/subdir]` suffix `findmnt` appends to the source of a bind mount,
/// e.g. `/dev/mapper/vg0-1[/rootfs]`.
fn trim_device_subdir(source: &str) -> &str {
    source.split('[').next().unwrap_or(source)
}

fn volume_from_device(device: &str) -> Result<String> {
    let fields: Vec<&str> = device.split('-').collect();
    match fields.as_slice() {
        [_, volume] => Ok(volume.to_string()),
        _ => Err(Error::ParseDevice {
            device: device.to_string(),
            fields: fields.len(),
        }),
    }
}
