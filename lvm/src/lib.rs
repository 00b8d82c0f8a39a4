pub mod executor;
mod manager;
pub mod snapshots;

pub use manager::VolumeManager;

/// The name of the directory bind mounted as a container root filesystem.
pub const ROOTFS_DIR: &str = "rootfs";

/// Volume management errors
#[derive(Debug)]
pub enum Error {
    /// An external LVM or mount command failed.
    ///
    /// `program` is the tool that failed and `command` the full command line that was
    /// executed, the executor error keeps the combined output the command printed.
    Command {
        program: String,
        command: String,
        source: executor::Error,
    },
    /// `findmnt` could not resolve the source of a mount point
    FindMount(executor::Error),
    /// The mount source is not a `<group>-<volume>` device name
    ParseDevice { device: String, fields: usize },
    /// An error occurred when creating the rootfs directory, other than it already existing
    CreateRootfs(nix::Error),
    /// The name can't be turned into a volume that can be found again from its mount point
    InvalidName(String),
    /// An error occurred when creating or removing a snapshot directory
    SnapshotDirectory(String),
    /// The mount point is backed by another volume than the one it was created for
    VolumeMismatch {
        mount_path: String,
        expected: String,
        found: String,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Command { source, .. } => Some(source),
            Error::FindMount(e) => Some(e),
            Error::CreateRootfs(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Command {
                command, source, ..
            } => {
                let output = source.output().trim();
                if output.is_empty() {
                    write!(f, "`{}`: {}", command, source)
                } else {
                    write!(f, "`{}`: {}: {}", command, output, source)
                }
            }
            Error::FindMount(e) => write!(f, "failed to find mount source: {}", e),
            Error::ParseDevice { device, fields } => write!(
                f,
                "mount source `{}` has {} dash separated fields, expected 2",
                device, fields
            ),
            Error::CreateRootfs(e) => write!(f, "failed to create rootfs directory: {}", e),
            Error::InvalidName(msg) => write!(f, "invalid name: {}", msg),
            Error::SnapshotDirectory(msg) => write!(f, "snapshot directory: {}", msg),
            Error::VolumeMismatch {
                mount_path,
                expected,
                found,
            } => write!(
                f,
                "{} is backed by volume {}, expected {}",
                mount_path, found, expected
            ),
        }
    }
}

/// A common result type for our crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use crate::{executor, Error};

    #[test]
    fn test_command_error_shows_tool_output() {
        let err = Error::Command {
            program: "lvremove".to_string(),
            command: "lvremove -y vg0/snap2".to_string(),
            source: executor::Error::Exit {
                code: Some(5),
                output: "  Failed to find logical volume \"vg0/snap2\"\n".to_string(),
            },
        };

        assert_eq!(
            err.to_string(),
            "`lvremove -y vg0/snap2`: Failed to find logical volume \"vg0/snap2\": exit status 5"
        );
    }

    #[test]
    fn test_command_error_without_output() {
        let err = Error::Command {
            program: "umount".to_string(),
            command: "umount /mnt".to_string(),
            source: executor::Error::Exit {
                code: Some(32),
                output: String::new(),
            },
        };

        assert_eq!(err.to_string(), "`umount /mnt`: exit status 32");
    }
}
