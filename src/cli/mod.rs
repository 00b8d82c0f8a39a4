mod bind;
mod create;
mod lookup;
mod mount;
mod prepare;
mod release;
mod remove;
mod umount;

use crate::cli::bind::BindCommand;
use crate::cli::create::CreateCommand;
use crate::cli::lookup::LookupCommand;
use crate::cli::mount::MountCommand;
use crate::cli::prepare::PrepareCommand;
use crate::cli::release::ReleaseCommand;
use crate::cli::remove::RemoveCommand;
use crate::cli::umount::UmountCommand;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI related errors
#[derive(Debug)]
pub enum Error {
    /// A volume operation failed
    Lvm(lvm::Error),
    /// The configuration file exists but can't be opened
    OpenConfig(std::io::Error),
    /// The configuration file is not valid JSON
    ParseConfig(serde_json::Error),
}

impl From<lvm::Error> for Error {
    fn from(error: lvm::Error) -> Self {
        Self::Lvm(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Lvm(e) => write!(f, "{}", e),
            Error::OpenConfig(e) => write!(f, "failed to open configuration: {}", e),
            Error::ParseConfig(e) => write!(f, "failed to parse configuration: {}", e),
        }
    }
}

/// A common result type for our CLI.
pub type Result<T> = std::result::Result<T, Error>;

/// `Handler` is a trait that should be implemented for each of our commands.
///
/// It defines the contract & the input / output of a command execution.
pub trait Handler {
    /// Executes the command handler.
    ///
    /// Commands are built at runtime with their arguments, the configuration shared by every
    /// command is given to the handler.
    fn handler(&self, config: &Config) -> Result<()>;
}

/// Manage thin LVM snapshots used as container root filesystems.
#[derive(Parser, Debug)]
#[clap(version, author)]
pub struct Cli {
    /// Path of the JSON configuration file.
    #[clap(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// The LVM volume group, overrides the configuration file.
    #[clap(short = 'g', long, global = true)]
    volume_group: Option<String>,
    /// If set, nothing but the command output will be displayed.
    #[clap(short, long, global = true)]
    pub quiet: bool,
    #[clap(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// Load the configuration file and apply the command line overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::try_from(self.config.as_path())?;
        if let Some(volume_group) = &self.volume_group {
            config.volume_group = volume_group.clone();
        }
        Ok(config)
    }

    /// Get the command used by the user.
    ///
    /// For example, if the user executes the command `create`,
    /// we dynamically return the command so the `main` can
    /// execute it.
    pub fn command(self) -> Box<dyn Handler> {
        match self.command {
            Command::Create(cmd) => Box::new(cmd),
            Command::Remove(cmd) => Box::new(cmd),
            Command::Mount(cmd) => Box::new(cmd),
            Command::Umount(cmd) => Box::new(cmd),
            Command::Bind(cmd) => Box::new(cmd),
            Command::Lookup(cmd) => Box::new(cmd),
            Command::Prepare(cmd) => Box::new(cmd),
            Command::Release(cmd) => Box::new(cmd),
        }
    }
}

/// The enumeration of our commands.
///
/// Each of our commands should be listed in this enumeration with the following format :
/// CommandName(CommandHandler)
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create and activate a thin snapshot of a volume
    Create(CreateCommand),
    /// Remove a volume
    Remove(RemoveCommand),
    /// Mount a volume on an existing directory
    Mount(MountCommand),
    /// Unmount a path
    Umount(UmountCommand),
    /// Bind mount the rootfs directory of a path onto another
    Bind(BindCommand),
    /// Print the volume mounted on a path
    Lookup(LookupCommand),
    /// Snapshot the base volume and expose its rootfs on a path
    Prepare(PrepareCommand),
    /// Tear down a snapshot created by `prepare`
    Release(ReleaseCommand),
}
