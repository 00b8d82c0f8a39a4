use crate::cli::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// The path of the file where the configuration is read from by default.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/thinsnap/config.json";

const DEFAULT_VOLUME_GROUP: &str = "vg0";
const DEFAULT_BASE_VOLUME: &str = "thinbase";
const DEFAULT_DATA_DIR: &str = "/var/lib/thinsnap/snapshots";

/// `Config` holds the settings shared by every command.
///
/// Every key is optional in the file, missing keys take their default value.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The LVM volume group the volumes belong to
    pub volume_group: String,
    /// The thin volume snapshots are taken from
    pub base_volume: String,
    /// The directory where snapshot devices are mounted
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            volume_group: DEFAULT_VOLUME_GROUP.to_string(),
            base_volume: DEFAULT_BASE_VOLUME.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl TryFrom<&Path> for Config {
    type Error = Error;

    /// Load the configuration file, falling back to the defaults when it doesn't exist.
    fn try_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            log::debug!(
                "no configuration at {}, using defaults",
                config_file.display()
            );
            return Ok(Config::default());
        }

        let file = File::open(config_file).map_err(Error::OpenConfig)?;
        serde_json::from_reader(file).map_err(Error::ParseConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::cli::Error;
    use std::path::{Path, PathBuf};
    use tempdir::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::try_from(Path::new("/thinsnap/missing/config.json")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.volume_group, "vg0");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new("thinsnap_config").unwrap();
        let config_file = dir.path().join("config.json");
        std::fs::write(
            &config_file,
            r#"{ "volume_group": "containers", "data_dir": "/srv/snapshots" }"#,
        )
        .unwrap();

        let config = Config::try_from(config_file.as_path()).unwrap();

        assert_eq!(config.volume_group, "containers");
        assert_eq!(config.base_volume, "thinbase");
        assert_eq!(config.data_dir, PathBuf::from("/srv/snapshots"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new("thinsnap_config").unwrap();
        let config_file = dir.path().join("config.json");
        std::fs::write(&config_file, "volume_group = vg0").unwrap();

        let err = Config::try_from(config_file.as_path()).unwrap_err();

        assert!(matches!(err, Error::ParseConfig(_)));
    }
}
