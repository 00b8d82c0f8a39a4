use crate::config::Config;
use lvm::snapshots::thin::ThinSnapshotter;
use lvm::VolumeManager;

/// Create a new volume manager instance, running commands on the host
pub fn get_volume_manager_instance(config: &Config) -> VolumeManager {
    VolumeManager::new(&config.volume_group, None)
}

/// Create a new snapshotter instance, taking snapshots of the configured base volume
pub fn get_snapshotter_instance(config: &Config) -> ThinSnapshotter {
    ThinSnapshotter::new(
        get_volume_manager_instance(config),
        &config.base_volume,
        &config.data_dir,
    )
}
