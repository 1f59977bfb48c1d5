//! Durable state records
//!
//! Two independent records live under `.testroom/`: the origin/mirror
//! mapping and the alert-channel address. Each is read whole and written
//! whole; the last writer wins.

use serde::{Deserialize, Serialize};
use testroom_fs::{ConfigStore, NormalizedPath, WorkspacePath, io};

use crate::Result;

/// Mapping from the selected origin directory to its mirror.
///
/// `mirror_path` is always a direct child of the workspace root, named after
/// the origin's final component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorState {
    pub origin_path: NormalizedPath,
    pub mirror_path: NormalizedPath,
}

impl MirrorState {
    /// Whether both ends of the mapping are set.
    pub fn is_configured(&self) -> bool {
        !self.origin_path.as_str().is_empty() && !self.mirror_path.as_str().is_empty()
    }
}

/// Email alert channel wired into the Checkly config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertChannelConfig {
    pub address: String,
}

#[derive(Serialize, Deserialize)]
struct MirrorRecord {
    mirror: MirrorState,
}

#[derive(Serialize, Deserialize)]
struct AlertRecord {
    alert_channel: AlertChannelConfig,
}

/// Reads and writes the state records of one workspace.
#[derive(Debug, Clone)]
pub struct StateStore {
    root: NormalizedPath,
    store: ConfigStore,
}

impl StateStore {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            store: ConfigStore::new(),
        }
    }

    pub fn mirror_record_path(&self) -> NormalizedPath {
        self.root.join(WorkspacePath::MirrorRecord.as_str())
    }

    pub fn alert_record_path(&self) -> NormalizedPath {
        self.root.join(WorkspacePath::AlertRecord.as_str())
    }

    pub fn load_mirror(&self) -> Result<Option<MirrorState>> {
        let record: Option<MirrorRecord> = self.store.load_optional(&self.mirror_record_path())?;
        Ok(record.map(|r| r.mirror))
    }

    /// Replace the tracked mapping. Only one mirror is tracked at a time.
    pub fn save_mirror(&self, state: &MirrorState) -> Result<()> {
        self.store.save(
            &self.mirror_record_path(),
            &MirrorRecord {
                mirror: state.clone(),
            },
        )?;
        Ok(())
    }

    /// Forget the mapping. Returns whether one was stored.
    pub fn clear_mirror(&self) -> Result<bool> {
        Ok(io::remove_if_exists(&self.mirror_record_path())?)
    }

    pub fn load_alert_channel(&self) -> Result<Option<AlertChannelConfig>> {
        let record: Option<AlertRecord> = self.store.load_optional(&self.alert_record_path())?;
        Ok(record.map(|r| r.alert_channel))
    }

    pub fn save_alert_channel(&self, config: &AlertChannelConfig) -> Result<()> {
        self.store.save(
            &self.alert_record_path(),
            &AlertRecord {
                alert_channel: config.clone(),
            },
        )?;
        Ok(())
    }

    pub fn clear_alert_channel(&self) -> Result<bool> {
        Ok(io::remove_if_exists(&self.alert_record_path())?)
    }
}
