use crate::api::VaultApi;
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::store::fs::{FileBlobStore, FileCredentialStore};
use directories::ProjectDirs;
use log::{debug, warn};
use std::path::PathBuf;

/// Overrides the data directory (used by tests and portable installs).
pub const HOME_ENV: &str = "CALCVAULT_HOME";

pub struct VaultContext {
    pub api: VaultApi<FileCredentialStore, FileBlobStore>,
    pub data_dir: PathBuf,
}

/// `$CALCVAULT_HOME` when set, otherwise the platform data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "calcvault", "calcvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Store("Could not determine a data directory".to_string()))
}

pub fn initialize(data_dir: PathBuf) -> VaultContext {
    let config = VaultConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!("ignoring unreadable config in {}: {}", data_dir.display(), e);
        VaultConfig::default()
    });
    debug!("vault data dir: {}", data_dir.display());

    let api = VaultApi::new(
        FileCredentialStore::new(data_dir.clone()),
        FileBlobStore::new(data_dir.clone()),
        config,
    );

    VaultContext { api, data_dir }
}
