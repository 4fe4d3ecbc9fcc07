use super::{BlobStore, CredentialStore};
use crate::error::{Result, VaultError};
use crate::model::Credential;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const CREDENTIAL_FILENAME: &str = "credential.json";

/// Blob store keeping each key in `<root>/<key>.json`.
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(VaultError::Store(format!("Invalid blob key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        if !path.exists() {
            debug!("no blob at {}", path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(VaultError::Io)?;
        debug!("read blob {} ({} bytes)", key, content.len());
        Ok(Some(content))
    }

    fn set_blob(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        write_atomic(&self.root, &path, value.as_bytes())?;
        debug!("wrote blob {} ({} bytes)", key, value.len());
        Ok(())
    }
}

/// Credential store keeping the reference pair in `<root>/credential.json`.
///
/// The file is created owner-only on Unix. It is a plain JSON file: use a
/// keychain-backed [`CredentialStore`] where the platform offers one.
pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(CREDENTIAL_FILENAME)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<Credential>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(VaultError::Io)?;
        let credential: Credential =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(Some(credential))
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        let content = serde_json::to_string_pretty(credential).map_err(VaultError::Serialization)?;
        let path = self.path();
        write_atomic(&self.root, &path, content.as_bytes())?;
        restrict_permissions(&path)?;
        debug!("stored reference credential for {}", credential.username);
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(VaultError::Io)?;
    }
    Ok(())
}

/// Write to a temp file in the same directory, then rename over the target.
fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    ensure_dir(dir)?;
    let tmp_file = dir.join(format!(".write-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp_file, bytes).map_err(VaultError::Io)?;
    restrict_permissions(&tmp_file)?;
    if let Err(e) = fs::rename(&tmp_file, target) {
        let _ = fs::remove_file(&tmp_file);
        return Err(VaultError::Io(e));
    }
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(VaultError::Io)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
