//! # Storage Layer
//!
//! The vault reaches durable state through two narrow adapters:
//!
//! - [`CredentialStore`]: holds the single reference [`Credential`]. The vault
//!   only reads it; provisioning goes through the optional `set`.
//! - [`BlobStore`]: a key-value surface for opaque text blobs. The whole note
//!   collection is one blob under [`NOTES_KEY`].
//!
//! Both traits take `&self`. The vault is single-threaded, so in-memory
//! implementations use `Cell`/`RefCell` for their state, and a store can be
//! lent to a session by reference (`&T` implements the trait) and inspected
//! once the session has ended.
//!
//! ## Implementations
//!
//! - [`memory`]: in-memory stores with failure injection, for tests.
//! - [`fs`]: JSON files in the data directory, written atomically.
//!
//! Encryption at rest belongs to the backend. A keychain or encrypted
//! key-value store plugs in by implementing these traits.

use crate::error::{Result, VaultError};
use crate::model::Credential;

pub mod fs;
pub mod memory;

/// Default key of the note collection blob.
pub const NOTES_KEY: &str = "notes";

pub trait CredentialStore {
    /// Fetch the reference credential, `None` if none is configured.
    fn get(&self) -> Result<Option<Credential>>;

    /// Replace the reference credential.
    ///
    /// Read-only stores keep the default, which refuses.
    fn set(&self, _credential: &Credential) -> Result<()> {
        Err(VaultError::Store(
            "credential store is read-only".to_string(),
        ))
    }
}

pub trait BlobStore {
    /// Read the blob stored under `key`, `None` if nothing was ever written.
    fn get_blob(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn set_blob(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn get(&self) -> Result<Option<Credential>> {
        (**self).get()
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        (**self).set(credential)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn get_blob(&self, key: &str) -> Result<Option<String>> {
        (**self).get_blob(key)
    }

    fn set_blob(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_blob(key, value)
    }
}
