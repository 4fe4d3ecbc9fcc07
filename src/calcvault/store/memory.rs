use super::{BlobStore, CredentialStore};
use crate::error::{Result, VaultError};
use crate::model::Credential;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory credential store for testing.
///
/// Counts lookups so tests can assert that a code path never reached it.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credential: RefCell<Option<Credential>>,
    simulate_error: Cell<bool>,
    lookups: Cell<usize>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RefCell::new(Some(credential)),
            ..Self::default()
        }
    }

    /// Make every subsequent `get` fail.
    pub fn set_simulate_error(&self, simulate: bool) {
        self.simulate_error.set(simulate);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Result<Option<Credential>> {
        self.lookups.set(self.lookups.get() + 1);
        if self.simulate_error.get() {
            return Err(VaultError::Store("Simulated credential store error".to_string()));
        }
        Ok(self.credential.borrow().clone())
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        *self.credential.borrow_mut() = Some(credential.clone());
        Ok(())
    }
}

/// In-memory blob store for testing.
///
/// Uses `RefCell` for interior mutability since the vault is single-threaded.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RefCell<HashMap<String, String>>,
    simulate_read_error: Cell<bool>,
    failing_writes: Cell<u32>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob without counting it as a write.
    pub fn with_blob(self, key: &str, value: &str) -> Self {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.set(count);
    }

    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Write attempts, failed ones included.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        if self.simulate_read_error.get() {
            return Err(VaultError::Store("Simulated read error".to_string()));
        }
        Ok(self.blob(key))
    }

    fn set_blob(&self, key: &str, value: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        let failing = self.failing_writes.get();
        if failing > 0 {
            self.failing_writes.set(failing - 1);
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::collection::NoteCollection;
    use crate::store::NOTES_KEY;

    pub const USERNAME: &str = "alice";
    pub const PASSWORD: &str = "correct horse";

    pub struct StoreFixture {
        pub credentials: InMemoryCredentialStore,
        pub blobs: InMemoryBlobStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// Stores with the fixture credential provisioned and no notes.
        pub fn new() -> Self {
            Self {
                credentials: InMemoryCredentialStore::with_credential(Credential::new(
                    USERNAME, PASSWORD,
                )),
                blobs: InMemoryBlobStore::new(),
            }
        }

        pub fn without_credential(mut self) -> Self {
            self.credentials = InMemoryCredentialStore::new();
            self
        }

        pub fn with_notes(self, notes: &[(&str, &str)]) -> Self {
            let mut collection = NoteCollection::new();
            for (title, text) in notes {
                collection.create(title, text).unwrap();
            }
            let blob = collection.serialize().unwrap();
            Self {
                blobs: self.blobs.with_blob(NOTES_KEY, &blob),
                ..self
            }
        }

        pub fn stored_notes(&self) -> NoteCollection {
            let blob = self.blobs.blob(NOTES_KEY).unwrap_or_else(|| "[]".into());
            NoteCollection::load(&blob).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_lookups_are_counted() {
        let store = InMemoryCredentialStore::with_credential(Credential::new("u", "p"));
        assert_eq!(store.lookups(), 0);
        assert_eq!(store.get().unwrap(), Some(Credential::new("u", "p")));
        assert_eq!(store.lookups(), 1);
    }

    #[test]
    fn credential_error_simulation() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.get().unwrap(), None);
        store.set_simulate_error(true);
        assert!(store.get().is_err());
    }

    #[test]
    fn blob_round_trip() {
        let store = InMemoryBlobStore::new();
        assert_eq!(store.get_blob("notes").unwrap(), None);
        store.set_blob("notes", "[]").unwrap();
        assert_eq!(store.get_blob("notes").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.writes(), 1);
        assert_eq!(store.reads(), 2);
    }

    #[test]
    fn failing_writes_recover() {
        let store = InMemoryBlobStore::new();
        store.fail_next_writes(2);
        assert!(store.set_blob("k", "1").is_err());
        assert!(store.set_blob("k", "2").is_err());
        store.set_blob("k", "3").unwrap();
        assert_eq!(store.blob("k").as_deref(), Some("3"));
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn works_through_a_reference() {
        fn write_via<B: BlobStore>(store: B) {
            store.set_blob("k", "v").unwrap();
        }
        let store = InMemoryBlobStore::new();
        write_via(&store);
        assert_eq!(store.blob("k").as_deref(), Some("v"));
    }
}
