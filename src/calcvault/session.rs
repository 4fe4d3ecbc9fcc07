//! # Session Lifecycle
//!
//! A [`Session`] owns the note collection while the vault is open and pairs
//! loading it with saving it.
//!
//! ```text
//! Uninitialized ──start()──▶ Loading ──▶ Ready ──stop()──▶ Saving ──▶ Terminated
//!                                         │  ▲
//!                                         └──┘ create()
//! ```
//!
//! - A failed load still reaches `Ready`, with an empty collection. The user is
//!   notified and the detail is logged.
//! - `stop()` writes the collection, retrying up to
//!   [`VaultConfig::save_attempts`] times. If every attempt fails the user is
//!   notified, the detail is logged and `stop()` returns
//!   [`VaultError::PersistenceWrite`]. Teardown is never blocked: the
//!   in-memory notes are discarded either way.
//! - When the stored blob could not be read and nothing was created, `stop()`
//!   leaves the stored blob alone instead of overwriting it with an empty list.
//! - Dropping a `Ready` session runs `stop()`, so every exit path saves.

use crate::collection::NoteCollection;
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::model::Note;
use crate::report::Reporter;
use crate::store::BlobStore;
use log::{debug, info, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Ready,
    Saving,
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Loading => "loading",
            SessionState::Ready => "ready",
            SessionState::Saving => "saving",
            SessionState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// What `start()` found in storage.
#[derive(Debug)]
pub enum LoadStatus {
    Loaded(usize),
    Empty,
    /// The stored blob could not be read; the session started empty.
    Recovered(VaultError),
}

pub struct Session<B: BlobStore, R: Reporter> {
    store: B,
    reporter: R,
    config: VaultConfig,
    state: SessionState,
    notes: NoteCollection,
    load_failed: bool,
    created: usize,
}

impl<B: BlobStore, R: Reporter> Session<B, R> {
    pub fn new(store: B, reporter: R, config: VaultConfig) -> Self {
        Self {
            store,
            reporter,
            config,
            state: SessionState::Uninitialized,
            notes: NoteCollection::new(),
            load_failed: false,
            created: 0,
        }
    }

    /// Creates and starts a session in one step.
    pub fn open(store: B, reporter: R, config: VaultConfig) -> (Self, LoadStatus) {
        let mut session = Self::new(store, reporter, config);
        let status = session.load();
        (session, status)
    }

    pub fn start(&mut self) -> Result<LoadStatus> {
        if self.state != SessionState::Uninitialized {
            return Err(VaultError::Session(format!(
                "cannot start a session that is {}",
                self.state
            )));
        }
        Ok(self.load())
    }

    fn load(&mut self) -> LoadStatus {
        self.state = SessionState::Loading;
        let status = match self.read() {
            Ok(Some(notes)) => {
                info!("loaded {} notes", notes.len());
                let count = notes.len();
                self.notes = notes;
                LoadStatus::Loaded(count)
            }
            Ok(None) => {
                debug!("no stored notes");
                LoadStatus::Empty
            }
            Err(e) => {
                self.reporter
                    .log_error(&format!("Error reading notes from storage: {}", e));
                self.reporter.notify_user("Failed to load notes.");
                self.load_failed = true;
                LoadStatus::Recovered(e)
            }
        };
        self.state = SessionState::Ready;
        status
    }

    fn read(&self) -> Result<Option<NoteCollection>> {
        let blob = self
            .store
            .get_blob(&self.config.notes_key)
            .map_err(|e| VaultError::PersistenceRead(e.to_string()))?;
        match blob {
            Some(blob) if !blob.trim().is_empty() => NoteCollection::load(&blob).map(Some),
            _ => Ok(None),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn notes(&self) -> Result<&NoteCollection> {
        self.ensure_ready()?;
        Ok(&self.notes)
    }

    pub fn create(&mut self, title: &str, text: &str) -> Result<Note> {
        self.ensure_ready()?;
        let note = self.notes.create(title, text)?;
        self.created += 1;
        debug!("created note {}", note.id);
        Ok(note)
    }

    /// Persists the collection and ends the session.
    ///
    /// Calling `stop` on a terminated session is a no-op. A session that was
    /// never started terminates without touching storage.
    pub fn stop(&mut self) -> Result<()> {
        match self.state {
            SessionState::Ready => {}
            SessionState::Terminated => return Ok(()),
            SessionState::Uninitialized => {
                self.state = SessionState::Terminated;
                return Ok(());
            }
            SessionState::Loading | SessionState::Saving => {
                return Err(VaultError::Session(format!(
                    "cannot stop a session that is {}",
                    self.state
                )));
            }
        }

        self.state = SessionState::Saving;
        let outcome = self.persist();
        self.notes = NoteCollection::new();
        self.state = SessionState::Terminated;
        outcome
    }

    fn persist(&self) -> Result<()> {
        if self.load_failed && self.created == 0 {
            info!("nothing created since a failed load; keeping the stored blob");
            return Ok(());
        }

        let blob = match self.notes.serialize() {
            Ok(blob) => blob,
            Err(e) => return Err(self.write_failed(0, e.to_string())),
        };

        let attempts = self.config.effective_save_attempts();
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self.store.set_blob(&self.config.notes_key, &blob) {
                Ok(()) => {
                    info!("saved {} notes", self.notes.len());
                    return Ok(());
                }
                Err(e) => {
                    warn!("save attempt {}/{} failed: {}", attempt, attempts, e);
                    last_error = e.to_string();
                }
            }
        }
        Err(self.write_failed(attempts, last_error))
    }

    fn write_failed(&self, attempts: u32, reason: String) -> VaultError {
        self.reporter
            .log_error(&format!("Error storing notes: {}", reason));
        self.reporter.notify_user("Failed to save notes.");
        VaultError::PersistenceWrite { attempts, reason }
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.state == SessionState::Ready {
            Ok(())
        } else {
            Err(VaultError::Session(format!(
                "session is {}, not ready",
                self.state
            )))
        }
    }
}

impl<B: BlobStore, R: Reporter> Drop for Session<B, R> {
    fn drop(&mut self) {
        if self.state == SessionState::Ready {
            // Failures were already reported by stop()
            let _ = self.stop();
        }
    }
}
