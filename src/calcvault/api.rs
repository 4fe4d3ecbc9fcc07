//! # API Facade
//!
//! The single entry point a UI drives. It composes the authentication gate
//! with the session lifecycle so notes are only reachable after a successful
//! login, and otherwise stays thin: business logic lives in
//! `commands/*.rs`, the lifecycle in `session.rs`.
//!
//! `VaultApi<C, B>` is generic over both adapters:
//! - Production: `VaultApi<FileCredentialStore, FileBlobStore>`
//! - Testing: `VaultApi<InMemoryCredentialStore, InMemoryBlobStore>`

use crate::auth::{AuthGate, LoginOutcome};
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::model::Credential;
use crate::report::{LogReporter, Reporter};
use crate::session::{LoadStatus, Session};
use crate::store::{BlobStore, CredentialStore};
use log::info;

pub struct VaultApi<C: CredentialStore, B: BlobStore> {
    gate: AuthGate<C>,
    blobs: B,
    config: VaultConfig,
}

impl<C: CredentialStore, B: BlobStore> VaultApi<C, B> {
    pub fn new(credentials: C, blobs: B, config: VaultConfig) -> Self {
        Self {
            gate: AuthGate::new(credentials),
            blobs,
            config,
        }
    }

    pub fn attempt_login(&self, username: &str, password: &str) -> LoginOutcome {
        self.gate.attempt_login(username, password)
    }

    /// Logs in and opens a started session over the note blob.
    pub fn unlock<R: Reporter>(
        &self,
        username: &str,
        password: &str,
        reporter: R,
    ) -> Result<(Session<&B, R>, LoadStatus)> {
        match self.attempt_login(username, password) {
            LoginOutcome::Accepted => Ok(Session::open(&self.blobs, reporter, self.config.clone())),
            LoginOutcome::Rejected(reason) => Err(VaultError::Authentication(reason)),
        }
    }

    /// [`unlock`](Self::unlock) with notices and error detail sent to the log.
    pub fn unlock_logged(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(Session<&B, LogReporter>, LoadStatus)> {
        self.unlock(username, password, LogReporter)
    }

    /// Stores the reference credential, replacing any previous one.
    pub fn provision(&self, credential: &Credential) -> Result<()> {
        if credential.username.is_empty() || credential.password.is_empty() {
            return Err(VaultError::Validation(
                "Username and password cannot be empty.".into(),
            ));
        }
        self.gate.store().set(credential)?;
        info!("reference credential provisioned for {}", credential.username);
        Ok(())
    }

    /// Whether a reference credential is configured.
    pub fn is_provisioned(&self) -> Result<bool> {
        Ok(self.gate.store().get()?.is_some())
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }
}

pub use crate::auth::RejectReason;
pub use crate::commands::{CmdMessage, CmdResult, DisplayNote, Evaluation, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, evaluate, list};
    use crate::report::RecordingReporter;
    use crate::store::memory::fixtures::{StoreFixture, PASSWORD, USERNAME};
    use crate::store::memory::{InMemoryBlobStore, InMemoryCredentialStore};

    fn api_from(
        fixture: StoreFixture,
    ) -> VaultApi<InMemoryCredentialStore, InMemoryBlobStore> {
        VaultApi::new(fixture.credentials, fixture.blobs, VaultConfig::default())
    }

    #[test]
    fn unlock_opens_a_ready_session() {
        let api = api_from(StoreFixture::new().with_notes(&[("Sum", "2+2")]));
        let reporter = RecordingReporter::new();

        let (session, status) = api.unlock(USERNAME, PASSWORD, &reporter).unwrap();
        assert!(matches!(status, LoadStatus::Loaded(1)));
        assert_eq!(session.notes().unwrap().len(), 1);
    }

    #[test]
    fn rejected_login_never_reads_notes() {
        let api = api_from(StoreFixture::new());
        let reporter = RecordingReporter::new();

        let err = api.unlock(USERNAME, "nope", &reporter).err().unwrap();
        assert!(matches!(
            err,
            VaultError::Authentication(RejectReason::InvalidCredentials)
        ));
        assert_eq!(api.blobs.reads(), 0);
    }

    #[test]
    fn logged_unlock_recovers_from_a_corrupt_blob() {
        let fixture = StoreFixture::new();
        fixture.blobs.set_blob(crate::store::NOTES_KEY, "{ nope").unwrap();
        let api = api_from(fixture);

        let (mut session, status) = api.unlock_logged(USERNAME, PASSWORD).unwrap();
        assert!(matches!(status, LoadStatus::Recovered(_)));
        create::run(&mut session, "Sum", "2+2").unwrap();
        session.stop().unwrap();

        let (session, _) = api.unlock_logged(USERNAME, PASSWORD).unwrap();
        assert_eq!(session.notes().unwrap().len(), 1);
        assert!(matches!(
            api.unlock_logged(USERNAME, "nope").err(),
            Some(VaultError::Authentication(RejectReason::InvalidCredentials))
        ));
    }

    #[test]
    fn unprovisioned_vault_rejects_everyone() {
        let api = api_from(StoreFixture::new().without_credential());
        assert_eq!(
            api.attempt_login(USERNAME, PASSWORD),
            LoginOutcome::Rejected(RejectReason::InvalidCredentials)
        );
    }

    #[test]
    fn provision_then_login() {
        let api = api_from(StoreFixture::new().without_credential());
        assert!(!api.is_provisioned().unwrap());
        api.provision(&Credential::new("bob", "pw")).unwrap();
        assert!(api.is_provisioned().unwrap());
        assert!(api.attempt_login("bob", "pw").is_accepted());
        assert!(matches!(
            api.provision(&Credential::new("", "pw")),
            Err(VaultError::Validation(_))
        ));
    }

    #[test]
    fn end_to_end_notes_survive_sessions() {
        let api = api_from(StoreFixture::new());
        let reporter = RecordingReporter::new();

        {
            let (mut session, _) = api.unlock(USERNAME, PASSWORD, &reporter).unwrap();
            create::run(&mut session, "Sum", "2+2").unwrap();
            create::run(&mut session, "Prose", "not math").unwrap();

            let result = evaluate::run(&session, &[1, 2]).unwrap();
            assert_eq!(
                result.evaluations[0].outcome.as_ref().unwrap().to_string(),
                "4"
            );
            assert!(result.evaluations[1].outcome.is_err());
            session.stop().unwrap();
        }

        let (session, _) = api.unlock(USERNAME, PASSWORD, &reporter).unwrap();
        let listed = list::run(&session).unwrap().listed_notes;
        let texts: Vec<&str> = listed.iter().map(|dn| dn.note.text.as_str()).collect();
        assert_eq!(texts, vec!["2+2", "not math"]);
        assert!(reporter.notices().is_empty());
    }
}
