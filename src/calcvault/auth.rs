//! # Authentication Gate
//!
//! Decides whether a submitted username/password pair matches the reference
//! credential held by a [`CredentialStore`].
//!
//! - Either field empty: rejected before the store is consulted.
//! - Both fields must match exactly (case-sensitive, no trimming).
//! - A missing reference credential and a wrong one look the same to the
//!   caller. Only a store failure is reported differently.
//!
//! There is no attempt counting or lockout.

use crate::model::Credential;
use crate::store::CredentialStore;
use log::{debug, error, info};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingFields,
    InvalidCredentials,
    StoreUnavailable,
}

impl RejectReason {
    /// The message shown to the user.
    pub fn user_message(self) -> &'static str {
        match self {
            RejectReason::MissingFields => "Please fill in both username and password.",
            RejectReason::InvalidCredentials => "Username or password is invalid.",
            RejectReason::StoreUnavailable => "An error occurred when trying to log in.",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl LoginOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, LoginOutcome::Accepted)
    }
}

pub struct AuthGate<C: CredentialStore> {
    store: C,
}

impl<C: CredentialStore> AuthGate<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }

    pub fn attempt_login(&self, username: &str, password: &str) -> LoginOutcome {
        if username.is_empty() || password.is_empty() {
            debug!("login rejected: missing fields");
            return LoginOutcome::Rejected(RejectReason::MissingFields);
        }

        match self.store.get() {
            Ok(Some(reference)) if matches(&reference, username, password) => {
                info!("login accepted for {}", username);
                LoginOutcome::Accepted
            }
            Ok(Some(_)) | Ok(None) => {
                info!("login rejected for {}", username);
                LoginOutcome::Rejected(RejectReason::InvalidCredentials)
            }
            Err(e) => {
                error!("Login error: {}", e);
                LoginOutcome::Rejected(RejectReason::StoreUnavailable)
            }
        }
    }

    pub fn store(&self) -> &C {
        &self.store
    }
}

fn matches(reference: &Credential, username: &str, password: &str) -> bool {
    reference.username == username && reference.password == password
}
