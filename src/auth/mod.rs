//! Session state and its durable storage.
//!
//! This module provides:
//! - `SessionStore`: the session state machine (login, logout, verify)
//! - `StateStore`: durable `{user, authenticated}` record and bearer token
//! - `CredentialStore`: OS keychain storage for the remembered password
//! - `validate`: login form checks that run before any network call

pub mod credentials;
pub mod storage;
pub mod store;
pub mod validate;

pub use credentials::CredentialStore;
pub use storage::{PersistedSession, StateStore};
pub use store::{Session, SessionStore};
