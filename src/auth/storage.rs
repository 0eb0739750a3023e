//! Durable session storage.
//!
//! Two records with independent lifetimes live in the state directory:
//! `auth-storage.json` holds the persisted `{user, authenticated}` subset,
//! and the bearer token sits under its own key so the transport layer can
//! consume it directly. The `loading` flag is never written to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Persisted session record file name in the state directory
const STATE_FILE: &str = "auth-storage.json";

/// Bearer token file name in the state directory
const TOKEN_FILE: &str = "token";

/// Durable subset of the session state.
///
/// Deliberately narrower than the in-memory state: `loading` and the token
/// have no field here, so the durable schema cannot silently absorb them.
/// `Session::persisted` is the only projection into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: Option<User>,
    pub authenticated: bool,
}

/// On-disk envelope for the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Stamped<T> {
    data: T,
    saved_at: DateTime<Utc>,
}

pub struct StateStore {
    state_dir: PathBuf,
}

impl StateStore {
    pub fn new(state_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&state_dir)?;
        Ok(Self { state_dir })
    }

    /// Load the persisted session record, if one exists.
    pub fn load_session(&self) -> Result<Option<PersistedSession>> {
        let path = self.record_path(STATE_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            std::fs::read_to_string(&path).context("Failed to read session record")?;
        let stamped: Stamped<PersistedSession> =
            serde_json::from_str(&contents).context("Failed to parse session record")?;
        Ok(Some(stamped.data))
    }

    /// Write the persisted session record.
    pub fn save_session(&self, session: &PersistedSession) -> Result<()> {
        let stamped = Stamped {
            data: session.clone(),
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&stamped)?;
        std::fs::write(self.record_path(STATE_FILE), contents)?;
        Ok(())
    }

    /// Read the stored bearer token, if one exists.
    pub fn load_token(&self) -> Result<Option<String>> {
        let path = self.record_path(TOKEN_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let token = std::fs::read_to_string(&path).context("Failed to read token")?;
        let token = token.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    /// Write the bearer token under its own key.
    pub fn save_token(&self, token: &str) -> Result<()> {
        std::fs::write(self.record_path(TOKEN_FILE), token).context("Failed to write token")
    }

    /// Delete the stored bearer token. Missing token is not an error.
    pub fn clear_token(&self) -> Result<()> {
        let path = self.record_path(TOKEN_FILE);
        if path.exists() {
            std::fs::remove_file(path).context("Failed to delete token")?;
        }
        Ok(())
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.state_dir.join(name)
    }
}
