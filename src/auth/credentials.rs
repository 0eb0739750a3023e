// Allow dead code: infrastructure methods for the full credential lifecycle
#![allow(dead_code)]

//! OS keychain storage for the remembered password.
//!
//! Entirely optional convenience for the login form: entries are keyed by
//! the account email, and every failure here is recoverable (the form
//! simply prompts instead).

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "latchkey";

pub struct CredentialStore;

impl CredentialStore {
    /// Remember the password for an email in the OS keychain
    pub fn remember(email: &str, password: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve the remembered password for an email
    pub fn recall(email: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Drop the remembered password for an email
    pub fn forget(email: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        Ok(())
    }

    /// Check whether a password is remembered for an email
    pub fn has_password(email: &str) -> bool {
        Entry::new(SERVICE_NAME, email)
            .map(|entry| entry.get_password().is_ok())
            .unwrap_or(false)
    }
}
