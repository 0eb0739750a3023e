//! Application glue: wires config, session store, gateway, and guard into
//! the interactive command loop.
//!
//! Everything here is presentational. State transitions live in
//! `auth::store`; this module only decides what to print and which
//! operation to invoke next.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::AuthClient;
use crate::auth::{validate, CredentialStore, SessionStore, StateStore};
use crate::config::Config;
use crate::guard::{RouteDecision, RouteGuard};

/// Location of the protected page, the only destination in this app
const PROTECTED_PATH: &str = "/";

pub struct App {
    config: Config,
    store: SessionStore,
    api: AuthClient,
    guard: RouteGuard,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let api = AuthClient::new(config.api_base_url()).context("Failed to build HTTP client")?;
        let storage = StateStore::new(config.state_dir()?)?;
        let store = SessionStore::open(storage);

        Ok(Self {
            config,
            store,
            api,
            guard: RouteGuard::new(),
        })
    }

    /// Route every pass through the guard until the user quits. The first
    /// pass always lands in the Loading arm, which runs the one startup
    /// verify of the application's lifetime.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.guard.evaluate(self.store.session(), PROTECTED_PATH) {
                RouteDecision::Placeholder => {
                    println!("Checking session...");
                    self.store.verify(&self.api).await?;
                }
                RouteDecision::Render => {
                    self.render_protected_page();
                    if !self.protected_prompt().await? {
                        return Ok(());
                    }
                }
                RouteDecision::RedirectToLogin { from } => {
                    info!(from = %from, "Redirecting to login");
                    if !self.login_form().await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    // =========================================================================
    // Login form
    // =========================================================================

    /// Prompt for credentials until a login succeeds or the user quits.
    /// Returns false to quit the app.
    async fn login_form(&mut self) -> Result<bool> {
        println!("\n=== Sign in ===");
        println!("(press Enter on an empty email to quit)\n");

        loop {
            let default_email = self.config.last_email.clone();
            let email = match &default_email {
                Some(last) => {
                    let input = Self::prompt(&format!("Email [{}]: ", last))?;
                    if input.is_empty() {
                        last.clone()
                    } else {
                        input
                    }
                }
                None => {
                    let input = Self::prompt("Email: ")?;
                    if input.is_empty() {
                        return Ok(false);
                    }
                    input
                }
            };

            let username = Self::prompt("Username (optional, sign-up only): ")?;
            let username = (!username.is_empty()).then_some(username);

            let password = if CredentialStore::has_password(&email) {
                let input = rpassword::prompt_password("Password [stored]: ")?;
                if input.is_empty() {
                    CredentialStore::recall(&email)?
                } else {
                    input
                }
            } else {
                rpassword::prompt_password("Password: ")?
            };

            if let Err(errors) = validate::validate_login(&email, &password, username.as_deref()) {
                for message in errors.messages() {
                    println!("  ! {}", message);
                }
                continue;
            }

            println!("\nSigning in...");
            self.store.set_loading(true);
            let outcome = self.api.login(&email, &password, username.as_deref()).await;
            self.store.set_loading(false);

            match outcome {
                Ok(login) => {
                    self.store.login(&login.token, login.user)?;

                    if let Err(e) = CredentialStore::remember(&email, &password) {
                        warn!(error = %e, "Failed to store credentials");
                    }

                    self.config.last_email = Some(email);
                    if let Err(e) = self.config.save() {
                        warn!(error = %e, "Failed to save config");
                    }

                    info!("Login successful");
                    println!("Login successful!");
                    if let Some(location) = self.guard.take_return_location() {
                        println!("Returning to {}", location);
                    }
                    return Ok(true);
                }
                Err(e) => {
                    warn!(error = %e, "Login failed");
                    println!("  ! {}", e.user_message());
                }
            }
        }
    }

    // =========================================================================
    // Protected page
    // =========================================================================

    fn render_protected_page(&self) {
        let session = self.store.session();
        println!("\n=== Home ===");
        if let Some(ref user) = session.user {
            println!("Welcome back, {}!", user.display_name());
            if let Some(ref email) = user.email {
                println!("Signed in as {}", email);
            }
        }
        println!("This page is only visible with a live session.");
    }

    /// Command prompt on the protected page. Returns false to quit.
    async fn protected_prompt(&mut self) -> Result<bool> {
        loop {
            let command = Self::prompt("\n[logout/quit]> ")?;
            match command.as_str() {
                "logout" => {
                    self.store.logout(&self.api).await?;
                    println!("Signed out.");
                    return Ok(true);
                }
                "quit" | "exit" | "q" => return Ok(false),
                "" => return Ok(true),
                other => println!("Unknown command: {}", other),
            }
        }
    }

    fn prompt(label: &str) -> Result<String> {
        print!("{}", label);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}
