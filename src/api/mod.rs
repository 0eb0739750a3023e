//! HTTP client module for the backend auth endpoints.
//!
//! The backend exposes three operations under a configurable base URL:
//! login (POST `/auth/login`), logout (POST `/auth/logout`), and verify
//! (GET `/auth/me` with a bearer token). Every outcome is a tagged result;
//! nothing here panics across the module boundary.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{AuthClient, LoginResponse};
pub use error::ApiError;
