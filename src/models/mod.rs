//! Data models for records returned by the auth backend.

pub mod user;

pub use user::User;
