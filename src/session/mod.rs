//! Login and session persistence.
//!
//! Credentials are verified against the roster's Argon2 hashes. A
//! [`Session`] holds the resulting [`Identity`] and persists it through a
//! swappable [`SessionStore`].

mod identity;
mod manager;
mod store;

pub use identity::{Identity, authenticate, hash_credential, verify_credential};
pub use manager::Session;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
