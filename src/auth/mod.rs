//! Credential verification and registration.
//!
//! The gateway validates input, hashes passwords and delegates persistence
//! to a [`UserStore`](crate::db::UserStore).

mod gateway;
pub mod password;
pub mod validation;

pub use gateway::CredentialGateway;
pub use password::{PasswordHash, PasswordHasher};
