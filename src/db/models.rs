use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::auth::password::PasswordHash;

/// A row of the `users` table, secret material included.
#[derive(Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub hash_iterations: i32,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: String, email: String, password: PasswordHash) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: password.hash,
            salt: password.salt,
            // PasswordHasher clamps the work factor to i32::MAX
            hash_iterations: i32::try_from(password.iterations).unwrap_or(i32::MAX),
            created_at: Utc::now(),
        }
    }

    /// `None` when the stored work factor is not positive.
    pub fn password(&self) -> Option<PasswordHash> {
        let iterations = u32::try_from(self.hash_iterations).ok().filter(|n| *n > 0)?;
        Some(PasswordHash {
            hash: self.password_hash.clone(),
            salt: self.salt.clone(),
            iterations,
        })
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("hash_iterations", &self.hash_iterations)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The public view of a user, without any credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
