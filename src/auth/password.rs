//! Salted password hashing.
//!
//! Passwords are stretched with PBKDF2-HMAC-SHA256 under a fresh random salt.
//! The iteration count travels with each stored record so the work factor can
//! be raised later without invalidating existing users.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

/// Default PBKDF2 work factor for newly registered users.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Largest work factor that fits the record's INTEGER column.
pub const MAX_ITERATIONS: u32 = i32::MAX as u32;

/// Salt byte length before base64 encoding.
const SALT_BYTES: usize = 16;

/// Derived key length (SHA-256 output size).
const KEY_BYTES: usize = 32;

/// Salt fed to [`PasswordHasher::burn`]; never matches a stored record.
const DUMMY_SALT: &str = "AAAAAAAAAAAAAAAAAAAAAA==";

/// Hash material persisted alongside a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub hash: String,
    pub salt: String,
    pub iterations: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl PasswordHasher {
    /// The work factor is clamped to `1..=i32::MAX`, the range a record can store.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.clamp(1, MAX_ITERATIONS),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash `password` under a newly generated salt.
    pub fn hash(&self, password: &str) -> PasswordHash {
        let salt = generate_salt();
        let hash = derive(password, &salt, self.iterations);
        PasswordHash {
            hash,
            salt,
            iterations: self.iterations,
        }
    }

    /// Recompute the hash with the stored salt and work factor and compare in
    /// constant time.
    pub fn verify(&self, password: &str, stored: &PasswordHash) -> bool {
        let attempt = derive(password, &stored.salt, stored.iterations.max(1));
        constant_time_eq(attempt.as_bytes(), stored.hash.as_bytes())
    }

    /// Spend the same work as a real verification. Used when the username is
    /// unknown so response time does not reveal which usernames exist.
    pub fn burn(&self, password: &str) {
        let _ = derive(password, DUMMY_SALT, self.iterations);
    }
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    BASE64.encode(bytes)
}

fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; KEY_BYTES];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    BASE64.encode(key)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
