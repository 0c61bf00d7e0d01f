//! Iterated SHA-256 password digests.

use sha2::{Digest, Sha256};

/// Number of SHA-256 rounds applied to every credential.
pub const HASH_ROUNDS: usize = 10_000;

/// Turns plaintext passwords into the 64-character hex digests kept in the
/// `users.password` column.
///
/// Each round writes the previous round's hex output into one running
/// SHA-256 state and reads the digest of everything written so far. The
/// state is never reset, so digests stored by earlier deployments keep
/// verifying.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self
    }

    /// Digest a plaintext password.
    pub fn hash(&self, plaintext: &str) -> String {
        let mut sha = Sha256::new();
        let mut result = plaintext.to_owned();
        for _ in 0..HASH_ROUNDS {
            sha.update(result.as_bytes());
            result = hex::encode(sha.clone().finalize());
        }
        result
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        self.matches(&self.hash(plaintext), digest)
    }

    /// Compare two digests in constant time.
    pub fn matches(&self, digest: &str, stored: &str) -> bool {
        constant_time_eq(digest.as_bytes(), stored.as_bytes())
    }
}

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
