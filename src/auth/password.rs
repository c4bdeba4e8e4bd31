/**
 * Password Hashing
 *
 * One-way hashing and verification of user passwords via bcrypt. The
 * cost factor makes hashing deliberately expensive; the salt lives
 * inside the produced digest.
 *
 * A mismatch during verification is a normal `Ok(false)`; only a
 * malformed digest or a failure inside the primitive is an error.
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a plaintext password against a stored digest. Comparison is
/// constant-time inside bcrypt.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(plain, hashed)
}
