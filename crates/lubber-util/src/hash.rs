use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `data`. Used as the lockfile's project hash.
pub fn sha256_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
