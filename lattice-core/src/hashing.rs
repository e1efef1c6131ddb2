use sha3::{Digest, Sha3_256};

/// Provides a SHA3-256 hash of the given data
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, data);

    hasher.finalize().into()
}

/// Hex-encoded SHA3-256 digest, used to identify serialized keys
pub fn fingerprint(data: &[u8]) -> String {
    hex::encode(sha3_256(data))
}
