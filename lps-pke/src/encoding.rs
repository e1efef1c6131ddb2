use crate::error::{LpsError, LpsResult};

/// Splits a byte into 8 bits, least significant first
pub fn byte_to_bits(byte: u8) -> [u8; 8] {
    let mut bits = [0u8; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> i) & 1;
    }
    bits
}

/// Packs up to 8 bits, least significant first, into a byte
pub fn bits_to_byte(bits: &[u8]) -> u8 {
    bits.iter()
        .take(8)
        .rev()
        .fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}

/// Converts text to bits via its UTF-8 bytes
pub fn string_to_bits(text: &str) -> Vec<u8> {
    text.as_bytes()
        .iter()
        .flat_map(|&byte| byte_to_bits(byte))
        .collect()
}

/// Packs bits into bytes. A trailing group shorter than 8 bits is dropped
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8).map(bits_to_byte).collect()
}

/// Converts bits back to text, failing on invalid UTF-8
pub fn bits_to_string(bits: &[u8]) -> LpsResult<String> {
    String::from_utf8(bits_to_bytes(bits))
        .map_err(|e| LpsError::MalformedInput(format!("decrypted block is not UTF-8: {}", e)))
}

/// Converts text to exactly one block of `k` bits
pub fn string_to_block(text: &str, k: usize) -> LpsResult<Vec<u8>> {
    let bits = string_to_bits(text);
    if bits.len() != k {
        return Err(LpsError::length_mismatch("text block (bits)", k, bits.len()));
    }
    Ok(bits)
}
