//! Stable string hashing for generated identifiers.
//!
//! Identifiers end up in published URLs and file names, so the hash must be
//! identical across processes, platforms, and releases.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `s`
fn fnv1a_32(s: &str) -> u32 {
    s.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Compute the web- and file-safe hash of a string.
///
/// The 32-bit hash is printed as decimal, then URL-safe base64 encoded
/// without padding.
pub fn compute_hash(s: &str) -> String {
    let decimal = fnv1a_32(s).to_string();
    URL_SAFE_NO_PAD.encode(decimal.as_bytes())
}
