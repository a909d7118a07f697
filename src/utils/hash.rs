//! Hashing utilities using FxHash.
//!
//! Used to derive short, deterministic cache keys from settings content.
//!
//! ```ignore
//! let fp = hash::fingerprint_list(&["theme-style", "fonts"]); // -> "a1b2c3d4"
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Fingerprint an ordered list of strings as 8 hex chars.
///
/// Items are length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut hasher = FxHasher::default();
    for item in items {
        let item = item.as_ref();
        hasher.write_usize(item.len());
        hasher.write(item.as_bytes());
    }
    format!("{:016x}", hasher.finish())[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint_list(&["abc"]), fingerprint_list(&["abc"]));
        assert_eq!(fingerprint_list(&["abc"]).len(), 8);
        assert_ne!(fingerprint_list(&["abc"]), fingerprint_list(&["abd"]));
    }

    #[test]
    fn test_fingerprint_list_boundaries() {
        assert_ne!(fingerprint_list(&["ab", "c"]), fingerprint_list(&["a", "bc"]));
        assert_eq!(fingerprint_list::<&str>(&[]).len(), 8);
    }
}
