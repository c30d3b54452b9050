//! MD5 hashing of tile bodies.
//!
//! Stores record an MD5 hex digest alongside each tile so that bulk jobs can
//! drive a hash-based refresh predicate (§4.H) without re-fetching or
//! re-rendering tiles whose content hasn't changed.

use md5::{Digest, Md5};

/// Returns the lowercase 32-character hex MD5 digest of `data`.
///
/// # Examples
/// ```
/// use versatiles_core::utils::md5_hex;
/// assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
	let mut hasher = Md5::new();
	hasher.update(data);
	let digest = hasher.finalize();
	digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hashes_known_value() {
		assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
	}

	#[test]
	fn empty_input() {
		assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
	}

	#[test]
	fn deterministic() {
		assert_eq!(md5_hex(b"same"), md5_hex(b"same"));
		assert_ne!(md5_hex(b"same"), md5_hex(b"different"));
	}
}
