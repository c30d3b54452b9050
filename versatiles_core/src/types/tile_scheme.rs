//! The two row-numbering conventions used by tile stores: `XYZ` (origin at the
//! top-left, row increases downward) and `TMS` (origin at the bottom-left, row
//! increases upward).
//!
//! Internal pipeline code always works in `XYZ`; `TileScheme::flip_y` is the
//! single place a store that persists `TMS` rows converts at its boundary.

use std::fmt::{self, Display};

/// Row-numbering convention of a tile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileScheme {
	#[default]
	Xyz,
	Tms,
}

impl TileScheme {
	/// Flips a single tile row between `XYZ` and `TMS` at the given zoom level.
	///
	/// `TMS` is `XYZ` is its own inverse: applying it twice returns the original
	/// row, which is invariant #3 of the testable properties.
	///
	/// # Examples
	/// ```
	/// use versatiles_core::TileScheme;
	/// assert_eq!(TileScheme::Tms.flip_y(3, 5), 2);
	/// assert_eq!(TileScheme::Xyz.flip_y(3, 5), 5);
	/// ```
	#[must_use]
	pub fn flip_y(self, level: u8, y: u32) -> u32 {
		match self {
			TileScheme::Xyz => y,
			TileScheme::Tms => (1u32 << u32::from(level)) - 1 - y,
		}
	}

	pub fn parse_str(value: &str) -> Option<TileScheme> {
		match value.to_lowercase().as_str() {
			"xyz" => Some(TileScheme::Xyz),
			"tms" => Some(TileScheme::Tms),
			_ => None,
		}
	}
}

impl Display for TileScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			TileScheme::Xyz => "xyz",
			TileScheme::Tms => "tms",
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flip_is_involution() {
		for level in 0u8..8 {
			let max = 1u32 << u32::from(level);
			for y in 0..max {
				let flipped = TileScheme::Tms.flip_y(level, y);
				assert_eq!(TileScheme::Tms.flip_y(level, flipped), y);
			}
		}
	}

	#[test]
	fn xyz_is_identity() {
		assert_eq!(TileScheme::Xyz.flip_y(10, 123), 123);
	}

	#[test]
	fn parse() {
		assert_eq!(TileScheme::parse_str("XYZ"), Some(TileScheme::Xyz));
		assert_eq!(TileScheme::parse_str("tms"), Some(TileScheme::Tms));
		assert_eq!(TileScheme::parse_str("wat"), None);
	}
}
