//! `putTile`'s `storeTransparent=false` check (§4.D): a fully transparent PNG
//! is dropped instead of persisted. Delegates the actual pixel scan to
//! [`crate::Tile::is_empty`], which already fast-paths formats without an
//! alpha channel; this module only decides which payloads are worth asking.

use crate::Tile;
use versatiles_core::{TileCompression, detect_format, TileFormat};

/// `true` only for payloads that sniff as PNG or WebP *and* turn out to be
/// fully transparent. Any other format (including a sniff failure) is never
/// suppressed — only raster formats with an alpha channel can be empty.
#[must_use]
pub fn is_fully_transparent_png(data: &[u8]) -> bool {
	let detected = detect_format(data);
	if !matches!(detected.format, TileFormat::PNG | TileFormat::WEBP) {
		return false;
	}
	let mut tile = Tile::from_blob(data.to_vec().into(), TileCompression::Uncompressed, detected.format);
	tile.is_empty().unwrap_or(false)
}
