//! `AssetKind` (§4.I, §9 Design Note): the path layout and validation rule
//! that distinguishes style/sprite/font/geojson assets, leaving the actual
//! read/cache-write/download mechanics to the generic [`super::AssetCache`]
//! that's instantiated once per kind — mirroring how `versatiles_image::format`
//! is one generic codec interface instantiated per image format.

use std::path::PathBuf;
use versatiles_core::StoreError;

/// One member of the `{styles, sprites, fonts, geojsons}` quartet (§3).
///
/// `part_path`/`part_count` describe the on-disk layout per asset id: a style
/// or geojson has a single part, a sprite has up to four (json/png, each
/// optionally at `@2x`), a font has 256 fixed byte-range files.
pub trait AssetKind: Send + Sync {
	/// Human-readable label used in log lines and error messages.
	const NAME: &'static str;

	/// Number of file parts that make up one asset id of this kind.
	fn part_count() -> usize;

	/// Relative path (under an asset's root or cache root) of part `index`
	/// for asset `id`.
	fn part_path(id: &str, index: usize) -> PathBuf;

	/// Validates the raw bytes of part `index` (§4.I `validate`).
	fn validate_part(index: usize, data: &[u8]) -> Result<(), StoreError>;
}

/// A style's single `style.json` document (§3, §6). Content is a style
/// document whose schema this core does not define (§1 Non-goals); `validate`
/// only checks that the bytes are a well-formed JSON object.
pub struct StyleKind;

impl AssetKind for StyleKind {
	const NAME: &'static str = "style";

	fn part_count() -> usize {
		1
	}

	fn part_path(id: &str, _index: usize) -> PathBuf {
		PathBuf::from(id).join("style.json")
	}

	fn validate_part(_index: usize, data: &[u8]) -> Result<(), StoreError> {
		validate_json_object(data)
	}
}

/// A single GeoJSON document (§3, §4.I). `validate` additionally checks the
/// feature-family rule: every feature's geometry must fall into one of the
/// `{polygon, line, circle}` families §4.I names.
pub struct GeoJsonKind;

impl AssetKind for GeoJsonKind {
	const NAME: &'static str = "geojson";

	fn part_count() -> usize {
		1
	}

	fn part_path(id: &str, _index: usize) -> PathBuf {
		PathBuf::from(format!("{id}.geojson"))
	}

	fn validate_part(_index: usize, data: &[u8]) -> Result<(), StoreError> {
		super::geojson::validate_feature_families(data)
	}
}

/// A sprite sheet: `index.json`/`sheet.png` pairs, optionally repeated at
/// `@2x` (§3). Parts `0`/`1` are the 1x json/png, `2`/`3` are the `@2x` pair.
pub struct SpriteKind;

impl SpriteKind {
	/// `true` for the two PNG parts (odd indices), `false` for the two JSON
	/// parts (even indices).
	fn is_image_part(index: usize) -> bool {
		index % 2 == 1
	}
}

impl AssetKind for SpriteKind {
	const NAME: &'static str = "sprite";

	fn part_count() -> usize {
		4
	}

	fn part_path(id: &str, index: usize) -> PathBuf {
		let suffix = if index >= 2 { "@2x" } else { "" };
		let file = if Self::is_image_part(index) {
			format!("sprite{suffix}.png")
		} else {
			format!("sprite{suffix}.json")
		};
		PathBuf::from(id).join(file)
	}

	fn validate_part(index: usize, data: &[u8]) -> Result<(), StoreError> {
		if Self::is_image_part(index) {
			if versatiles_core::detect_format(data).format == versatiles_core::TileFormat::PNG {
				Ok(())
			} else {
				Err(StoreError::FormatInvalid)
			}
		} else {
			validate_json_object(data)
		}
	}
}

/// A font's 256 fixed glyph-range files, `N-(N+255).pbf` for
/// `N ∈ [0, 65280]` step `256` (§3, §6).
pub struct FontKind;

impl FontKind {
	pub const RANGE_STEP: u32 = 256;
	pub const RANGE_COUNT: usize = 256;
}

impl AssetKind for FontKind {
	const NAME: &'static str = "font";

	fn part_count() -> usize {
		Self::RANGE_COUNT
	}

	fn part_path(id: &str, index: usize) -> PathBuf {
		let start = index as u32 * Self::RANGE_STEP;
		let end = start + Self::RANGE_STEP - 1;
		PathBuf::from(id).join(format!("{start}-{end}.pbf"))
	}

	fn validate_part(_index: usize, _data: &[u8]) -> Result<(), StoreError> {
		// No magic-byte family is specified for a glyph-range PBF (§4.I only
		// names JSON-schema and PNG checks); presence is the only contract.
		Ok(())
	}
}

fn validate_json_object(data: &[u8]) -> Result<(), StoreError> {
	let text = std::str::from_utf8(data).map_err(|e| StoreError::SchemaInvalid(e.to_string()))?;
	match versatiles_core::json::parse_json_str(text) {
		Ok(versatiles_core::json::JsonValue::Object(_)) => Ok(()),
		Ok(_) => Err(StoreError::SchemaInvalid("expected a JSON object".to_string())),
		Err(e) => Err(StoreError::SchemaInvalid(e.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn style_is_a_single_part() {
		assert_eq!(StyleKind::part_count(), 1);
		assert_eq!(StyleKind::part_path("basic", 0), PathBuf::from("basic/style.json"));
	}

	#[test]
	fn sprite_parts_alternate_json_and_png_with_2x_suffix() {
		assert_eq!(SpriteKind::part_path("streets", 0), PathBuf::from("streets/sprite.json"));
		assert_eq!(SpriteKind::part_path("streets", 1), PathBuf::from("streets/sprite.png"));
		assert_eq!(SpriteKind::part_path("streets", 2), PathBuf::from("streets/sprite@2x.json"));
		assert_eq!(SpriteKind::part_path("streets", 3), PathBuf::from("streets/sprite@2x.png"));
	}

	#[test]
	fn font_has_256_fixed_ranges() {
		assert_eq!(FontKind::part_count(), 256);
		assert_eq!(FontKind::part_path("noto", 0), PathBuf::from("noto/0-255.pbf"));
		assert_eq!(FontKind::part_path("noto", 255), PathBuf::from("noto/65280-65535.pbf"));
	}

	#[test]
	fn style_validate_accepts_object_rejects_array() {
		assert!(StyleKind::validate_part(0, b"{\"version\":8}").is_ok());
		assert!(StyleKind::validate_part(0, b"[1,2,3]").is_err());
	}

	#[test]
	fn sprite_validate_checks_png_magic_on_image_parts() {
		let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
		assert!(SpriteKind::validate_part(1, &png).is_ok());
		assert!(SpriteKind::validate_part(1, b"not a png").is_err());
	}
}
