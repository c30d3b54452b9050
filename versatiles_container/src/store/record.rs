//! The tile-store contract's value types (§4.D): what `getTile` returns, what
//! `getMetadata`/`updateMetadata` exchange, and what `tileExtraInfo` reports.

use anyhow::Result;
use std::collections::BTreeMap;
use versatiles_core::{
	TileScheme,
	json::{JsonObject, JsonValue},
	tilejson::TileJSON,
};

/// A tile as returned by a store's `getTile`: raw bytes plus the headers a
/// byte-magic sniff of those bytes produces (§3, §4.B).
#[derive(Debug, Clone)]
pub struct TileRecord {
	pub data: Vec<u8>,
	pub content_type: &'static str,
	pub content_encoding: Option<&'static str>,
}

impl TileRecord {
	#[must_use]
	pub fn from_bytes(data: Vec<u8>) -> TileRecord {
		let detected = versatiles_core::detect_format(&data);
		TileRecord {
			data,
			content_type: detected.content_type,
			content_encoding: detected.content_encoding,
		}
	}
}

/// Either an md5 hash or a creation timestamp, as `tileExtraInfo` reports per
/// tile, never both (§4.D).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraInfoValue {
	Hash(String),
	Created(i64),
}

/// A map keyed by `z/x/y` (as a slash-joined string, matching the tile name
/// convention in §3) to either a hash or a created timestamp.
pub type ExtraInfoMap = BTreeMap<String, ExtraInfoValue>;

#[must_use]
pub fn tile_name(level: u8, x: u32, y: u32) -> String {
	format!("{level}/{x}/{y}")
}

/// `getMetadata`/`updateMetadata`'s payload (§4.D): the well-known TileJSON
/// keys plus the store's row/column orientation. Round-trips through
/// [`TileJSON`] so the merge/default-fill logic the reader/writer pipeline
/// already has for TileJSON (`TileJSON::merge`, `TileJSON::update_from_pyramid`)
/// is reused rather than re-implemented for the store boundary.
#[derive(Debug, Clone, Default)]
pub struct TileMetadata {
	pub tilejson: TileJSON,
	pub scheme: TileScheme,
}

impl TileMetadata {
	#[must_use]
	pub fn new(tilejson: TileJSON, scheme: TileScheme) -> TileMetadata {
		TileMetadata { tilejson, scheme }
	}

	/// Applies `patch` on top of `self`, mirroring `TileJSON::merge`'s
	/// last-writer-wins semantics for overlapping keys.
	pub fn apply_patch(&mut self, patch: &TileMetadata) -> Result<()> {
		self.tilejson.merge(&patch.tilejson)?;
		self.scheme = patch.scheme;
		Ok(())
	}

	/// Serializes the well-known keys into `(name, value)` pairs for a
	/// key-value metadata table (§4.D.1/4.D.2/4.D.3).
	#[must_use]
	pub fn as_rows(&self) -> Vec<(String, String)> {
		let mut rows: Vec<(String, String)> = self
			.tilejson
			.as_object()
			.0
			.into_iter()
			.map(|(k, v)| (k, v.stringify()))
			.collect();
		rows.push(("scheme".to_string(), self.scheme.to_string()));
		rows
	}

	/// Rebuilds a `TileMetadata` from the `(name, value)` rows a key-value
	/// metadata table yields (§4.D.1/4.D.2/4.D.3). Each value is re-parsed as
	/// JSON when possible (recovering arrays like `bounds`/`center` and
	/// structured `vector_layers`), falling back to a plain JSON string
	/// otherwise; `scheme` is handled separately since it is not TileJSON.
	pub fn from_rows(rows: &[(String, String)]) -> Result<TileMetadata> {
		let mut object = JsonObject::new();
		let mut scheme = TileScheme::default();
		for (name, value) in rows {
			if name == "scheme" {
				if let Some(parsed) = TileScheme::parse_str(value) {
					scheme = parsed;
				}
				continue;
			}
			let json = JsonValue::parse_str(value).unwrap_or_else(|_| JsonValue::String(value.clone()));
			object.0.insert(name.clone(), json);
		}
		Ok(TileMetadata {
			tilejson: TileJSON::from_object(&object)?,
			scheme,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tile_record_detects_format_from_bytes() {
		let record = TileRecord::from_bytes(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
		assert_eq!(record.content_type, "image/png");
	}

	#[test]
	fn tile_name_is_slash_joined() {
		assert_eq!(tile_name(3, 2, 5), "3/2/5");
	}

	#[test]
	fn rows_round_trip_through_metadata() -> Result<()> {
		let mut meta = TileMetadata::default();
		meta.tilejson.set_string("name", "berlin")?;
		meta.scheme = TileScheme::Tms;

		let rows = meta.as_rows();
		let restored = TileMetadata::from_rows(&rows)?;
		assert_eq!(restored.tilejson.get_string("name").as_deref(), Some("berlin"));
		assert_eq!(restored.scheme, TileScheme::Tms);
		Ok(())
	}

	#[test]
	fn apply_patch_merges_tilejson_and_replaces_scheme() -> Result<()> {
		let mut base = TileMetadata::default();
		base.tilejson.set_string("name", "base")?;

		let mut patch = TileMetadata::default();
		patch.tilejson.set_string("name", "patched")?;
		patch.scheme = TileScheme::Tms;

		base.apply_patch(&patch)?;
		assert_eq!(base.tilejson.get_string("name").as_deref(), Some("patched"));
		assert_eq!(base.scheme, TileScheme::Tms);
		Ok(())
	}
}
