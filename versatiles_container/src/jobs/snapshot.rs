//! Destination extra-info snapshot (§4.H step 4): one `tileExtraInfo` call
//! per coverage range, taken once before a job starts driving tile tasks,
//! so every per-tile refresh check is an in-memory lookup rather than a
//! store round-trip.

use super::coverage::TileRange;
use crate::store::{ExtraInfoValue, TileStore};
use std::collections::HashMap;
use versatiles_core::{StoreError, TileCoord};

/// A flattened view of one or more `tileExtraInfo` results, keyed by
/// `(level, x, y)` for O(1) lookup from a tile task.
#[derive(Debug, Default, Clone)]
pub struct ExtraInfoSnapshot {
	entries: HashMap<(u8, u32, u32), ExtraInfoValue>,
}

impl ExtraInfoSnapshot {
	/// Takes a snapshot of `store`'s extra-info over every range (§4.H step 4).
	pub async fn take(store: &TileStore, ranges: &[TileRange], by_created: bool) -> Result<ExtraInfoSnapshot, StoreError> {
		let mut entries = HashMap::new();
		for range in ranges {
			let map = store.tile_extra_info(range.zoom, &range.bbox, by_created).await?;
			for (name, value) in map {
				if let Some(coord) = parse_tile_name(&name) {
					entries.insert((coord.level, coord.x, coord.y), value);
				}
			}
		}
		Ok(ExtraInfoSnapshot { entries })
	}

	#[must_use]
	pub fn created(&self, coord: TileCoord) -> Option<i64> {
		match self.entries.get(&(coord.level, coord.x, coord.y)) {
			Some(ExtraInfoValue::Created(c)) => Some(*c),
			_ => None,
		}
	}

	#[must_use]
	pub fn hash(&self, coord: TileCoord) -> Option<&str> {
		match self.entries.get(&(coord.level, coord.x, coord.y)) {
			Some(ExtraInfoValue::Hash(h)) => Some(h.as_str()),
			_ => None,
		}
	}
}

fn parse_tile_name(name: &str) -> Option<TileCoord> {
	let mut parts = name.split('/');
	let level: u8 = parts.next()?.parse().ok()?;
	let x: u32 = parts.next()?.parse().ok()?;
	let y: u32 = parts.next()?.parse().ok()?;
	TileCoord::new(level, x, y).ok()
}
