//! Coverage normalization (§3 "Coverage", §4.H step 1): turning a list of
//! `(zoom, bbox)` pairs into per-zoom tile ranges, a total tile count, and a
//! deterministic enumeration order.

use versatiles_core::{GeoBBox, StoreError, TileBBox, TileCoord};

/// One `(zoom, bbox)` pair as accepted from configuration (§3).
#[derive(Debug, Clone, Copy)]
pub struct Coverage {
	pub zoom: u8,
	pub bbox: GeoBBox,
}

/// A coverage expanded to its tile range (§4.A "coverage → tileBound").
#[derive(Debug, Clone, Copy)]
pub struct TileRange {
	pub zoom: u8,
	pub bbox: TileBBox,
}

/// Expands every coverage to a tile range (§4.H step 1). Distinct coverages
/// may overlap; callers that need a total free of double-counting should
/// de-duplicate beforehand — the job engine itself sums ranges as given,
/// matching spec.md's `total = product of the two derived ranges'
/// cardinalities` per coverage.
pub fn normalize_coverages(coverages: &[Coverage]) -> Result<Vec<TileRange>, StoreError> {
	coverages
		.iter()
		.map(|c| {
			TileBBox::from_geo(c.zoom, &c.bbox)
				.map(|bbox| TileRange { zoom: c.zoom, bbox })
				.map_err(StoreError::Other)
		})
		.collect()
}

#[must_use]
pub fn total_tiles(ranges: &[TileRange]) -> u64 {
	ranges.iter().map(|r| r.bbox.count_tiles()).sum()
}

/// Enumerates every tile in every range, in ascending-zoom, row-major order
/// within each range (§4.H "Scheduling fairness"). The per-range order comes
/// straight from `TileBBox::iter_coords`, the same order every other reader
/// in this workspace uses.
pub fn enumerate(ranges: &[TileRange]) -> impl Iterator<Item = TileCoord> + '_ {
	ranges.iter().flat_map(|r| r.bbox.iter_coords())
}
