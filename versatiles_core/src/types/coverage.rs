//! A coverage (§3) pairs a single zoom level with a geographical bounding box
//! and expands to the tile-range a bulk job or probe enumerates over. The
//! expansion itself is delegated to `TileBBox::from_geo`, which already
//! implements the `lonLatZ -> xyz` math (§4.A); this module only adds the
//! `total`/range bookkeeping the bulk job engine and the CLI need.

use crate::{GeoBBox, TileBBox};
use anyhow::Result;
use versatiles_derive::context;

/// A `(zoom, bbox)` pair that enumerates to a tile range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
	pub zoom: u8,
	pub bbox: GeoBBox,
}

impl Coverage {
	#[must_use]
	pub fn new(zoom: u8, bbox: GeoBBox) -> Coverage {
		Coverage { zoom, bbox }
	}

	/// Expands this coverage into the tile-range it denotes at its zoom level.
	#[context("Failed to expand coverage at zoom {} to a tile range", self.zoom)]
	pub fn to_tile_bbox(&self) -> Result<TileBBox> {
		TileBBox::from_geo(self.zoom, &self.bbox)
	}

	/// `xRange` as `[xMin, xMax]`, per §3/§4.A.
	pub fn x_range(&self) -> Result<[u32; 2]> {
		let bb = self.to_tile_bbox()?;
		Ok([bb.x_min(), bb.x_max()])
	}

	/// `yRange` as `[yMin, yMax]`, per §3/§4.A.
	pub fn y_range(&self) -> Result<[u32; 2]> {
		let bb = self.to_tile_bbox()?;
		Ok([bb.y_min(), bb.y_max()])
	}

	/// `total = (xMax-xMin+1)*(yMax-yMin+1)`, the cardinality a bulk job
	/// counter is initialized from.
	pub fn total(&self) -> Result<u64> {
		Ok(self.to_tile_bbox()?.count_tiles())
	}
}

/// Normalizes a list of coverages into their tile ranges and combined total,
/// as the bulk job engine's first step (§4.H.1) requires.
pub fn normalize_coverages(coverages: &[Coverage]) -> Result<(u64, Vec<(u8, TileBBox)>)> {
	let mut total = 0u64;
	let mut ranges = Vec::with_capacity(coverages.len());
	for coverage in coverages {
		let bb = coverage.to_tile_bbox()?;
		total += bb.count_tiles();
		ranges.push((coverage.zoom, bb));
	}
	Ok((total, ranges))
}
