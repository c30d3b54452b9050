//! The process-wide repository (§3): maps identifiers to store handles and
//! asset records for each of the five kinds (`styles`, `geojsons`, `datas`,
//! `sprites`, `fonts`). Populated once at startup; background jobs only ever
//! mutate a store's own metadata, never this registry's key set — a reload
//! replaces the whole process instead (§3).

use crate::{
	assets::{AssetCache, FontKind, GeoJsonKind, SpriteKind, StyleKind},
	read_pipeline::TileReadPipeline,
};
use dashmap::DashMap;
use std::sync::Arc;
use versatiles_core::StoreError;

/// The registry itself. Each field is keyed by the asset/data id unique
/// within that kind (§3); lookups are read-mostly after startup, so a
/// concurrent map trades a little write overhead for lock-free reads.
#[derive(Default)]
pub struct Repository {
	pub styles: DashMap<String, Arc<AssetCache<StyleKind>>>,
	pub sprites: DashMap<String, Arc<AssetCache<SpriteKind>>>,
	pub fonts: DashMap<String, Arc<AssetCache<FontKind>>>,
	pub geojsons: DashMap<String, Arc<AssetCache<GeoJsonKind>>>,
	pub datas: DashMap<String, Arc<TileReadPipeline>>,
}

impl Repository {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert_style(&self, id: impl Into<String>, cache: AssetCache<StyleKind>) {
		self.styles.insert(id.into(), Arc::new(cache));
	}

	pub fn insert_sprite(&self, id: impl Into<String>, cache: AssetCache<SpriteKind>) {
		self.sprites.insert(id.into(), Arc::new(cache));
	}

	pub fn insert_font(&self, id: impl Into<String>, cache: AssetCache<FontKind>) {
		self.fonts.insert(id.into(), Arc::new(cache));
	}

	pub fn insert_geojson(&self, id: impl Into<String>, cache: AssetCache<GeoJsonKind>) {
		self.geojsons.insert(id.into(), Arc::new(cache));
	}

	pub fn insert_data(&self, id: impl Into<String>, pipeline: TileReadPipeline) {
		self.datas.insert(id.into(), Arc::new(pipeline));
	}

	pub fn style(&self, id: &str) -> Result<Arc<AssetCache<StyleKind>>, StoreError> {
		self.styles.get(id).map(|e| e.value().clone()).ok_or(StoreError::NotFound)
	}

	pub fn sprite(&self, id: &str) -> Result<Arc<AssetCache<SpriteKind>>, StoreError> {
		self.sprites.get(id).map(|e| e.value().clone()).ok_or(StoreError::NotFound)
	}

	pub fn font(&self, id: &str) -> Result<Arc<AssetCache<FontKind>>, StoreError> {
		self.fonts.get(id).map(|e| e.value().clone()).ok_or(StoreError::NotFound)
	}

	pub fn geojson(&self, id: &str) -> Result<Arc<AssetCache<GeoJsonKind>>, StoreError> {
		self.geojsons.get(id).map(|e| e.value().clone()).ok_or(StoreError::NotFound)
	}

	pub fn data(&self, id: &str) -> Result<Arc<TileReadPipeline>, StoreError> {
		self.datas.get(id).map(|e| e.value().clone()).ok_or(StoreError::NotFound)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_id_is_not_found() {
		let repo = Repository::new();
		assert!(matches!(repo.style("missing"), Err(StoreError::NotFound)));
		assert!(matches!(repo.data("missing"), Err(StoreError::NotFound)));
	}
}
