//! Generic asset cache (§4.I): one instantiation per `AssetKind` gives every
//! quartet member (style/sprite/font/geojson, §3) the same
//! read/cache-write/download/validate mechanics, the way `versatiles_image`
//! instantiates one codec interface per image format.

use super::AssetKind;
use std::{
	marker::PhantomData,
	path::{Path, PathBuf},
	time::Duration,
};
use versatiles_core::{StoreError, io::write_locked};

/// One asset record (§3: `{path, sourceURL?, storeCache, created}`), generic
/// over its `AssetKind`.
///
/// `root` holds the authoritative copy (checked in to configuration);
/// `cache_root`, present only when `source_url` is set and `store_cache` is
/// `true`, holds origin-forwarded parts fetched on demand.
pub struct AssetCache<K: AssetKind> {
	root: PathBuf,
	cache_root: Option<PathBuf>,
	source_url: Option<String>,
	store_cache: bool,
	_kind: PhantomData<K>,
}

impl<K: AssetKind> AssetCache<K> {
	#[must_use]
	pub fn new(root: PathBuf, cache_root: Option<PathBuf>, source_url: Option<String>, store_cache: bool) -> Self {
		Self {
			root,
			cache_root,
			source_url,
			store_cache,
			_kind: PhantomData,
		}
	}

	/// Reads part `index` of asset `id`: the local copy first, then the
	/// cached origin-forwarded copy, `StoreError::NotFound` otherwise.
	pub async fn read(&self, id: &str, index: usize) -> Result<Vec<u8>, StoreError> {
		let local = self.root.join(K::part_path(id, index));
		if let Ok(data) = tokio::fs::read(&local).await {
			return Ok(data);
		}
		if let Some(cache_root) = &self.cache_root {
			let cached = cache_root.join(K::part_path(id, index));
			if let Ok(data) = tokio::fs::read(&cached).await {
				return Ok(data);
			}
		}
		Err(StoreError::NotFound)
	}

	/// Writes `data` into the cache tree under a scoped lock (§4.C), creating
	/// parent directories as needed. A no-op contract violation to call this
	/// when `store_cache` is `false` or no cache root is configured — callers
	/// only reach this after `download` succeeds, which already checks both.
	pub async fn cache_write(&self, id: &str, index: usize, data: &[u8]) -> Result<(), StoreError> {
		let cache_root = self.cache_root.as_ref().ok_or(StoreError::NotFound)?;
		let target = cache_root.join(K::part_path(id, index));
		if let Some(parent) = target.parent() {
			tokio::fs::create_dir_all(parent).await.map_err(|e| StoreError::Other(e.into()))?;
		}
		write_locked(&target, data, super::DEFAULT_ASSET_LOCK_TIMEOUT)
			.await
			.map_err(|e| StoreError::Other(e.into()))
	}

	/// Fetches part `index` of asset `id` from `{source_url}/{relative path}`
	/// and writes it to the cache when `store_cache` is enabled (§4.I).
	pub async fn download(&self, id: &str, index: usize, max_try: u32, timeout: Duration) -> Result<Vec<u8>, StoreError> {
		let source_url = self.source_url.as_ref().ok_or(StoreError::NotFound)?;
		let relative = K::part_path(id, index);
		let url = format!("{}/{}", source_url.trim_end_matches('/'), relative.display());
		let data = versatiles_core::utils::retry_async(max_try, Duration::from_millis(200), || versatiles_core::io::http_get(&url, timeout)).await?;
		if self.store_cache && self.cache_root.is_some() {
			self.cache_write(id, index, &data).await?;
		}
		Ok(data)
	}

	/// Resolves part `index` of asset `id`: local/cache read first, falling
	/// back to an origin download when an origin is configured. On a
	/// GeoJSON asset whose local copy is missing but whose origin is
	/// unreachable, substitutes the permissive default document (§4.I)
	/// rather than failing, matching the spec's explicit carve-out for this
	/// one asset kind.
	pub async fn read_or_fetch(&self, id: &str, index: usize, max_try: u32, timeout: Duration) -> Result<Vec<u8>, StoreError> {
		match self.read(id, index).await {
			Ok(data) => Ok(data),
			Err(StoreError::NotFound) => match self.download(id, index, max_try, timeout).await {
				Ok(data) => Ok(data),
				Err(e) if K::NAME == "geojson" && self.source_url.is_some() => {
					log::warn!("geojson asset {id} unreachable at origin ({e}), substituting default geometry set");
					Ok(super::geojson::default_geojson_bytes())
				}
				Err(e) => Err(e),
			},
			Err(e) => Err(e),
		}
	}

	/// Validates part `index`'s bytes per `K::validate_part` (§4.I).
	pub fn validate(&self, index: usize, data: &[u8]) -> Result<(), StoreError> {
		K::validate_part(index, data)
	}

	/// Last-modified time, in Unix milliseconds, of part `index` of asset
	/// `id`, preferring the local copy over the cached one (§3 `created`).
	pub async fn get_created(&self, id: &str, index: usize) -> Result<i64, StoreError> {
		let local = self.root.join(K::part_path(id, index));
		if let Ok(ts) = modified_millis(&local).await {
			return Ok(ts);
		}
		if let Some(cache_root) = &self.cache_root {
			let cached = cache_root.join(K::part_path(id, index));
			if let Ok(ts) = modified_millis(&cached).await {
				return Ok(ts);
			}
		}
		Err(StoreError::NotFound)
	}
}

async fn modified_millis(path: &Path) -> std::io::Result<i64> {
	let meta = tokio::fs::metadata(path).await?;
	let modified = meta.modified()?;
	let millis = modified
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_millis() as i64)
		.unwrap_or(0);
	Ok(millis)
}
