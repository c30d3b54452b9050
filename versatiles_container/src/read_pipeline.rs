//! The tile read pipeline (§4.E): local lookup first, origin forward on a
//! local miss, optional non-blocking cache write-back, with single-flight
//! coalescing so concurrent reads for the same tile never issue more than
//! one origin fetch.

use crate::store::TileStore;
use moka::future::Cache;
use std::{sync::Arc, time::Duration};
use versatiles_core::{io::http_get, StoreError, TileCoord, TileScheme};

/// §4.E's fixed deadline for an origin fetch.
const ORIGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// A repository entry's read-side configuration: where to look locally, where
/// to forward a miss, and whether/how to cache what comes back.
#[derive(Debug, Clone)]
pub struct TileReadConfig {
	/// Origin URL template containing literal `{z}`, `{x}`, `{y}` placeholders.
	pub source_url: Option<String>,
	/// Row-numbering convention the origin expects (§4.E: `tmpY = flipIfTMS`).
	pub source_scheme: TileScheme,
	/// Whether a tile fetched from origin is written back into the store.
	pub store_cache: bool,
	/// Forwarded to `TileStore::put_tile` on cache write-back.
	pub store_transparent: bool,
}

/// Wraps a [`TileStore`] with the read-forwarding and single-flight behavior
/// of §4.E. One `TileReadPipeline` is the dedup scope for one store handle.
pub struct TileReadPipeline {
	store: Arc<TileStore>,
	config: TileReadConfig,
	inflight: Cache<(u8, u32, u32), Vec<u8>>,
}

impl TileReadPipeline {
	#[must_use]
	pub fn new(store: Arc<TileStore>, config: TileReadConfig) -> TileReadPipeline {
		TileReadPipeline {
			store,
			config,
			// Capacity/TTL only bound how long a completed fetch is reused by a
			// *new* caller that arrives right after one finishes; the coalescing
			// of callers that arrive while a fetch is still pending doesn't
			// depend on either value.
			inflight: Cache::builder()
				.max_capacity(10_000)
				.time_to_live(Duration::from_secs(5))
				.build(),
		}
	}

	/// Reads `coord`, forwarding to the configured origin on a local miss and
	/// writing the result back when `store_cache` is set. Cache write-back
	/// failures are never propagated to the caller (§4.E, §7).
	pub async fn read_tile(&self, coord: TileCoord) -> Result<Vec<u8>, StoreError> {
		match self.store.get_tile(coord).await {
			Ok(record) => return Ok(record.data),
			Err(StoreError::NotFound) => {}
			Err(e) => return Err(e),
		}

		let Some(template) = &self.config.source_url else {
			return Err(StoreError::NotFound);
		};

		let key = (coord.level, coord.x, coord.y);
		let template = template.clone();
		let source_scheme = self.config.source_scheme;
		let data = self
			.inflight
			.try_get_with(key, async move {
				let y = source_scheme.flip_y(coord.level, coord.y);
				let url = substitute_url(&template, coord.level, coord.x, y);
				http_get(&url, ORIGIN_TIMEOUT).await
			})
			.await
			.map_err(|arc_err: Arc<StoreError>| clone_store_error(&arc_err))?;

		if self.config.store_cache {
			let store = self.store.clone();
			let data_for_cache = data.clone();
			let store_transparent = self.config.store_transparent;
			tokio::spawn(async move {
				if let Err(e) = store.put_tile(coord, data_for_cache, store_transparent).await {
					log::warn!("background cache write for {coord:?} failed: {e}");
				}
			});
		}

		Ok(data)
	}
}

pub(crate) fn substitute_url(template: &str, level: u8, x: u32, y: u32) -> String {
	template
		.replace("{z}", &level.to_string())
		.replace("{x}", &x.to_string())
		.replace("{y}", &y.to_string())
}

/// `StoreError` isn't `Clone` (it can wrap an opaque `anyhow::Error`); moka
/// hands concurrent waiters a shared `Arc<StoreError>` on failure, so this
/// rebuilds an owned error with the same caller-visible shape.
fn clone_store_error(err: &StoreError) -> StoreError {
	match err {
		StoreError::NotFound => StoreError::NotFound,
		StoreError::RemoteStatus(code) => StoreError::RemoteStatus(*code),
		StoreError::LockTimeout => StoreError::LockTimeout,
		StoreError::OperationTimeout => StoreError::OperationTimeout,
		StoreError::SchemaInvalid(s) => StoreError::SchemaInvalid(s.clone()),
		StoreError::FormatInvalid => StoreError::FormatInvalid,
		StoreError::StoreCorrupt(s) => StoreError::StoreCorrupt(s.clone()),
		StoreError::RenderFailed(s) => StoreError::RenderFailed(s.clone()),
		StoreError::Other(e) => StoreError::Other(anyhow::anyhow!("{e}")),
	}
}
