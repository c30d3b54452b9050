//! The bulk job post-pass (§4.H step 6): directory cleanup for directory+
//! sidecar destinations, hash backfill for single-file archive destinations.

use super::coverage::TileRange;
use crate::store::TileStore;
use std::path::{Path, PathBuf};
use versatiles_core::{StoreError, md5_hex};

/// Tile file extensions a directory+sidecar tree may contain (§4.D.1), used
/// to recognize "this directory only ever held tile files" before pruning
/// it. Mirrors `TileFormat::extension`'s strings (not callable from a const
/// context, so duplicated here rather than shared).
const KNOWN_EXTENSIONS: &[&str] = &[
	".avif", ".bin", ".geojson", ".jpg", ".json", ".pbf", ".png", ".svg", ".topojson", ".webp",
];

/// Removes every subdirectory under `root` that, after a bulk job's writes
/// and any upstream deletions, no longer contains any file — recursing
/// bottom-up so a directory that becomes empty once its own children are
/// pruned is pruned in turn. Files whose extension isn't a recognized tile
/// extension make their directory (and its ancestors) left alone, matching
/// §4.H step 6's "filter by known file extensions".
pub async fn remove_empty_directories(root: &Path) -> Result<(), StoreError> {
	prune(root.to_path_buf()).await.map(|_| ())
}

/// Recurses into `dir`, returning `true` if `dir` itself ended up empty (and
/// therefore was removed) — so a parent call knows whether to recurse
/// upward.
fn prune(dir: PathBuf) -> std::pin::Pin<Box<dyn Future<Output = Result<bool, StoreError>> + Send>> {
	Box::pin(async move {
		let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| StoreError::Other(e.into()))?;
		let mut has_children = false;
		let mut only_known_files = true;
		let mut subdirs = Vec::new();

		while let Some(entry) = entries.next_entry().await.map_err(|e| StoreError::Other(e.into()))? {
			let path = entry.path();
			let file_type = entry.file_type().await.map_err(|e| StoreError::Other(e.into()))?;
			if file_type.is_dir() {
				subdirs.push(path);
			} else {
				has_children = true;
				let is_known = path
					.extension()
					.and_then(|e| e.to_str())
					.is_some_and(|ext| KNOWN_EXTENSIONS.contains(&format!(".{ext}").as_str()));
				if !is_known {
					only_known_files = false;
				}
			}
		}

		let mut any_subdir_survived = false;
		for subdir in subdirs {
			if prune(subdir).await? {
				// removed
			} else {
				any_subdir_survived = true;
			}
		}

		if !has_children && !any_subdir_survived && only_known_files {
			tokio::fs::remove_dir(&dir).await.map_err(|e| StoreError::Other(e.into()))?;
			Ok(true)
		} else {
			Ok(false)
		}
	})
}

use std::future::Future;

/// Backfills any tile missing a hash within `ranges` by reading its bytes
/// and rewriting it through `put_tile`, which always recomputes and persists
/// the hash (§4.D `putTile`). Processes in batches of 256 to bound memory
/// and concurrent file-descriptor use (§4.H step 6).
pub async fn backfill_hashes(store: &TileStore, ranges: &[TileRange]) -> Result<u64, StoreError> {
	const BATCH_SIZE: usize = 256;
	let mut backfilled = 0u64;

	for range in ranges {
		let with_created = store.tile_extra_info(range.zoom, &range.bbox, true).await?;
		let with_hash = store.tile_extra_info(range.zoom, &range.bbox, false).await?;

		let missing: Vec<_> = with_created
			.keys()
			.filter(|name| !with_hash.contains_key(*name))
			.filter_map(|name| parse_tile_name(name))
			.collect();

		for chunk in missing.chunks(BATCH_SIZE) {
			for &coord in chunk {
				let record = match store.get_tile(coord).await {
					Ok(r) => r,
					Err(StoreError::NotFound) => continue,
					Err(e) => return Err(e),
				};
				let _ = md5_hex(&record.data); // computed again inside put_tile; kept here only to fail fast on empty data
				store.put_tile(coord, record.data, true).await?;
				backfilled += 1;
			}
		}
	}

	Ok(backfilled)
}

/// Runs the step-6 post-pass appropriate to `destination`'s backend (§4.H):
/// directory pruning for directory+sidecar stores, hash backfill for
/// single-file archives. Relational stores have neither a directory tree to
/// prune nor an archive-wide hash sweep to run, so this is a no-op for them.
pub async fn run_post_pass(destination: &TileStore, ranges: &[TileRange]) -> Result<(), StoreError> {
	match destination {
		TileStore::DirectorySidecar(store) => remove_empty_directories(store.root()).await,
		TileStore::FileArchive(_) => backfill_hashes(destination, ranges).await.map(|_| ()),
		TileStore::Relational(_) => Ok(()),
	}
}

fn parse_tile_name(name: &str) -> Option<versatiles_core::TileCoord> {
	let mut parts = name.split('/');
	let level: u8 = parts.next()?.parse().ok()?;
	let x: u32 = parts.next()?.parse().ok()?;
	let y: u32 = parts.next()?.parse().ok()?;
	versatiles_core::TileCoord::new(level, x, y).ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::{DirectorySidecarStore, TileStore};
	use tempfile::tempdir;
	use versatiles_core::TileCoord;

	#[tokio::test]
	async fn prunes_directories_left_empty_after_deletion() {
		let dir = tempdir().unwrap();
		let nested = dir.path().join("3").join("2");
		tokio::fs::create_dir_all(&nested).await.unwrap();
		tokio::fs::write(nested.join("5.png"), b"x").await.unwrap();
		tokio::fs::remove_file(nested.join("5.png")).await.unwrap();

		remove_empty_directories(dir.path()).await.unwrap();

		assert!(!nested.exists());
		assert!(!dir.path().join("3").exists());
	}

	#[tokio::test]
	async fn leaves_directories_with_unknown_files_alone() {
		let dir = tempdir().unwrap();
		let nested = dir.path().join("3");
		tokio::fs::create_dir_all(&nested).await.unwrap();
		tokio::fs::write(nested.join("readme.txt"), b"keep me").await.unwrap();

		remove_empty_directories(dir.path()).await.unwrap();

		assert!(nested.exists());
	}

	#[tokio::test]
	async fn backfill_is_a_no_op_when_every_tile_already_has_a_hash() {
		let dir = tempdir().unwrap();
		let store = TileStore::DirectorySidecar(DirectorySidecarStore::open(dir.path().to_path_buf(), true).await.unwrap());
		let coord = TileCoord::new(0, 0, 0).unwrap();
		store.put_tile(coord, vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], true).await.unwrap();

		let ranges = vec![TileRange {
			zoom: 0,
			bbox: versatiles_core::TileBBox::new_full(0).unwrap(),
		}];
		let backfilled = backfill_hashes(&store, &ranges).await.unwrap();
		assert_eq!(backfilled, 0);
	}
}
