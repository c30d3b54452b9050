//! Directory + sidecar database store (§4.D.1).
//!
//! Tile bytes live as plain files at `<root>/<level>/<x>/<y>.<ext>`, written
//! through the scoped file lock in `versatiles_core::io::lock_file` so a
//! reader never observes a partial write. A sidecar SQLite database at
//! `<root>/.versatiles_index.sqlite` tracks which tiles exist — `format`,
//! `hash`, `created` — never the bytes themselves, plus a `metadata` table of
//! well-known TileJSON keys. Schema creation is idempotent (`CREATE TABLE IF
//! NOT EXISTS`), matching the "idempotent column-add" requirement of §4.D.1.

use super::{tile_name, ExtraInfoMap, ExtraInfoValue, TileMetadata, TileRecord};
use r2d2::Pool;
use r2d2_sqlite::{rusqlite::{params, OptionalExtension}, SqliteConnectionManager};
use std::{
	path::{Path, PathBuf},
	time::{SystemTime, UNIX_EPOCH},
};
use versatiles_core::{io::write_locked, md5_hex, StoreError, TileBBox, TileBBoxPyramid, TileCoord, TileFormat, TileScheme};

use super::tile_store::DEFAULT_LOCK_TIMEOUT;

const INDEX_FILE: &str = ".versatiles_index.sqlite";

#[derive(Debug)]
pub struct DirectorySidecarStore {
	root: PathBuf,
	pool: Pool<SqliteConnectionManager>,
	scheme: TileScheme,
}

fn now_millis() -> i64 {
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as i64
}

impl DirectorySidecarStore {
	pub async fn open(root: PathBuf, create_if_missing: bool) -> Result<Self, StoreError> {
		if !root.exists() {
			if !create_if_missing {
				return Err(StoreError::NotFound);
			}
			tokio::fs::create_dir_all(&root).await.map_err(|e| StoreError::Other(e.into()))?;
		}

		let db_path = root.join(INDEX_FILE);
		let pool = tokio::task::spawn_blocking(move || -> anyhow::Result<Pool<SqliteConnectionManager>> {
			let manager = SqliteConnectionManager::file(&db_path);
			let pool = Pool::builder().max_size(8).build(manager)?;
			pool.get()?.execute_batch(
				"CREATE TABLE IF NOT EXISTS metadata (name TEXT UNIQUE, value TEXT);
				 CREATE TABLE IF NOT EXISTS tiles (
					zoom_level INTEGER NOT NULL,
					tile_column INTEGER NOT NULL,
					tile_row INTEGER NOT NULL,
					format TEXT NOT NULL,
					hash TEXT,
					created BIGINT,
					UNIQUE(zoom_level, tile_column, tile_row)
				 );",
			)?;
			Ok(pool)
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;

		let scheme = read_scheme(&pool)?;
		Ok(DirectorySidecarStore { root, pool, scheme })
	}

	pub async fn close(self) -> Result<(), StoreError> {
		Ok(())
	}

	/// The tile tree's root, used by the bulk job post-pass (§4.H step 6) to
	/// prune directories left empty after a run.
	pub(crate) fn root(&self) -> &std::path::Path {
		&self.root
	}

	fn tile_path(&self, level: u8, x: u32, y_stored: u32, format: TileFormat) -> PathBuf {
		self.root
			.join(level.to_string())
			.join(x.to_string())
			.join(format!("{y_stored}{}", format.extension()))
	}

	pub async fn get_tile(&self, coord: TileCoord) -> Result<TileRecord, StoreError> {
		let y = self.scheme.flip_y(coord.level, coord.y);
		let pool = self.pool.clone();
		let format = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<String>> {
			let conn = pool.get()?;
			Ok(conn
				.query_row(
					"SELECT format FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
					params![coord.level, coord.x, y],
					|row| row.get::<_, String>(0),
				)
				.optional()?)
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;

		let Some(format) = format.and_then(|f| parse_format(&f)) else {
			return Err(StoreError::NotFound);
		};
		let path = self.tile_path(coord.level, coord.x, y, format);
		let data = tokio::fs::read(&path).await.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				StoreError::NotFound
			} else {
				StoreError::Other(e.into())
			}
		})?;
		Ok(TileRecord::from_bytes(data))
	}

	pub async fn put_tile(&self, coord: TileCoord, data: Vec<u8>) -> Result<(), StoreError> {
		let y = self.scheme.flip_y(coord.level, coord.y);
		let detected = versatiles_core::detect_format(&data);
		let path = self.tile_path(coord.level, coord.x, y, detected.format);
		write_locked(&path, &data, DEFAULT_LOCK_TIMEOUT).await.map_err(|e| StoreError::Other(e.into()))?;

		let hash = md5_hex(&data);
		let created = now_millis();
		let format = detected.format.to_string();
		let pool = self.pool.clone();
		tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
			pool.get()?.execute(
				"INSERT INTO tiles (zoom_level, tile_column, tile_row, format, hash, created)
				 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
				 ON CONFLICT(zoom_level, tile_column, tile_row)
				 DO UPDATE SET format = excluded.format, hash = excluded.hash, created = excluded.created",
				params![coord.level, coord.x, y, format, hash, created],
			)?;
			Ok(())
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;
		Ok(())
	}

	pub async fn get_created(&self, coord: TileCoord) -> Result<i64, StoreError> {
		let y = self.scheme.flip_y(coord.level, coord.y);
		let pool = self.pool.clone();
		let created = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<i64>> {
			let conn = pool.get()?;
			Ok(conn
				.query_row(
					"SELECT created FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
					params![coord.level, coord.x, y],
					|row| row.get::<_, Option<i64>>(0),
				)
				.optional()?
				.flatten())
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;
		created.ok_or(StoreError::NotFound)
	}

	/// Reads the sidecar `metadata` table, backfilling `bounds`/`minzoom`/
	/// `maxzoom`/`format` from a one-time directory scan when the sidecar
	/// doesn't have them (§4.D.1) — e.g. a tree populated out-of-band (rsync,
	/// a bare copy) never went through `updateMetadata`.
	pub async fn get_metadata(&self) -> Result<TileMetadata, StoreError> {
		let pool = self.pool.clone();
		let rows = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<(String, String)>> {
			let conn = pool.get()?;
			let mut stmt = conn.prepare("SELECT name, value FROM metadata")?;
			let rows = stmt
				.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
				.collect::<Result<Vec<_>, _>>()?;
			Ok(rows)
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;
		let mut metadata = TileMetadata::from_rows(&rows).map_err(StoreError::Other)?;

		let needs_scan = metadata.tilejson.bounds.is_none()
			|| metadata.tilejson.values.get_byte("minzoom").is_none()
			|| metadata.tilejson.values.get_byte("maxzoom").is_none()
			|| metadata.tilejson.tile_format.is_none();
		if needs_scan {
			let scheme = self.scheme;
			let root = self.root.clone();
			let (pyramid, format) = tokio::task::spawn_blocking(move || scan_tile_tree(&root, scheme))
				.await
				.map_err(|e| StoreError::Other(e.into()))?;
			if !pyramid.is_empty() {
				metadata.tilejson.update_from_pyramid(&pyramid);
				if metadata.tilejson.center.is_none() {
					metadata.tilejson.center = pyramid.get_geo_center();
				}
			}
			if metadata.tilejson.tile_format.is_none() {
				metadata.tilejson.tile_format = format;
			}
		}

		Ok(metadata)
	}

	pub async fn update_metadata(&self, patch: &TileMetadata) -> Result<(), StoreError> {
		let mut current = self.get_metadata().await.unwrap_or_default();
		current.apply_patch(patch).map_err(StoreError::Other)?;
		let rows = current.as_rows();
		let pool = self.pool.clone();
		tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
			let mut conn = pool.get()?;
			let tx = conn.transaction()?;
			for (name, value) in rows {
				tx.execute(
					"INSERT INTO metadata (name, value) VALUES (?1, ?2)
					 ON CONFLICT(name) DO UPDATE SET value = excluded.value",
					params![name, value],
				)?;
			}
			tx.commit()?;
			Ok(())
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;
		Ok(())
	}

	pub async fn tile_extra_info(&self, level: u8, range: &TileBBox, by_created: bool) -> Result<ExtraInfoMap, StoreError> {
		let (x_min, x_max) = (range.x_min(), range.x_max());
		let scheme = self.scheme;
		// `tile_row` is stored in whatever `scheme` expects; flipping an XYZ
		// y-extent into that space also swaps which bound is the minimum,
		// since the flip is order-reversing (a no-op for `Xyz`).
		let (flipped_a, flipped_b) = (scheme.flip_y(level, range.y_min()), scheme.flip_y(level, range.y_max()));
		let (row_min, row_max) = (flipped_a.min(flipped_b), flipped_a.max(flipped_b));
		let pool = self.pool.clone();
		let rows = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<(u32, u32, Option<String>, Option<i64>)>> {
			let conn = pool.get()?;
			let mut stmt = conn.prepare(
				"SELECT tile_column, tile_row, hash, created FROM tiles
				 WHERE zoom_level = ?1 AND tile_column BETWEEN ?2 AND ?3 AND tile_row BETWEEN ?4 AND ?5",
			)?;
			let rows = stmt
				.query_map(params![level, x_min, x_max, row_min, row_max], |row| {
					Ok((
						row.get::<_, u32>(0)?,
						row.get::<_, u32>(1)?,
						row.get::<_, Option<String>>(2)?,
						row.get::<_, Option<i64>>(3)?,
					))
				})?
				.collect::<Result<Vec<_>, _>>()?;
			Ok(rows)
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;

		let mut map = ExtraInfoMap::new();
		for (x, y_stored, hash, created) in rows {
			let y = scheme.flip_y(level, y_stored);
			let name = tile_name(level, x, y);
			if by_created {
				if let Some(created) = created {
					map.insert(name, ExtraInfoValue::Created(created));
				}
			} else if let Some(hash) = hash {
				map.insert(name, ExtraInfoValue::Hash(hash));
			}
		}
		Ok(map)
	}
}

/// Walks `<root>/<level>/<x>/<y>.<ext>` once, building the tile pyramid and
/// noticing the first recognized tile format seen — the metadata fallback
/// for a sidecar that never recorded bounds/zoom/format itself (§4.D.1).
/// `y` on disk is in `scheme`'s convention, so it's flipped back to XYZ
/// before being folded into the pyramid.
fn scan_tile_tree(root: &Path, scheme: TileScheme) -> (TileBBoxPyramid, Option<TileFormat>) {
	let mut pyramid = TileBBoxPyramid::new_empty();
	let mut format = None;

	let Ok(level_entries) = std::fs::read_dir(root) else {
		return (pyramid, format);
	};
	for level_entry in level_entries.flatten() {
		let Some(level) = level_entry.file_name().to_str().and_then(|s| s.parse::<u8>().ok()) else {
			continue;
		};
		let Ok(x_entries) = std::fs::read_dir(level_entry.path()) else {
			continue;
		};
		for x_entry in x_entries.flatten() {
			let Some(x) = x_entry.file_name().to_str().and_then(|s| s.parse::<u32>().ok()) else {
				continue;
			};
			let Ok(y_entries) = std::fs::read_dir(x_entry.path()) else {
				continue;
			};
			for y_entry in y_entries.flatten() {
				let name = y_entry.file_name();
				let Some(name) = name.to_str() else { continue };
				let Some((y_str, ext)) = name.split_once('.') else { continue };
				let Some(y_stored) = y_str.parse::<u32>().ok() else { continue };
				if format.is_none() {
					format = parse_format(ext);
				}
				let y = scheme.flip_y(level, y_stored);
				if let Ok(bbox) = TileBBox::from_min_and_max(level, x, y, x, y) {
					pyramid.include_bbox(&bbox);
				}
			}
		}
	}

	(pyramid, format)
}

fn read_scheme(pool: &Pool<SqliteConnectionManager>) -> Result<TileScheme, StoreError> {
	let conn = pool.get().map_err(|e| StoreError::Other(e.into()))?;
	let value: Option<String> = conn
		.query_row("SELECT value FROM metadata WHERE name = 'scheme'", [], |row| row.get(0))
		.optional()
		.map_err(|e| StoreError::Other(e.into()))?;
	Ok(value.and_then(|v| TileScheme::parse_str(&v)).unwrap_or_default())
}

fn parse_format(value: &str) -> Option<TileFormat> {
	match value {
		"avif" => Some(TileFormat::AVIF),
		"bin" => Some(TileFormat::BIN),
		"geojson" => Some(TileFormat::GEOJSON),
		"jpg" => Some(TileFormat::JPG),
		"json" => Some(TileFormat::JSON),
		"pbf" => Some(TileFormat::PBF),
		"png" => Some(TileFormat::PNG),
		"svg" => Some(TileFormat::SVG),
		"topojson" => Some(TileFormat::TOPOJSON),
		"webp" => Some(TileFormat::WEBP),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	fn png_bytes() -> Vec<u8> {
		vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4]
	}

	#[tokio::test]
	async fn put_then_get_round_trips_bytes() {
		let dir = tempdir().unwrap();
		let store = DirectorySidecarStore::open(dir.path().to_path_buf(), true).await.unwrap();
		let coord = TileCoord::new(3, 2, 5).unwrap();
		store.put_tile(coord, png_bytes()).await.unwrap();

		let record = store.get_tile(coord).await.unwrap();
		assert_eq!(record.data, png_bytes());
		assert_eq!(record.content_type, "image/png");
		assert!(dir.path().join("3/2/5.png").exists());
	}

	#[tokio::test]
	async fn missing_tile_is_not_found() {
		let dir = tempdir().unwrap();
		let store = DirectorySidecarStore::open(dir.path().to_path_buf(), true).await.unwrap();
		let coord = TileCoord::new(1, 0, 0).unwrap();
		assert!(matches!(store.get_tile(coord).await.unwrap_err(), StoreError::NotFound));
	}

	#[tokio::test]
	async fn opening_missing_dir_without_create_fails() {
		let dir = tempdir().unwrap();
		let missing = dir.path().join("nope");
		assert!(matches!(
			DirectorySidecarStore::open(missing, false).await.unwrap_err(),
			StoreError::NotFound
		));
	}

	#[tokio::test]
	async fn metadata_round_trips() {
		let dir = tempdir().unwrap();
		let store = DirectorySidecarStore::open(dir.path().to_path_buf(), true).await.unwrap();
		let mut patch = TileMetadata::default();
		patch.tilejson.set_string("name", "berlin").unwrap();
		store.update_metadata(&patch).await.unwrap();

		let meta = store.get_metadata().await.unwrap();
		assert_eq!(meta.tilejson.get_string("name").as_deref(), Some("berlin"));
	}

	#[tokio::test]
	async fn tile_extra_info_reports_hash_by_default() {
		let dir = tempdir().unwrap();
		let store = DirectorySidecarStore::open(dir.path().to_path_buf(), true).await.unwrap();
		let coord = TileCoord::new(2, 1, 1).unwrap();
		store.put_tile(coord, png_bytes()).await.unwrap();

		let range = TileBBox::from_min_and_max(2, 0, 0, 3, 3).unwrap();
		let info = store.tile_extra_info(2, &range, false).await.unwrap();
		assert_eq!(info.len(), 1);
		assert!(matches!(info.get("2/1/1"), Some(ExtraInfoValue::Hash(_))));
	}
}
