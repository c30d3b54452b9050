//! Single-file archive store (§4.D.2): one SQLite file holds both the
//! `metadata` key-value table and a `tiles` table with the tile bytes as a
//! `BLOB` column, row-numbered in `TMS` regardless of the scheme callers use.
//! `z`/`x`/`y` arguments to every method on this backend are `XYZ`; the row
//! is flipped to `TMS` on the way in and back to `XYZ` on the way out, so the
//! flip is invisible above this module (mirrors the teacher's MBTiles reader,
//! which stores tiles in `TMS` and flips `tile_row` against `(1<<z)-1`).

use super::{tile_name, ExtraInfoMap, ExtraInfoValue, TileMetadata, TileRecord};
use r2d2::Pool;
use r2d2_sqlite::{rusqlite::{params, OptionalExtension}, SqliteConnectionManager};
use std::{
	path::PathBuf,
	time::{SystemTime, UNIX_EPOCH},
};
use versatiles_core::{md5_hex, StoreError, TileBBox, TileCoord, TileScheme};

fn now_millis() -> i64 {
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as i64
}

#[derive(Debug)]
pub struct FileArchiveStore {
	pool: Pool<SqliteConnectionManager>,
}

impl FileArchiveStore {
	pub async fn open(path: PathBuf, create_if_missing: bool) -> Result<Self, StoreError> {
		if !create_if_missing && !path.exists() {
			return Err(StoreError::NotFound);
		}
		let pool = tokio::task::spawn_blocking(move || -> anyhow::Result<Pool<SqliteConnectionManager>> {
			let manager = SqliteConnectionManager::file(&path);
			let pool = Pool::builder().max_size(8).build(manager)?;
			pool.get()?.execute_batch(
				"CREATE TABLE IF NOT EXISTS metadata (name TEXT UNIQUE, value TEXT);
				 CREATE TABLE IF NOT EXISTS tiles (
					zoom_level INTEGER NOT NULL,
					tile_column INTEGER NOT NULL,
					tile_row INTEGER NOT NULL,
					tile_data BLOB NOT NULL,
					hash TEXT,
					created BIGINT,
					UNIQUE(zoom_level, tile_column, tile_row)
				 );",
			)?;
			Ok(pool)
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;
		Ok(FileArchiveStore { pool })
	}

	pub async fn close(self) -> Result<(), StoreError> {
		Ok(())
	}

	pub async fn get_tile(&self, coord: TileCoord) -> Result<TileRecord, StoreError> {
		let y = TileScheme::Tms.flip_y(coord.level, coord.y);
		let pool = self.pool.clone();
		let data = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<Vec<u8>>> {
			let conn = pool.get()?;
			Ok(conn
				.query_row(
					"SELECT tile_data FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
					params![coord.level, coord.x, y],
					|row| row.get::<_, Vec<u8>>(0),
				)
				.optional()?)
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;

		data.map(TileRecord::from_bytes).ok_or(StoreError::NotFound)
	}

	pub async fn put_tile(&self, coord: TileCoord, data: Vec<u8>) -> Result<(), StoreError> {
		let y = TileScheme::Tms.flip_y(coord.level, coord.y);
		let hash = md5_hex(&data);
		let created = now_millis();
		let pool = self.pool.clone();
		tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
			pool.get()?.execute(
				"INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data, hash, created)
				 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
				 ON CONFLICT(zoom_level, tile_column, tile_row)
				 DO UPDATE SET tile_data = excluded.tile_data, hash = excluded.hash, created = excluded.created",
				params![coord.level, coord.x, y, data, hash, created],
			)?;
			Ok(())
		})
		.await
		.map_err(|e| StoreError::Other(e.into()))??;
		Ok(())
	}

	pub async fn get_created(&self, coord: TileCoord) -> Result<i64, StoreError> {
		let y = TileScheme::Tms.flip_y(coord.level, coord.y);
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
		TileMetadata::from_rows(&rows).map_err(StoreError::Other)
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
		let (x_min, x_max, y_min, y_max) = (range.x_min(), range.x_max(), range.y_min(), range.y_max());
		// `tile_row` is stored in TMS; flipping XYZ's y-extent also swaps which
		// bound is the minimum, since the flip is order-reversing.
		let (row_min, row_max) = (TileScheme::Tms.flip_y(level, y_max), TileScheme::Tms.flip_y(level, y_min));
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
		for (x, y_tms, hash, created) in rows {
			let y = TileScheme::Tms.flip_y(level, y_tms);
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
