//! Relational store (§4.D.3): a Postgres connection URI plus a logical
//! dataset name, with the identical get/put/metadata/extra-info contract the
//! two file-based backends expose. Each dataset gets its own `tiles_<name>`
//! and `metadata_<name>` table so one Postgres database can host many stores
//! side by side, the relational analogue of "one directory/archive per
//! store" in the other two backends.

use super::{tile_name, ExtraInfoMap, ExtraInfoValue, TileMetadata, TileRecord};
use deadpool_postgres::{Config as PgConfig, Pool, Runtime};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio_postgres::NoTls;
use versatiles_core::{md5_hex, StoreError, TileBBox, TileCoord, TileScheme};

fn now_millis() -> i64 {
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as i64
}

/// `dataset` becomes part of two table names, so it can't come from
/// untrusted input; this only guards against a caller typo landing as
/// garbled SQL rather than a useful error.
fn validate_dataset(dataset: &str) -> Result<(), StoreError> {
	if !dataset.is_empty() && dataset.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
		Ok(())
	} else {
		Err(StoreError::SchemaInvalid(format!("invalid dataset name: {dataset:?}")))
	}
}

#[derive(Debug)]
pub struct RelationalStore {
	pool: Pool,
	tiles_table: String,
	metadata_table: String,
	scheme: TileScheme,
}

impl RelationalStore {
	pub async fn open(uri: &str, dataset: &str, create_if_missing: bool) -> Result<Self, StoreError> {
		validate_dataset(dataset)?;
		let tiles_table = format!("tiles_{dataset}");
		let metadata_table = format!("metadata_{dataset}");

		let mut cfg = PgConfig::new();
		cfg.url = Some(uri.to_string());
		let pool = cfg
			.create_pool(Some(Runtime::Tokio1), NoTls)
			.map_err(|e| StoreError::Other(e.into()))?;

		let client = pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		if create_if_missing {
			client
				.batch_execute(&format!(
					"CREATE TABLE IF NOT EXISTS {metadata_table} (name TEXT UNIQUE, value TEXT);
					 CREATE TABLE IF NOT EXISTS {tiles_table} (
						zoom_level INTEGER NOT NULL,
						tile_column INTEGER NOT NULL,
						tile_row INTEGER NOT NULL,
						tile_data BYTEA NOT NULL,
						hash TEXT,
						created BIGINT,
						UNIQUE (zoom_level, tile_column, tile_row)
					 );"
				))
				.await
				.map_err(|e| StoreError::Other(e.into()))?;
		} else {
			let exists: bool = client
				.query_one("SELECT to_regclass($1) IS NOT NULL", &[&tiles_table])
				.await
				.map_err(|e| StoreError::Other(e.into()))?
				.get(0);
			if !exists {
				return Err(StoreError::NotFound);
			}
		}

		let scheme = read_scheme(&client, &metadata_table).await?;
		drop(client);
		Ok(RelationalStore {
			pool,
			tiles_table,
			metadata_table,
			scheme,
		})
	}

	pub async fn close(self) -> Result<(), StoreError> {
		Ok(())
	}

	pub async fn get_tile(&self, coord: TileCoord) -> Result<TileRecord, StoreError> {
		let y = self.scheme.flip_y(coord.level, coord.y) as i32;
		let client = self.pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		let row = client
			.query_opt(
				&format!("SELECT tile_data FROM {} WHERE zoom_level = $1 AND tile_column = $2 AND tile_row = $3", self.tiles_table),
				&[&i32::from(coord.level), &(coord.x as i32), &y],
			)
			.await
			.map_err(|e| StoreError::Other(e.into()))?;
		let Some(row) = row else {
			return Err(StoreError::NotFound);
		};
		let data: Vec<u8> = row.get(0);
		Ok(TileRecord::from_bytes(data))
	}

	pub async fn put_tile(&self, coord: TileCoord, data: Vec<u8>) -> Result<(), StoreError> {
		let y = self.scheme.flip_y(coord.level, coord.y) as i32;
		let hash = md5_hex(&data);
		let created = now_millis();
		let client = self.pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		client
			.execute(
				&format!(
					"INSERT INTO {} (zoom_level, tile_column, tile_row, tile_data, hash, created)
					 VALUES ($1, $2, $3, $4, $5, $6)
					 ON CONFLICT (zoom_level, tile_column, tile_row)
					 DO UPDATE SET tile_data = excluded.tile_data, hash = excluded.hash, created = excluded.created",
					self.tiles_table
				),
				&[&i32::from(coord.level), &(coord.x as i32), &y, &data, &hash, &created],
			)
			.await
			.map_err(|e| StoreError::Other(e.into()))?;
		Ok(())
	}

	pub async fn get_created(&self, coord: TileCoord) -> Result<i64, StoreError> {
		let y = self.scheme.flip_y(coord.level, coord.y) as i32;
		let client = self.pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		let row = client
			.query_opt(
				&format!("SELECT created FROM {} WHERE zoom_level = $1 AND tile_column = $2 AND tile_row = $3", self.tiles_table),
				&[&i32::from(coord.level), &(coord.x as i32), &y],
			)
			.await
			.map_err(|e| StoreError::Other(e.into()))?;
		row.and_then(|r| r.get::<_, Option<i64>>(0)).ok_or(StoreError::NotFound)
	}

	pub async fn get_metadata(&self) -> Result<TileMetadata, StoreError> {
		let client = self.pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		let rows = client
			.query(&format!("SELECT name, value FROM {}", self.metadata_table), &[])
			.await
			.map_err(|e| StoreError::Other(e.into()))?;
		let rows: Vec<(String, String)> = rows.iter().map(|r| (r.get(0), r.get(1))).collect();
		TileMetadata::from_rows(&rows).map_err(StoreError::Other)
	}

	pub async fn update_metadata(&self, patch: &TileMetadata) -> Result<(), StoreError> {
		let mut current = self.get_metadata().await.unwrap_or_default();
		current.apply_patch(patch).map_err(StoreError::Other)?;

		let mut client = self.pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		let tx = client.transaction().await.map_err(|e| StoreError::Other(e.into()))?;
		for (name, value) in current.as_rows() {
			tx.execute(
				&format!(
					"INSERT INTO {} (name, value) VALUES ($1, $2)
					 ON CONFLICT (name) DO UPDATE SET value = excluded.value",
					self.metadata_table
				),
				&[&name, &value],
			)
			.await
			.map_err(|e| StoreError::Other(e.into()))?;
		}
		tx.commit().await.map_err(|e| StoreError::Other(e.into()))?;
		Ok(())
	}

	pub async fn tile_extra_info(&self, level: u8, range: &TileBBox, by_created: bool) -> Result<ExtraInfoMap, StoreError> {
		// `tile_row` is stored in whatever the dataset's own scheme expects;
		// flipping an XYZ y-extent into that space also swaps which bound is
		// the minimum, since the flip is order-reversing (a no-op for `Xyz`).
		let (flipped_a, flipped_b) = (
			self.scheme.flip_y(level, range.y_min()),
			self.scheme.flip_y(level, range.y_max()),
		);
		let (row_min, row_max) = (flipped_a.min(flipped_b), flipped_a.max(flipped_b));
		let client = self.pool.get().await.map_err(|e| StoreError::Other(e.into()))?;
		let rows = client
			.query(
				&format!(
					"SELECT tile_column, tile_row, hash, created FROM {}
					 WHERE zoom_level = $1 AND tile_column BETWEEN $2 AND $3 AND tile_row BETWEEN $4 AND $5",
					self.tiles_table
				),
				&[
					&i32::from(level),
					&(range.x_min() as i32),
					&(range.x_max() as i32),
					&(row_min as i32),
					&(row_max as i32),
				],
			)
			.await
			.map_err(|e| StoreError::Other(e.into()))?;

		let mut map = ExtraInfoMap::new();
		for row in rows {
			let x: i32 = row.get(0);
			let y_stored: i32 = row.get(1);
			let hash: Option<String> = row.get(2);
			let created: Option<i64> = row.get(3);
			let y = self.scheme.flip_y(level, y_stored as u32);
			let name = tile_name(level, x as u32, y);
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

async fn read_scheme(client: &deadpool_postgres::Client, metadata_table: &str) -> Result<TileScheme, StoreError> {
	let row = client
		.query_opt(&format!("SELECT value FROM {metadata_table} WHERE name = 'scheme'"), &[])
		.await
		.map_err(|e| StoreError::Other(e.into()))?;
	let value: Option<String> = row.map(|r| r.get(0));
	Ok(value.and_then(|v| TileScheme::parse_str(&v)).unwrap_or_default())
}
