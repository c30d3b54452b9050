//! The renderer request router (§4.F): the callback a rasterizer calls to
//! resolve a sub-resource URL (sprite, font, source tile, raw HTTP) while it
//! paints a style. Every tile-backed scheme ultimately goes back through the
//! same read pipeline the request path uses (§4.E); the router's own job is
//! just parsing the URL and picking which repository entry to ask.

use crate::Repository;
use std::time::Duration;
use versatiles_core::{StoreError, TileCoord, io::http_get};

const RAW_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// One resolved sub-resource: the bytes plus whatever the router could infer
/// about the wire format, used by a caller that needs to fall back on
/// failure (§4.F, §4.G's fallback-tile behavior lives one layer up from here).
pub struct RouterResponse {
	pub data: Vec<u8>,
}

/// Parses a `scheme:...` sub-resource URL and fetches it (§4.F's dispatch
/// table). `http`/`https` are passed straight through as raw GETs; every
/// other recognized scheme resolves against `repository`.
pub async fn resolve(repository: &Repository, url: &str) -> Result<RouterResponse, StoreError> {
	let Some((scheme, rest)) = url.split_once(':') else {
		return Err(StoreError::Other(anyhow::anyhow!("url '{url}' has no scheme")));
	};

	let data = match scheme {
		"sprites" => resolve_sprite(repository, rest).await?,
		"fonts" => resolve_font(repository, rest).await?,
		"pmtiles" | "mbtiles" | "xyz" | "pg" => resolve_tile(repository, rest).await?,
		"http" | "https" => http_get(url, RAW_HTTP_TIMEOUT).await?,
		other => return Err(StoreError::Other(anyhow::anyhow!("unsupported scheme '{other}'"))),
	};

	let data = gunzip_if_pbf(data);
	Ok(RouterResponse { data })
}

/// `resolve`, but a failed tile-scheme lookup (`pmtiles`/`mbtiles`/`xyz`/`pg`)
/// is replaced by a fallback opaque tile of `fallback_format` instead of
/// propagating, so a rasterizer mid-render can always complete (§4.F). Sprite,
/// font and raw HTTP failures still propagate — spec.md only names a tile
/// fallback, since there is no sensible fallback glyph range or sprite sheet.
pub async fn resolve_with_fallback(repository: &Repository, url: &str, fallback_format: super::RenderFormat) -> Result<Vec<u8>, StoreError> {
	match resolve(repository, url).await {
		Ok(response) => Ok(response.data),
		Err(e) if url.starts_with("pmtiles:") || url.starts_with("mbtiles:") || url.starts_with("xyz:") || url.starts_with("pg:") => {
			log::warn!("renderer request for '{url}' failed, substituting fallback tile: {e}");
			Ok(super::fallback_tile(fallback_format).into_vec())
		}
		Err(e) => Err(e),
	}
}

/// Gunzips the body when it sniffs as a gzip-wrapped PBF (§4.F): the only
/// on-the-wire transformation the router itself performs, since a tile store
/// always persists vector tiles pre-compressed.
fn gunzip_if_pbf(data: Vec<u8>) -> Vec<u8> {
	let detected = versatiles_core::utils::detect_format(&data);
	if detected.format == versatiles_core::TileFormat::PBF && detected.content_encoding == Some("gzip") {
		let blob = versatiles_core::Blob::from(data);
		match versatiles_core::utils::decompress_gzip(&blob) {
			Ok(decompressed) => return decompressed.into_vec(),
			Err(e) => log::warn!("failed to gunzip PBF body: {e}"),
		}
	}
	data
}

/// Splits a path's non-empty segments, keeping only the trailing `n` (§4.F's
/// `/...//` prefix stands for an arbitrary, ignored path lead-in).
fn trailing_segments<'a>(rest: &'a str, n: usize) -> Result<Vec<&'a str>, StoreError> {
	let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
	if segments.len() < n {
		return Err(StoreError::Other(anyhow::anyhow!("expected at least {n} path segments in '{rest}'")));
	}
	Ok(segments[segments.len() - n..].to_vec())
}

async fn resolve_sprite(repository: &Repository, rest: &str) -> Result<Vec<u8>, StoreError> {
	let segments = trailing_segments(rest, 2)?;
	let (id, file) = (segments[0], segments[1]);
	let cache = repository.sprite(id)?;
	let index = sprite_index_for_file(file)?;
	cache.read_or_fetch(id, index, 3, Duration::from_secs(10)).await
}

fn sprite_index_for_file(file: &str) -> Result<usize, StoreError> {
	let is_2x = file.starts_with("sprite@2x");
	let is_png = file.ends_with(".png");
	Ok(match (is_2x, is_png) {
		(false, false) => 0,
		(false, true) => 1,
		(true, false) => 2,
		(true, true) => 3,
	})
}

async fn resolve_font(repository: &Repository, rest: &str) -> Result<Vec<u8>, StoreError> {
	let segments = trailing_segments(rest, 2)?;
	let (id, range) = (segments[0], segments[1]);
	let cache = repository.font(id)?;
	let start = range
		.trim_end_matches(".pbf")
		.split('-')
		.next()
		.and_then(|s| s.parse::<u32>().ok())
		.ok_or_else(|| StoreError::Other(anyhow::anyhow!("invalid font range '{range}'")))?;
	let index = (start / crate::assets::FontKind::RANGE_STEP) as usize;
	cache.read_or_fetch(id, index, 3, Duration::from_secs(10)).await
}

async fn resolve_tile(repository: &Repository, rest: &str) -> Result<Vec<u8>, StoreError> {
	let segments = trailing_segments(rest, 4)?;
	let (id, z, x, y_and_fmt) = (segments[0], segments[1], segments[2], segments[3]);
	let y = y_and_fmt.split('.').next().unwrap_or(y_and_fmt);

	fn parse_coord<T: std::str::FromStr>(s: &str) -> Result<T, StoreError> {
		s.parse().map_err(|_| StoreError::Other(anyhow::anyhow!("invalid tile coordinate '{s}'")))
	}
	let coord = TileCoord::new(parse_coord(z)?, parse_coord(x)?, parse_coord(y)?).map_err(StoreError::Other)?;

	let pipeline = repository.data(id)?;
	pipeline.read_tile(coord).await
}
