//! Style, sprite, font and GeoJSON asset caches (§3, §4.I): the quartet of
//! supporting-file kinds the renderer request router (§4.F) resolves
//! alongside tile stores.

mod cache;
mod geojson;
mod kind;

use std::time::Duration;

pub use cache::AssetCache;
pub use geojson::{GeometryFamily, classify as classify_geometry, default_geojson_bytes, validate_feature_families};
pub use kind::{AssetKind, FontKind, GeoJsonKind, SpriteKind, StyleKind};

/// Deadline for the scoped lock guarding an asset cache write (§4.C), the
/// asset-cache analogue of `TileStore`'s `DEFAULT_LOCK_TIMEOUT`.
pub const DEFAULT_ASSET_LOCK_TIMEOUT: Duration = Duration::from_secs(10);
