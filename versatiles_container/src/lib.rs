//! VersaTiles Container: the tile value model and the tile store backends
//! that persist and serve it.
//!
//! This crate exposes:
//! - [`Tile`] / [`TileContent`]: the in-memory tile value, lazily convertible
//!   between encoded bytes and decoded raster/vector content.
//! - [`store`]: the three-backend tile store contract (directory+sidecar DB,
//!   single-file archive, relational) that the read pipeline and bulk job
//!   engine build on.
//! - [`assets`]: the style/sprite/font/GeoJSON asset cache quartet (§3,
//!   §4.I) the renderer request router resolves alongside tile stores.
//! - [`render`]: the sub-resource router, rasterizer pool and image
//!   finalize step a renderer uses to paint a style (§4.F, §4.G).
//! - [`jobs`]: the bulk job engine — seed/export/render jobs, refresh
//!   predicates, and the post-pass cleanup that follows them (§4.H).
//!
//! # Features
//! - `cli`: enables human-readable probing of stores and tiles.
//! - `test`: helpers for integration tests in downstream crates.

mod store;
pub use store::*;

mod read_pipeline;
pub use read_pipeline::*;

mod assets;
pub use assets::*;

mod repository;
pub use repository::*;

pub mod render;

pub mod jobs;

mod types;
pub use types::*;
