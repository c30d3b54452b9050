//! The bulk job engine (§4.H): seed/export/render jobs that walk a
//! coverage's tiles through a bounded worker pool, skipping tiles a refresh
//! predicate judges still fresh, and the post-pass cleanup that follows a
//! directory+sidecar or single-file archive destination's writes.
//!
//! A job is built from its `*Config` (what to do) plus a shared [`JobHandle`]
//! (how to watch and cancel it while it runs): construct the config, wrap a
//! fresh handle in an `Arc`, and hand both to `run_seed`/`run_export`/
//! `run_render`. The returned [`JobState`] is the handle's final snapshot;
//! the same handle can be polled (`snapshot()`) or cancelled (`cancel()`)
//! from another task while the job is still in flight.

mod coverage;
mod drive;
mod export;
mod handle;
mod post;
mod refresh;
mod render;
mod seed;
mod snapshot;

pub use coverage::{Coverage, TileRange, enumerate, normalize_coverages, total_tiles};
pub use export::{ExportConfig, run_export};
pub use handle::{JobHandle, JobState};
pub use post::{backfill_hashes, remove_empty_directories, run_post_pass};
pub use refresh::{RefreshBefore, RefreshPredicate};
pub use render::{RenderConfig, run_render};
pub use seed::{SeedConfig, run_seed};
pub use snapshot::ExtraInfoSnapshot;
