//! This module provides the main interface for progress indicators, including conditional compilation
//! for different progress implementations.
//!
//! # Overview
//!
//! The module conditionally includes different progress indicator implementations based on the
//! build configuration. By default, it provides a no-op progress drain. If the "cli" feature is
//! enabled (and we're not under test), it includes a terminal-based progress bar. The
//! `ProgressTrait` trait defines the common interface for all progress indicators, and the
//! `get_progress_bar` function provides a convenient way to create an instance of a progress
//! indicator.
//!
//! # Examples
//!
//! ```rust
//! use versatiles_core::progress::*;
//!
//! let mut progress = get_progress_bar("Processing", 100);
//! progress.set_position(50);
//! progress.inc(10);
//! progress.finish();
//! ```

#![allow(unused)]

#[cfg(all(not(feature = "test"), feature = "cli"))]
mod progress_bar;
#[cfg(all(not(feature = "test"), feature = "cli"))]
pub use progress_bar::ProgressBar;

mod progress_drain;
pub use progress_drain::ProgressDrain;

mod traits;
pub use traits::{ProgressTrait, get_progress_bar};
