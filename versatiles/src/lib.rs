//! # VersaTiles
//!
//! A map tile cache and rendering service: store, serve, seed, export and
//! render tiles through the three-backend tile store, read pipeline and
//! bulk job engine defined in [`versatiles_container`].
//!
//! ## Feature flags
//! - **cli** *(default)*: enables the command-line binary (subcommands,
//!   logging, and the HTTP serving surface).

#[cfg(feature = "cli")]
pub mod server;
#[cfg(feature = "cli")]
pub mod tools;

pub use versatiles_container as container;
pub use versatiles_core as core;
