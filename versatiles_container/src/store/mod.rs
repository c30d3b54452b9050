//! Tile store backends: shared record/metadata model plus the three
//! concrete persistence strategies (directory+sidecar DB, single-file
//! archive, relational) that implement a common open/get/put contract.

mod record;
pub use record::*;

mod transparency;

mod directory_sidecar;
pub use directory_sidecar::DirectorySidecarStore;

mod file_archive;
pub use file_archive::FileArchiveStore;

mod relational;
pub use relational::RelationalStore;

mod tile_store;
pub use tile_store::*;
