//! Typed error kinds for the tile-store / read-pipeline / renderer contract
//! boundary (§7). Everything above and below this boundary still uses
//! `anyhow::Result` with `#[context(...)]`, matching the teacher's style;
//! `StoreError` exists only where callers (bulk jobs, the read pipeline, the
//! renderer router) need to branch on *which* failure happened rather than
//! just log and bail.

use thiserror::Error;

/// The abstract error kinds from spec §7.
#[derive(Debug, Error)]
pub enum StoreError {
	/// A tile, asset or metadata key is absent. Not logged as an error on
	/// the read path — a normal, expected outcome of a cache miss.
	#[error("not found")]
	NotFound,

	/// An HTTP origin replied with a non-200 status. `204` and `404` are
	/// sentinel "absent at origin" statuses and are never retried by callers
	/// of this error.
	#[error("remote returned status {0}")]
	RemoteStatus(u16),

	/// A scoped file lock could not be acquired before its deadline.
	#[error("lock timed out")]
	LockTimeout,

	/// A SQL statement or HTTP request exceeded its deadline.
	#[error("operation timed out")]
	OperationTimeout,

	/// A JSON document failed schema validation.
	#[error("schema invalid: {0}")]
	SchemaInvalid(String),

	/// Tile or asset bytes did not match any recognized magic-byte format.
	#[error("format invalid")]
	FormatInvalid,

	/// A store's on-disk/SQL schema is missing a required column that
	/// cannot be added idempotently.
	#[error("store corrupt: {0}")]
	StoreCorrupt(String),

	/// The native rasterizer failed to produce an image.
	#[error("render failed: {0}")]
	RenderFailed(String),

	/// Catch-all for lower-level failures (I/O, SQL, HTTP transport) that
	/// don't need their own variant at this boundary.
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl StoreError {
	/// `true` for statuses that should never be retried by a caller (204/404
	/// "absent at origin" per §7), `false` otherwise.
	#[must_use]
	pub fn is_terminal_remote_status(&self) -> bool {
		matches!(self, StoreError::RemoteStatus(204 | 404))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn terminal_statuses() {
		assert!(StoreError::RemoteStatus(204).is_terminal_remote_status());
		assert!(StoreError::RemoteStatus(404).is_terminal_remote_status());
		assert!(!StoreError::RemoteStatus(500).is_terminal_remote_status());
	}

	#[test]
	fn wraps_anyhow() {
		let e: StoreError = anyhow::anyhow!("boom").into();
		assert!(matches!(e, StoreError::Other(_)));
	}
}
