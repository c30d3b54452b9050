//! Refresh predicates (§4.H step 2, §8 invariant 7, glossary "Refresh
//! predicate"): the rule a bulk job uses to decide whether an existing
//! destination tile is still fresh enough to skip.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use versatiles_core::StoreError;

/// The job config's raw `refreshBefore` value (§4.H step 2), before it is
/// resolved against "now". Mirrors the four shapes the original value can
/// take: an ISO timestamp string, a number of days, a boolean (hash
/// comparison), or absent (always refresh).
#[derive(Debug, Clone)]
pub enum RefreshBefore {
	Timestamp(String),
	AgeDays(f64),
	HashCompare,
	Always,
}

/// The resolved predicate a job's driver evaluates per tile.
#[derive(Debug, Clone, Copy)]
pub enum RefreshPredicate {
	/// Always re-fetch/re-render/re-copy, regardless of what already exists.
	Always,
	/// Stale when the existing tile's `created` timestamp is older than `t`
	/// (unix milliseconds).
	Before(i64),
	/// Stale when the existing tile's hash differs from the freshly
	/// produced candidate's hash.
	HashDiffers,
}

impl RefreshPredicate {
	/// Resolves a raw `RefreshBefore` value to a predicate (§4.H step 2).
	///
	/// # Errors
	/// Returns `StoreError::Other` if a `Timestamp` value isn't valid RFC 3339.
	pub fn resolve(value: &RefreshBefore) -> Result<RefreshPredicate, StoreError> {
		Ok(match value {
			RefreshBefore::Timestamp(s) => {
				let dt = OffsetDateTime::parse(s, &Rfc3339).map_err(|e| StoreError::Other(anyhow::anyhow!("invalid refreshBefore timestamp '{s}': {e}")))?;
				RefreshPredicate::Before(dt.unix_timestamp() * 1000 + i64::from(dt.millisecond()))
			}
			RefreshBefore::AgeDays(days) => {
				let now = now_millis();
				let window_ms = (days * 86_400_000.0) as i64;
				RefreshPredicate::Before(now - window_ms)
			}
			RefreshBefore::HashCompare => RefreshPredicate::HashDiffers,
			RefreshBefore::Always => RefreshPredicate::Always,
		})
	}

	/// True when a tile task should still do its fetch/render/copy work —
	/// i.e. the tile is missing, or it exists but isn't fresh by this
	/// predicate. `existing_created`/`existing_hash` come from the
	/// destination's extra-info snapshot (§4.H step 4); `candidate_hash` is
	/// the hash of the newly produced bytes, known only for predicates that
	/// already had to produce them to decide (§8 invariant 7).
	#[must_use]
	pub fn should_refresh(self, existing_created: Option<i64>, existing_hash: Option<&str>, candidate_hash: Option<&str>) -> bool {
		match self {
			RefreshPredicate::Always => true,
			RefreshPredicate::Before(t) => existing_created.is_none_or(|c| c < t),
			RefreshPredicate::HashDiffers => match (existing_hash, candidate_hash) {
				(Some(a), Some(b)) => a != b,
				_ => true,
			},
		}
	}

	/// Whether this predicate needs a destination extra-info snapshot before
	/// driving tile tasks (§4.H step 4: "If the predicate is hash-based or
	/// age-based..."). `Always` needs none.
	#[must_use]
	pub fn needs_snapshot(self) -> bool {
		!matches!(self, RefreshPredicate::Always)
	}

	/// Whether the snapshot should carry hashes (`true`) or created
	/// timestamps (`false`), matching `tileExtraInfo`'s `byCreated` flag.
	#[must_use]
	pub fn snapshot_by_created(self) -> bool {
		matches!(self, RefreshPredicate::Before(_))
	}
}

fn now_millis() -> i64 {
	SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_millis() as i64
}
