//! Shared `--refresh-*` flags for the seed/export/render subcommands (§4.H
//! step 2): at most one of a timestamp, an age in days, or hash comparison —
//! omitting all three always refreshes.

use anyhow::{bail, Result};
use versatiles_container::jobs::RefreshBefore;

#[derive(clap::Args, Debug)]
pub struct RefreshArgs {
	/// Skip tiles created at or after this RFC 3339 timestamp.
	#[arg(long, value_name = "TIMESTAMP")]
	pub refresh_before: Option<String>,

	/// Skip tiles younger than this many days.
	#[arg(long, value_name = "DAYS", conflicts_with = "refresh_before")]
	pub refresh_max_age_days: Option<f64>,

	/// Skip tiles whose freshly produced bytes hash the same as what's
	/// already stored.
	#[arg(long, conflicts_with_all = ["refresh_before", "refresh_max_age_days"])]
	pub refresh_by_hash: bool,
}

impl RefreshArgs {
	pub fn resolve(&self) -> Result<RefreshBefore> {
		Ok(if let Some(ts) = &self.refresh_before {
			RefreshBefore::Timestamp(ts.clone())
		} else if let Some(days) = self.refresh_max_age_days {
			if days < 0.0 {
				bail!("--refresh-max-age-days must not be negative");
			}
			RefreshBefore::AgeDays(days)
		} else if self.refresh_by_hash {
			RefreshBefore::HashCompare
		} else {
			RefreshBefore::Always
		})
	}
}
