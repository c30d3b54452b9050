//! `versatiles seed` (§4.H): populates a destination store from an HTTP
//! origin.

use super::{coverage_args::CoverageArgs, location::open_store, refresh_args::RefreshArgs};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use versatiles_container::jobs::{JobHandle, RefreshPredicate, SeedConfig, run_seed};
use versatiles_core::TileScheme;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Destination store to seed (directory, `*.versatiles` file, or a
	/// `postgres://...#dataset` URI).
	#[arg(required = true)]
	destination: String,

	/// Origin URL template containing literal `{z}`, `{x}`, `{y}` placeholders.
	#[arg(long, required = true)]
	source_url: String,

	/// Row-numbering convention the origin expects.
	#[arg(long, default_value = "xyz")]
	source_scheme: String,

	#[command(flatten)]
	coverage: CoverageArgs,

	#[command(flatten)]
	refresh: RefreshArgs,

	/// Maximum concurrent in-flight tile tasks.
	#[arg(long, default_value_t = 16)]
	concurrency: usize,

	/// Maximum fetch attempts per tile before giving up on it.
	#[arg(long, default_value_t = 3)]
	max_try: u32,

	/// Per-attempt HTTP timeout, in seconds.
	#[arg(long, default_value_t = 60)]
	timeout_seconds: u64,

	/// Store fully transparent tiles instead of skipping them.
	#[arg(long)]
	store_transparent: bool,
}

#[tokio::main]
pub async fn run(args: &Subcommand) -> Result<()> {
	let destination = Arc::new(open_store(&args.destination, true).await?);
	let source_scheme = TileScheme::parse_str(&args.source_scheme)
		.ok_or_else(|| anyhow::anyhow!("unknown --source-scheme '{}'", args.source_scheme))?;

	let config = SeedConfig {
		destination,
		source_url: args.source_url.clone(),
		source_scheme,
		coverages: vec![args.coverage.resolve()?],
		refresh: RefreshPredicate::resolve(&args.refresh.resolve()?)?,
		concurrency: args.concurrency,
		max_try: args.max_try,
		timeout: Duration::from_secs(args.timeout_seconds),
		store_transparent: args.store_transparent,
		metadata_patch: None,
	};

	let handle = Arc::new(JobHandle::new(0));
	let state = run_seed(config, handle).await?;
	eprintln!("seed: {}/{} tiles completed", state.completed, state.total);
	Ok(())
}
