//! `versatiles export` (§4.H): copies an existing configured data source into
//! a new store, through the same read pipeline the request path uses.

use super::{coverage_args::CoverageArgs, location::open_store, refresh_args::RefreshArgs};
use anyhow::Result;
use std::sync::Arc;
use versatiles_container::jobs::{ExportConfig, JobHandle, RefreshPredicate, run_export};
use versatiles_container::{TileReadConfig, TileReadPipeline};
use versatiles_core::TileScheme;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Source store to read from.
	#[arg(required = true)]
	source: String,

	/// Destination store to write into.
	#[arg(required = true)]
	destination: String,

	/// Origin URL template to forward a source miss to, if any.
	#[arg(long)]
	source_url: Option<String>,

	/// Row-numbering convention the source's origin expects.
	#[arg(long, default_value = "xyz")]
	source_scheme: String,

	#[command(flatten)]
	coverage: CoverageArgs,

	#[command(flatten)]
	refresh: RefreshArgs,

	/// Maximum concurrent in-flight tile tasks.
	#[arg(long, default_value_t = 16)]
	concurrency: usize,

	/// Store fully transparent tiles instead of skipping them.
	#[arg(long)]
	store_transparent: bool,
}

#[tokio::main]
pub async fn run(args: &Subcommand) -> Result<()> {
	let source_store = open_store(&args.source, false).await?;
	let source_scheme = TileScheme::parse_str(&args.source_scheme)
		.ok_or_else(|| anyhow::anyhow!("unknown --source-scheme '{}'", args.source_scheme))?;
	let source = Arc::new(TileReadPipeline::new(
		Arc::new(source_store),
		TileReadConfig {
			source_url: args.source_url.clone(),
			source_scheme,
			store_cache: false,
			store_transparent: args.store_transparent,
		},
	));

	let destination = Arc::new(open_store(&args.destination, true).await?);

	let config = ExportConfig {
		source,
		destination,
		coverages: vec![args.coverage.resolve()?],
		refresh: RefreshPredicate::resolve(&args.refresh.resolve()?)?,
		concurrency: args.concurrency,
		store_transparent: args.store_transparent,
		metadata_patch: None,
	};

	let handle = Arc::new(JobHandle::new(0));
	let state = run_export(config, handle).await?;
	eprintln!("export: {}/{} tiles completed", state.completed, state.total);
	Ok(())
}
