//! `versatiles render` (§4.H, §4.G): rasterizes a style into a destination
//! store, one pooled renderer lease per tile.
//!
//! No native rasterizer backend ships with this binary — only
//! [`NullRasterizer`] is available, a flat-color placeholder used the same
//! way it is in `versatiles_container`'s own tests. Wiring in a real
//! rasterizer is a matter of supplying a different factory closure here.

use super::{coverage_args::CoverageArgs, location::open_store, refresh_args::RefreshArgs};
use anyhow::Result;
use std::sync::Arc;
use versatiles_container::jobs::{JobHandle, RefreshPredicate, RenderConfig, run_render};
use versatiles_container::render::{NullRasterizer, Rasterizer, RenderFormat, RendererPool};
use versatiles_container::Repository;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Destination store to render into.
	#[arg(required = true)]
	destination: String,

	#[command(flatten)]
	coverage: CoverageArgs,

	#[command(flatten)]
	refresh: RefreshArgs,

	/// Maximum concurrent renderer leases in flight.
	#[arg(long, default_value_t = 4)]
	concurrency: usize,

	/// Output tile size in pixels.
	#[arg(long, default_value_t = 256)]
	tile_size: u32,

	/// Output pixel density multiplier.
	#[arg(long, default_value_t = 1)]
	scale: u32,

	/// Output image format.
	#[arg(long, value_enum, default_value = "png")]
	format: OutputFormat,

	/// Store fully transparent tiles instead of skipping them.
	#[arg(long)]
	store_transparent: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
	Png,
	Jpeg,
	Webp,
	Gif,
}

impl From<OutputFormat> for RenderFormat {
	fn from(value: OutputFormat) -> RenderFormat {
		match value {
			OutputFormat::Png => RenderFormat::Png,
			OutputFormat::Jpeg => RenderFormat::Jpeg,
			OutputFormat::Webp => RenderFormat::Webp,
			OutputFormat::Gif => RenderFormat::Gif,
		}
	}
}

#[tokio::main]
pub async fn run(args: &Subcommand) -> Result<()> {
	let destination = Arc::new(open_store(&args.destination, true).await?);

	let factory: Arc<dyn Fn() -> anyhow::Result<Box<dyn Rasterizer>> + Send + Sync> =
		Arc::new(|| Ok(Box::new(NullRasterizer { created: 0, probe_url: None }) as Box<dyn Rasterizer>));
	let pool = Arc::new(RendererPool::new(factory, args.concurrency)?);

	let config = RenderConfig {
		pool,
		// No style is loaded by this CLI path (§1 Non-goals: no style
		// language), so the rasterizer has nothing registered to resolve —
		// an empty repository keeps the fallback-tile path as the only
		// outcome of any sub-resource request it might still issue.
		repository: Arc::new(Repository::new()),
		destination,
		coverages: vec![args.coverage.resolve()?],
		refresh: RefreshPredicate::resolve(&args.refresh.resolve()?)?,
		concurrency: args.concurrency,
		tile_size: args.tile_size,
		scale: args.scale,
		format: args.format.clone().into(),
		store_transparent: args.store_transparent,
		metadata_patch: None,
	};

	let handle = Arc::new(JobHandle::new(0));
	let state = run_render(config, handle).await?;
	eprintln!("render: {}/{} tiles completed", state.completed, state.total);
	Ok(())
}
