//! `versatiles probe`: prints a tile store's metadata and, optionally, its
//! tile count over a zoom/bbox range.

use super::{coverage_args::CoverageArgs, location::open_store};
use anyhow::Result;
use versatiles_container::jobs::{enumerate, normalize_coverages};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Tile store to probe.
	#[arg(required = true)]
	location: String,

	/// Also count tiles present in this zoom/bbox range.
	#[arg(long)]
	count_tiles: bool,

	#[command(flatten)]
	coverage: CoverageArgs,
}

#[tokio::main]
pub async fn run(args: &Subcommand) -> Result<()> {
	let store = open_store(&args.location, false).await?;
	let metadata = store.get_metadata().await?;
	println!("scheme: {:?}", metadata.scheme);
	for (name, value) in metadata.tilejson.as_object().0 {
		println!("{name}: {}", value.stringify());
	}

	if args.count_tiles {
		let ranges = normalize_coverages(&[args.coverage.resolve()?])?;
		let mut present = 0u64;
		let mut total = 0u64;
		for coord in enumerate(&ranges) {
			total += 1;
			if store.get_tile(coord).await.is_ok() {
				present += 1;
			}
		}
		println!("tiles present: {present}/{total}");
	}

	Ok(())
}
