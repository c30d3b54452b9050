//! `versatiles serve`: stands up the minimal HTTP front door over a
//! [`Repository`] populated from one or more `id=location` data sources.

use super::location::open_store;
use anyhow::{Context, Result};
use std::sync::Arc;
use versatiles_container::{Repository, TileReadConfig, TileReadPipeline};
use versatiles_core::TileScheme;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// One or more data sources as `id=location`, e.g. `osm=./tiles.versatiles`.
	#[arg(required = true)]
	sources: Vec<String>,

	/// Serve via socket ip.
	#[arg(short = 'i', long, default_value = "0.0.0.0")]
	ip: String,

	/// Serve via port.
	#[arg(short, long, default_value_t = 8080)]
	port: u16,
}

#[tokio::main]
pub async fn run(args: &Subcommand) -> Result<()> {
	let repository = Repository::new();

	for source in &args.sources {
		let (id, location) = source
			.split_once('=')
			.with_context(|| format!("data source '{source}' must be of the form 'id=location'"))?;
		let store = open_store(location, false).await?;
		let pipeline = TileReadPipeline::new(
			Arc::new(store),
			TileReadConfig {
				source_url: None,
				source_scheme: TileScheme::Xyz,
				store_cache: false,
				store_transparent: true,
			},
		);
		repository.insert_data(id, pipeline);
	}

	let app = crate::server::build_app(Arc::new(repository));
	let addr = format!("{}:{}", args.ip, args.port).parse()?;
	crate::server::serve(app, addr).await
}
