use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use versatiles::tools;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	#[clap(alias = "server")]
	/// Serve tiles via http
	Serve(tools::serve::Subcommand),

	/// Populate a tile store from an HTTP origin
	Seed(tools::seed::Subcommand),

	/// Copy a tile store's contents into another store
	Export(tools::export::Subcommand),

	/// Rasterize a style into a tile store
	Render(tools::render::Subcommand),

	/// Show information about a tile store
	Probe(tools::probe::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new().filter_level(cli.verbose.log_level_filter()).format_timestamp(None).init();

	run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
	match &cli.command {
		Commands::Serve(arguments) => tools::serve::run(arguments),
		Commands::Seed(arguments) => tools::seed::run(arguments),
		Commands::Export(arguments) => tools::export::run(arguments),
		Commands::Render(arguments) => tools::render::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use super::{run, Cli};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(&cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["versatiles"]).unwrap_err().to_string();
		assert!(err.contains("Usage: versatiles"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["versatiles", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("versatiles "));
	}

	#[test]
	fn probe_subcommand_requires_a_location() {
		let output = run_command(vec!["versatiles", "probe"]).unwrap_err().to_string();
		assert!(output.starts_with("Show information about a tile store"));
	}

	#[test]
	fn serve_subcommand_requires_a_source() {
		let output = run_command(vec!["versatiles", "serve"]).unwrap_err().to_string();
		assert!(output.starts_with("Serve tiles via http"));
	}
}
