//! Shared `--zoom`/`--bbox` flags a bulk job turns into a [`Coverage`] (§3).

use anyhow::{Context, Result};
use versatiles_container::jobs::Coverage;
use versatiles_core::GeoBBox;

#[derive(clap::Args, Debug)]
pub struct CoverageArgs {
	/// Zoom level to process.
	#[arg(long, default_value_t = 0)]
	pub zoom: u8,

	/// Geographic bounding box `lon_min,lat_min,lon_max,lat_max`. Defaults to
	/// the whole world.
	#[arg(long, value_name = "LON_MIN,LAT_MIN,LON_MAX,LAT_MAX")]
	pub bbox: Option<String>,
}

impl CoverageArgs {
	pub fn resolve(&self) -> Result<Coverage> {
		let bbox = match &self.bbox {
			Some(s) => parse_bbox(s)?,
			None => GeoBBox::new(-180.0, -85.051_129, 180.0, 85.051_129)?,
		};
		Ok(Coverage { zoom: self.zoom, bbox })
	}
}

fn parse_bbox(s: &str) -> Result<GeoBBox> {
	let parts: Vec<f64> = s
		.split(',')
		.map(|part| part.trim().parse::<f64>().with_context(|| format!("invalid number in bbox '{s}'")))
		.collect::<Result<_>>()?;
	let [x_min, y_min, x_max, y_max]: [f64; 4] = parts.try_into().map_err(|_| anyhow::anyhow!("bbox '{s}' must have exactly 4 comma-separated numbers"))?;
	Ok(GeoBBox::new(x_min, y_min, x_max, y_max)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_bbox_covers_the_world() {
		let args = CoverageArgs { zoom: 0, bbox: None };
		let coverage = args.resolve().unwrap();
		assert_eq!(coverage.zoom, 0);
	}

	#[test]
	fn parses_a_comma_separated_bbox() {
		let bbox = parse_bbox("-10, -5, 10, 5").unwrap();
		assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (-10.0, -5.0, 10.0, 5.0));
	}

	#[test]
	fn rejects_a_malformed_bbox() {
		assert!(parse_bbox("1,2,3").is_err());
	}
}
