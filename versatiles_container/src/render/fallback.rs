//! Precomputed fallback tiles (§4.F): returned in place of a genuine
//! response when the router or renderer fails, so a map client always gets
//! a decodable tile of the format it asked for rather than a broken image
//! or an empty PBF layer.

use super::{RenderFormat, finalize};
use image::DynamicImage;
use lazy_static::lazy_static;
use versatiles_core::Blob;

const FALLBACK_TILE_SIZE: u32 = 256;

lazy_static! {
	static ref FALLBACK_PNG: Blob = render_transparent(RenderFormat::Png);
	static ref FALLBACK_JPEG: Blob = render_transparent(RenderFormat::Jpeg);
	static ref FALLBACK_WEBP: Blob = render_transparent(RenderFormat::Webp);
	static ref FALLBACK_GIF: Blob = render_transparent(RenderFormat::Gif);
}

fn render_transparent(format: RenderFormat) -> Blob {
	let image = DynamicImage::new_rgba8(FALLBACK_TILE_SIZE, FALLBACK_TILE_SIZE);
	finalize(&image, format, None).expect("encoding a blank fallback tile never fails")
}

/// The fallback tile for a given output format (§4.F). PBF has no fallback
/// image — the router simply returns an empty layer for vector tiles,
/// which callers handle upstream.
#[must_use]
pub fn fallback_tile(format: RenderFormat) -> Blob {
	match format {
		RenderFormat::Png => FALLBACK_PNG.clone(),
		RenderFormat::Jpeg => FALLBACK_JPEG.clone(),
		RenderFormat::Webp => FALLBACK_WEBP.clone(),
		RenderFormat::Gif => FALLBACK_GIF.clone(),
	}
}
