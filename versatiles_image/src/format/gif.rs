//! GIF encoder for the renderer's finalize step.
//!
//! `TileFormat` has no dedicated GIF variant (see
//! `versatiles_core::utils::format_detect`, which reports sniffed GIF bytes
//! as `TileFormat::BIN` with an `image/gif` content type); this module is
//! called directly by callers that already know they want GIF rather than
//! going through [`super::encode`]'s `TileFormat`-keyed dispatch.

use anyhow::{Result, anyhow};
use image::{DynamicImage, ImageFormat};
use versatiles_core::Blob;
use versatiles_derive::context;

#[context("encoding {}x{} image as GIF", image.width(), image.height())]
pub fn encode(image: &DynamicImage) -> Result<Blob> {
	let mut buffer: Vec<u8> = Vec::new();
	image
		.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Gif)
		.map_err(|e| anyhow!("Failed to encode GIF image: {e}"))?;
	Ok(Blob::from(buffer))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::traits::DynamicImageTraitTest;

	#[test]
	fn encodes_a_small_image() -> Result<()> {
		let img = DynamicImage::new_test_rgb();
		let blob = encode(&img)?;
		assert!(!blob.is_empty());
		assert!(blob.as_slice().starts_with(b"GIF8"));
		Ok(())
	}
}
