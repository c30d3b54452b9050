//! Converting a rasterizer's raw frame into the requested wire encoding
//! (§4.G "Finalize"). `TileFormat` has no GIF member (§4.G note, mirrored
//! from `versatiles_core::utils::format_detect`), so the renderer's output
//! alphabet gets its own small enum instead of reusing `TileFormat` directly.

use image::DynamicImage;
use versatiles_core::{Blob, StoreError};
use versatiles_image::{format, traits::DynamicImageTraitOperation};

/// The encodings a rasterized frame may be finalized into. `pbf` is not a
/// legal render output (§4.G) and so has no member here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
	Png,
	Jpeg,
	Webp,
	Gif,
}

/// Encodes `image` as `format` (§4.G): PNG at its strongest compression
/// bucket, WebP lossless, GIF at the codec's only supported setting. JPEG
/// cannot be truly lossless, so the highest quality the encoder accepts
/// (99) stands in for the nominal "quality 100" (§4.G, §9).
///
/// `downscale` divides both dimensions by the given integer factor before
/// encoding — used for the zoom-0 512→256 tile hack (§4.G E6).
pub fn finalize(image: &DynamicImage, format: RenderFormat, downscale: Option<u32>) -> Result<Blob, StoreError> {
	let scaled;
	let image = match downscale {
		Some(factor) if factor > 1 => {
			scaled = image.get_scaled_down(factor).map_err(StoreError::Other)?;
			&scaled
		}
		_ => image,
	};

	match format {
		RenderFormat::Png => format::png::encode(image, Some(0)),
		RenderFormat::Jpeg => format::jpeg::encode(image, Some(99)),
		RenderFormat::Webp => format::webp::encode(image, Some(100)),
		RenderFormat::Gif => format::gif::encode(image),
	}
	.map_err(|e| StoreError::RenderFailed(e.to_string()))
}
