//! Byte-magic detection of tile payloads.
//!
//! Inspects the leading bytes of a tile body to recover its format, MIME
//! content-type and, for PBF bodies, whether the bytes are already
//! gzip/deflate wrapped. This is the only place such sniffing happens —
//! stores and the read pipeline call it instead of trusting a file
//! extension, since origins and renderers hand back raw bytes with no
//! extension attached.

use crate::TileFormat;
use std::fmt;

/// The outcome of sniffing a tile payload's magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedFormat {
	pub format: TileFormat,
	pub content_type: &'static str,
	pub content_encoding: Option<&'static str>,
}

impl fmt::Display for DetectedFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.content_type, self.format)
	}
}

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_START: [u8; 2] = [0xFF, 0xD8];
const JPEG_END: [u8; 2] = [0xFF, 0xD9];
const GIF87A: [u8; 6] = *b"GIF87a";
const GIF89A: [u8; 6] = *b"GIF89a";
const DEFLATE_MAGIC: [u8; 2] = [0x78, 0x9C];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Sniff the magic bytes of a tile payload.
///
/// Recognizes PNG, JPEG, GIF and WebP; everything else is reported as PBF
/// (`application/x-protobuf`), with `content_encoding` set when the leading
/// bytes look like a gzip or deflate wrapper. This mirrors the loose "treat
/// the rest as vector tile data" fallback tileservers use on the read path —
/// callers that need a hard failure on garbage input (e.g. validating an
/// uploaded sprite sheet) should additionally check [`looks_like_image`].
#[must_use]
pub fn detect_format(data: &[u8]) -> DetectedFormat {
	if data.starts_with(&PNG_MAGIC) {
		return DetectedFormat {
			format: TileFormat::PNG,
			content_type: "image/png",
			content_encoding: None,
		};
	}

	if data.len() >= 4 && data.starts_with(&JPEG_START) && data.ends_with(&JPEG_END) {
		return DetectedFormat {
			format: TileFormat::JPG,
			content_type: "image/jpeg",
			content_encoding: None,
		};
	}

	if data.len() >= 6 && (data.starts_with(&GIF87A) || data.starts_with(&GIF89A)) {
		return DetectedFormat {
			format: TileFormat::BIN, // no dedicated GIF tile format; content-type carries it
			content_type: "image/gif",
			content_encoding: None,
		};
	}

	if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
		return DetectedFormat {
			format: TileFormat::WEBP,
			content_type: "image/webp",
			content_encoding: None,
		};
	}

	let content_encoding = if data.starts_with(&GZIP_MAGIC) {
		Some("gzip")
	} else if data.starts_with(&DEFLATE_MAGIC) {
		Some("deflate")
	} else {
		None
	};

	DetectedFormat {
		format: TileFormat::PBF,
		content_type: "application/x-protobuf",
		content_encoding,
	}
}

/// Returns true if the magic bytes identify one of the four raster image
/// formats this service understands (PNG/JPEG/GIF/WebP).
#[must_use]
pub fn looks_like_image(data: &[u8]) -> bool {
	!matches!(
		detect_format(data),
		DetectedFormat {
			format: TileFormat::PBF,
			..
		}
	)
}
