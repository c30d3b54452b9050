//! The rasterizer-facing renderer surface (§4.F, §4.G): resolving a style's
//! sub-resource URLs, driving a pooled native rasterizer, and finalizing the
//! painted frame into the requested output encoding.

mod bridge;
mod finalize;
mod fallback;
mod pool;
mod router;

pub use bridge::render_with_resolver;
pub use fallback::fallback_tile;
pub use finalize::{RenderFormat, finalize};
pub use pool::{AssetRequest, NullRasterizer, Rasterizer, RendererManager, RendererPool, RequestResolver, resolve_render_params};
pub use router::{RouterResponse, resolve, resolve_with_fallback};
