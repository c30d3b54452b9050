//! The minimal HTTP surface wrapping a [`Repository`] (§4.E "the interface
//! the core consumes") — routing, headers and OpenAPI-style ergonomics are
//! explicitly out of scope for the core's own spec, so this stays a thin
//! axum front door rather than a full server framework.

use anyhow::Result;
use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
	Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use versatiles_container::Repository;
use versatiles_core::{StoreError, TileCoord};

#[derive(Clone)]
struct AppState {
	repository: Arc<Repository>,
}

/// Builds the axum app: one route per §4.E data source, `/tiles/{id}/{z}/{x}/{y}`
/// (an optional trailing `.ext` is accepted and ignored — the bytes already
/// carry their own format, sniffed by [`versatiles_core::detect_format`]).
#[must_use]
pub fn build_app(repository: Arc<Repository>) -> Router {
	Router::new()
		.route("/tiles/{id}/{z}/{x}/{y}", get(serve_tile))
		.with_state(AppState { repository })
		.layer(CorsLayer::permissive())
}

async fn serve_tile(State(state): State<AppState>, Path((id, z, x, y)): Path<(String, u8, u32, String)>) -> Response {
	let y = y.split('.').next().unwrap_or(&y);
	let Ok(y) = y.parse::<u32>() else {
		return StatusCode::BAD_REQUEST.into_response();
	};
	let Ok(coord) = TileCoord::new(z, x, y) else {
		return StatusCode::BAD_REQUEST.into_response();
	};

	let pipeline = match state.repository.data(&id) {
		Ok(pipeline) => pipeline,
		Err(StoreError::NotFound) => return StatusCode::NOT_FOUND.into_response(),
		Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
	};

	match pipeline.read_tile(coord).await {
		Ok(data) => {
			let detected = versatiles_core::detect_format(&data);
			let mut response = data.into_response();
			response
				.headers_mut()
				.insert(axum::http::header::CONTENT_TYPE, detected.content_type.parse().unwrap());
			if let Some(encoding) = detected.content_encoding {
				response
					.headers_mut()
					.insert(axum::http::header::CONTENT_ENCODING, encoding.parse().unwrap());
			}
			response
		}
		Err(StoreError::NotFound) => StatusCode::NOT_FOUND.into_response(),
		Err(e) => {
			log::warn!("tile request for {id}/{z}/{x}/{y} failed: {e}");
			StatusCode::INTERNAL_SERVER_ERROR.into_response()
		}
	}
}

/// Serves `app` on `addr` until the process is interrupted.
pub async fn serve(app: Router, addr: std::net::SocketAddr) -> Result<()> {
	let listener = tokio::net::TcpListener::bind(addr).await?;
	log::info!("listening on http://{addr}");
	axum::serve(listener, app).await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::Request;
	use std::sync::Arc;
	use tempfile::tempdir;
	use tower::ServiceExt;
	use versatiles_container::{DirectorySidecarStore, TileReadConfig, TileReadPipeline, TileStore};
	use versatiles_core::TileScheme;

	#[tokio::test]
	async fn serves_a_stored_tile() {
		let dir = tempdir().unwrap();
		let store = TileStore::DirectorySidecar(DirectorySidecarStore::open(dir.path().to_path_buf(), true).await.unwrap());
		let coord = TileCoord::new(0, 0, 0).unwrap();
		store.put_tile(coord, vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], true).await.unwrap();

		let pipeline = TileReadPipeline::new(
			Arc::new(store),
			TileReadConfig {
				source_url: None,
				source_scheme: TileScheme::Xyz,
				store_cache: false,
				store_transparent: true,
			},
		);
		let repository = Repository::new();
		repository.insert_data("demo", pipeline);

		let app = build_app(Arc::new(repository));
		let response = app
			.oneshot(Request::builder().uri("/tiles/demo/0/0/0").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn unknown_source_is_not_found() {
		let app = build_app(Arc::new(Repository::new()));
		let response = app
			.oneshot(Request::builder().uri("/tiles/missing/0/0/0").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}
}
