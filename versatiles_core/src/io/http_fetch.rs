//! Timeout-bounded HTTP GET for tile/asset origin forwarding (§4.C).
//!
//! Distinct from [`super::DataReaderHttp`], which issues byte-range requests
//! against a single remote archive. This module issues whole-body GETs
//! against a tile/asset origin URL, with the sentinel treatment of `204` and
//! `404` that the read pipeline (§4.E) and bulk seed job (§4.H) rely on to
//! decide whether a miss at origin is retryable.

use crate::StoreError;
use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use std::time::Duration;

lazy_static! {
	static ref HTTP_CLIENT: Client = Client::builder()
		.tcp_keepalive(Duration::from_secs(600))
		.use_rustls_tls()
		.build()
		.expect("failed to build default http client");
}

/// Issues a GET against `url`, bounding the whole request (connect + body) by
/// `timeout`. A non-200 status becomes `StoreError::RemoteStatus`; §7 singles
/// out 204/404 as sentinel "absent at origin" statuses that callers must not
/// retry.
pub async fn http_get(url: &str, timeout: Duration) -> Result<Vec<u8>, StoreError> {
	let fut = HTTP_CLIENT.get(url).send();
	let response = tokio::time::timeout(timeout, fut)
		.await
		.map_err(|_| StoreError::OperationTimeout)?
		.map_err(|e| StoreError::Other(e.into()))?;

	let status = response.status();
	if status != StatusCode::OK {
		return Err(StoreError::RemoteStatus(status.as_u16()));
	}

	let body_fut = response.bytes();
	let body = tokio::time::timeout(timeout, body_fut)
		.await
		.map_err(|_| StoreError::OperationTimeout)?
		.map_err(|e| StoreError::Other(e.into()))?;
	Ok(body.to_vec())
}
