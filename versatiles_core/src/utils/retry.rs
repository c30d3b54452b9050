//! Generic retry-with-delay for the flaky I/O operations §4.C wraps (HTTP GET,
//! SQL statements, remote downloads): attempt up to `max_try` times, sleeping
//! `delay` between attempts, propagating the last failure.

use std::{future::Future, time::Duration};

/// Runs `make_attempt` up to `max_try` times (at least once), sleeping `delay`
/// between failed attempts. Returns the first success, or the last error if
/// every attempt fails.
///
/// # Panics
/// Panics if `max_try == 0`.
pub async fn retry_async<T, E, F, Fut>(max_try: u32, delay: Duration, mut make_attempt: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
{
	assert!(max_try > 0, "max_try must be at least 1");
	let mut attempt = 0;
	loop {
		attempt += 1;
		match make_attempt().await {
			Ok(value) => return Ok(value),
			Err(err) => {
				if attempt >= max_try {
					return Err(err);
				}
				tokio::time::sleep(delay).await;
			}
		}
	}
}
