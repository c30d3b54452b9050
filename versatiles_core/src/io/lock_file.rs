//! Scoped file locking for the directory+sidecar store backend.
//!
//! A write to a target path `F` is protected by exclusively creating a
//! sidecar `F.lock`: the writer renders into `F.tmp` and atomically renames
//! it to `F` before removing the lock, so concurrent readers never observe a
//! partial file and concurrent writers serialize on the lock file itself.

use anyhow::Result;
use std::{
	path::{Path, PathBuf},
	time::{Duration, SystemTime, UNIX_EPOCH},
};
use thiserror::Error;
use tokio::{
	fs,
	io::AsyncWriteExt,
	time::{Instant, sleep},
};

const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum LockError {
	#[error("timed out waiting for lock on {0:?}")]
	LockTimeout(PathBuf),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

fn lock_path(target: &Path) -> PathBuf {
	let mut p = target.as_os_str().to_owned();
	p.push(".lock");
	PathBuf::from(p)
}

fn tmp_path(target: &Path) -> PathBuf {
	let mut p = target.as_os_str().to_owned();
	p.push(".tmp");
	PathBuf::from(p)
}

async fn acquire(target: &Path, deadline: Instant) -> Result<(), LockError> {
	let lock = lock_path(target);
	loop {
		let body = format!(
			"pid={} t={}",
			std::process::id(),
			SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
		);
		match fs::OpenOptions::new().write(true).create_new(true).open(&lock).await {
			Ok(mut file) => {
				let _ = file.write_all(body.as_bytes()).await;
				return Ok(());
			}
			Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
				if Instant::now() >= deadline {
					return Err(LockError::LockTimeout(target.to_path_buf()));
				}
				sleep(LOCK_RETRY_DELAY).await;
			}
			Err(e) => return Err(e.into()),
		}
	}
}

async fn release(target: &Path) {
	let _ = fs::remove_file(lock_path(target)).await;
}

/// Writes `data` to `target` under a scoped lock, honoring `timeout` as the
/// total time allowed to wait for contending writers.
///
/// On success, `target` contains `data` atomically (via a `.tmp` + rename).
/// On any failure inside the critical section, the `.tmp` file and the lock
/// are removed before the error propagates.
pub async fn write_locked(target: &Path, data: &[u8], timeout: Duration) -> Result<(), LockError> {
	let deadline = Instant::now() + timeout;
	acquire(target, deadline).await?;

	let result = write_locked_inner(target, data).await;
	if result.is_err() {
		let _ = fs::remove_file(tmp_path(target)).await;
	}
	release(target).await;
	result
}

async fn write_locked_inner(target: &Path, data: &[u8]) -> Result<(), LockError> {
	if let Some(parent) = target.parent() {
		fs::create_dir_all(parent).await?;
	}
	let tmp = tmp_path(target);
	fs::write(&tmp, data).await?;
	fs::rename(&tmp, target).await?;
	Ok(())
}

/// Removes `target` under the same scoped lock used by [`write_locked`]. A
/// missing target is treated as success, matching §4.C.
pub async fn remove_locked(target: &Path, timeout: Duration) -> Result<(), LockError> {
	let deadline = Instant::now() + timeout;
	acquire(target, deadline).await?;

	let result = match fs::remove_file(target).await {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
		Err(e) => Err(e.into()),
	};
	release(target).await;
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use tempfile::tempdir;

	#[tokio::test]
	async fn writes_and_reads_back() {
		let dir = tempdir().unwrap();
		let target = dir.path().join("tile.png");
		write_locked(&target, b"hello", Duration::from_secs(1)).await.unwrap();
		assert_eq!(fs::read(&target).await.unwrap(), b"hello");
		assert!(!lock_path(&target).exists());
	}

	#[tokio::test]
	async fn remove_missing_is_ok() {
		let dir = tempdir().unwrap();
		let target = dir.path().join("missing.png");
		remove_locked(&target, Duration::from_secs(1)).await.unwrap();
	}

	#[tokio::test]
	async fn creates_parent_directories() {
		let dir = tempdir().unwrap();
		let target = dir.path().join("3/4/5.png");
		write_locked(&target, b"x", Duration::from_secs(1)).await.unwrap();
		assert!(target.exists());
	}

	#[tokio::test]
	async fn concurrent_writers_serialize() {
		let dir = Arc::new(tempdir().unwrap());
		let target = dir.path().join("shared.png");
		let mut tasks = Vec::new();
		for i in 0..8u8 {
			let target = target.clone();
			tasks.push(tokio::spawn(async move {
				write_locked(&target, &[i; 4], Duration::from_secs(5)).await.unwrap();
			}));
		}
		for t in tasks {
			t.await.unwrap();
		}
		let data = fs::read(&target).await.unwrap();
		assert_eq!(data.len(), 4);
		assert!(data.iter().all(|b| *b == data[0]));
	}

	#[tokio::test]
	async fn times_out_on_contention() {
		let dir = tempdir().unwrap();
		let target = dir.path().join("contended.png");
		acquire(&target, Instant::now() + Duration::from_secs(10)).await.unwrap();

		let err = write_locked(&target, b"x", Duration::from_millis(120)).await.unwrap_err();
		assert!(matches!(err, LockError::LockTimeout(_)));

		release(&target).await;
	}
}
