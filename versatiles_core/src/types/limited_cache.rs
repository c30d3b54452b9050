//! This module provides a generic limited cache that stores key-value pairs up to a specified byte size limit.
//!
//! The `LimitedCache` manages entries in a manner resembling an LRU cache, ensuring it does not exceed
//! a predefined number of elements (derived from the byte size limit). Once the limit is reached,
//! least-recently accessed items are removed automatically.

use anyhow::Result;
use lru::LruCache;
use std::{fmt::Debug, hash::Hash, mem::size_of, num::NonZeroUsize, ops::Div};
use versatiles_derive::context;

/// A generic cache that stores key-value pairs up to a specified total size limit (in bytes).
///
/// The cache uses a least-recently-used (LRU) strategy when it needs to remove items.
/// When the cache is at capacity, the least recently accessed item is automatically evicted.
///
/// # Type Parameters
/// - `K`: The type of the keys stored in the cache. Must implement `Eq + Hash + Clone`.
/// - `V`: The type of the values stored in the cache. Must implement `Clone`.
///
/// # Examples
///
/// ```rust
/// use versatiles_core::LimitedCache;
///
/// // Create a cache with a maximum byte size of 1,000,000.
/// // The actual number of elements that can be stored depends on
/// // the size of (K, V).
/// let mut cache = LimitedCache::<i32, u64>::with_maximum_size(1_000_000);
///
/// // Insert some data
/// cache.add(1, 42);
///
/// // Retrieve data
/// assert_eq!(cache.get(&1), Some(42));
/// ```
pub struct LimitedCache<K, V> {
	/// Internal LRU cache storing key-value pairs.
	cache: LruCache<K, V>,
}

impl<K, V> LimitedCache<K, V>
where
	K: Clone + Debug + Eq + Hash + PartialEq,
	V: Clone,
{
	/// Creates a new `LimitedCache` with a specified maximum **byte** size.
	///
	/// Internally, it computes how many `(K, V)` pairs can fit into that byte size,
	/// based on `size_of::<K>() + size_of::<V>()`.
	///
	/// # Arguments
	/// * `maximum_size` - The total byte size the cache is allowed to occupy.
	///
	/// # Panics
	///
	/// Panics if `maximum_size` is too small to store even a single `(K, V)` pair.
	///
	/// # Examples
	///
	/// ```rust
	/// use versatiles_core::LimitedCache;
	///
	/// let cache: LimitedCache<u64, i32> = LimitedCache::with_maximum_size(1024);
	/// ```
	#[must_use]
	pub fn with_maximum_size(maximum_size: usize) -> Self {
		// Compute how many (K, V) pairs can fit into `maximum_size`.
		let per_element_size = size_of::<K>() + size_of::<V>();
		let max_length = maximum_size.div(per_element_size);
		assert!(
			max_length > 0,
			"size ({maximum_size} bytes) is too small to store a single element of size {per_element_size} bytes"
		);

		Self {
			cache: LruCache::new(NonZeroUsize::new(max_length).unwrap()),
		}
	}

	/// Retrieves a cloned value from the cache by its key, updating the last access time.
	///
	/// If the key exists:
	/// - The method marks this key as most recently used.
	/// - Returns a copy of the stored value.
	///
	/// If the key does not exist, returns `None`.
	///
	/// # Examples
	///
	/// ```rust
	/// use versatiles_core::LimitedCache;
	///
	/// let mut cache = LimitedCache::with_maximum_size(1_000);
	/// cache.add("foo", 42);
	/// assert_eq!(cache.get(&"foo"), Some(42));
	/// assert_eq!(cache.get(&"bar"), None);
	/// ```
	pub fn get(&mut self, key: &K) -> Option<V> {
		self.cache.get(key).cloned()
	}

	/// Gets the value corresponding to `key` if it exists; otherwise calls the given callback
	/// to produce the value, stores it in the cache, and returns it.
	///
	/// # Errors
	///
	/// If the callback returns an error (`anyhow::Error`), this method propagates that error.
	///
	/// # Examples
	///
	/// ```rust
	/// # use versatiles_core::LimitedCache;
	/// # use anyhow::{anyhow, Result};
	/// fn expensive_operation() -> Result<u64> {
	///     Ok(999)
	/// }
	///
	/// fn example() -> Result<()> {
	///     let mut cache = LimitedCache::with_maximum_size(1_000);
	///     let val = cache.get_or_set(&"key", || expensive_operation())?;
	///     assert_eq!(val, 999);
	///
	///     // A second call should retrieve from cache
	///     let val_again = cache.get(&"key");
	///     assert_eq!(val_again, Some(999));
	///     Ok(())
	/// }
	/// ```
	#[context("Could not get or set cache value for key '{:?}'", key)]
	pub fn get_or_set<F>(&mut self, key: &K, callback: F) -> Result<V>
	where
		F: FnOnce() -> Result<V>,
	{
		if let Some(cached) = self.get(key) {
			return Ok(cached);
		}

		// Cache miss
		let value = callback()?;
		let cloned_value = value.clone();
		self.add(key.clone(), value);
		Ok(cloned_value)
	}

	/// Adds a new `key -> value` pair to the cache, returning the inserted value.
	///
	/// - If adding triggers the capacity limit, the least recently used item is automatically evicted.
	/// - The newly added item becomes the most recently used item.
	///
	/// # Examples
	///
	/// ```rust
	/// use versatiles_core::LimitedCache;
	///
	/// let mut cache = LimitedCache::with_maximum_size(1_000);
	/// let inserted = cache.add("foo", 123);
	/// assert_eq!(inserted, 123);
	/// ```
	pub fn add(&mut self, key: K, value: V) -> V {
		let cloned_value = value.clone();
		self.cache.put(key, value);
		cloned_value
	}

	/// Returns the current number of entries in the cache.
	///
	/// # Examples
	///
	/// ```rust
	/// use versatiles_core::LimitedCache;
	///
	/// let mut cache = LimitedCache::with_maximum_size(1_000);
	/// assert_eq!(cache.len(), 0);
	/// cache.add("foo", 42);
	/// assert_eq!(cache.len(), 1);
	/// ```
	pub fn len(&self) -> usize {
		self.cache.len()
	}

	/// Returns true if the cache contains no entries.
	///
	/// # Examples
	///
	/// ```rust
	/// use versatiles_core::LimitedCache;
	///
	/// let mut cache = LimitedCache::with_maximum_size(1_000);
	/// assert!(cache.is_empty());
	/// cache.add("foo", 42);
	/// assert!(!cache.is_empty());
	/// ```
	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}

	/// Returns the maximum capacity of the cache.
	///
	/// # Examples
	///
	/// ```rust
	/// use versatiles_core::LimitedCache;
	///
	/// let cache: LimitedCache<u64, u64> = LimitedCache::with_maximum_size(1_000);
	/// // Capacity depends on element size
	/// assert!(cache.capacity() > 0);
	/// ```
	pub fn capacity(&self) -> usize {
		self.cache.cap().get()
	}
}

impl<K, V> Debug for LimitedCache<K, V>
where
	K: Clone + Debug + Eq + Hash + PartialEq,
	V: Clone,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LimitedCache")
			.field("length", &self.len())
			.field("max_length", &self.capacity())
			.finish()
	}
}
