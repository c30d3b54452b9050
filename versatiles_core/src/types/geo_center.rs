use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A center point in geographic space, represented by:
/// - `f64` longitude, in the range `[-180, 180]`
/// - `f64` latitude, in the range `[-90, 90]`
/// - `u8` zoom level, typically in the range `[0, 30]`
#[derive(Clone, Copy, PartialEq)]
pub struct GeoCenter(pub f64, pub f64, pub u8);

impl GeoCenter {
	/// Tries to construct an optional `GeoCenter` from an `Option<Vec<f64>>`.
	///
	/// - If the input is `Some(vec)`, attempts a conversion via [`GeoCenter::try_from`].
	/// - If the input is `None`, returns `Ok(None)`.
	///
	/// # Errors
	///
	/// Returns an error if the vector has the wrong length or contains invalid data
	/// (see [`TryFrom<Vec<f64>> for GeoCenter`]).
	///
	/// # Examples
	/// ```
	/// use versatiles_core::types::GeoCenter;
	/// use anyhow::Result;
	///
	/// fn example() -> Result<()> {
	///     let data = Some(vec![100.0, 45.0, 5.0]);
	///     let center_opt = GeoCenter::from_option_vec(data)?;
	///     assert!(center_opt.is_some());
	///     
	///     let none_data: Option<Vec<f64>> = None;
	///     let none_center = GeoCenter::from_option_vec(none_data)?;
	///     assert!(none_center.is_none());
	///     
	///     Ok(())
	/// }
	/// ```
	pub fn from_option_vec(input: Option<Vec<f64>>) -> Result<Option<Self>> {
		match input {
			Some(vec) => Ok(Some(GeoCenter::try_from(vec)?)),
			None => Ok(None),
		}
	}

	/// Converts the `GeoCenter` into a `Vec<f64>` in the form `[longitude, latitude, zoom]`.
	///
	/// Note that `zoom` is cast to `f64`.
	///
	/// # Examples
	/// ```
	/// use versatiles_core::types::GeoCenter;
	///
	/// let gc = GeoCenter(12.3, 45.6, 7);
	/// let vec = gc.as_vec();
	/// assert_eq!(vec, vec![12.3, 45.6, 7.0]);
	/// ```
	pub fn as_vec(&self) -> Vec<f64> {
		vec![self.0, self.1, self.2 as f64]
	}

	/// Converts the `GeoCenter` into a fixed-size array `[f64; 3]` in the form
	/// `[longitude, latitude, zoom]`.
	///
	/// Note that `zoom` is cast to `f64`.
	///
	/// # Examples
	/// ```
	/// use versatiles_core::types::GeoCenter;
	///
	/// let gc = GeoCenter(-75.5, 40.2, 3);
	/// let arr = gc.as_array();
	/// assert_eq!(arr, [-75.5, 40.2, 3.0]);
	/// ```
	pub fn as_array(&self) -> [f64; 3] {
		[self.0, self.1, self.2 as f64]
	}

	/// Checks that the stored longitude, latitude, and zoom are within valid ranges:
	/// - longitude in `[-180, 180]`
	/// - latitude in `[-90, 90]`
	/// - zoom up to `30`
	///
	/// # Errors
	///
	/// Returns an error if any checks fail.
	///
	/// # Examples
	/// ```
	/// use versatiles_core::types::GeoCenter;
	/// use anyhow::Result;
	///
	/// fn validate_center() -> Result<()> {
	///     let center = GeoCenter(100.0, -45.0, 8);
	///     center.check()?;  // should succeed if within valid ranges
	///     Ok(())
	/// }
	/// ```
	pub fn check(&self) -> Result<()> {
		ensure!(-180.0 <= self.0, "center[0] (longitude) must be >= -180");
		ensure!(-90.0 <= self.1, "center[1] (latitude) must be >= -90");
		ensure!(self.0 <= 180.0, "center[0] (longitude) must be <= 180");
		ensure!(self.1 <= 90.0, "center[1] (latitude) must be <= 90");
		ensure!(self.2 <= 30, "center[2] (zoom) must be <= 30");
		Ok(())
	}
}

impl Debug for GeoCenter {
	/// Formats the `GeoCenter` as `"longitude, latitude (zoom)"`.
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}, {} ({})", self.0, self.1, self.2)
	}
}

impl TryFrom<Vec<f64>> for GeoCenter {
	type Error = anyhow::Error;

	/// Attempts to construct a `GeoCenter` from a `Vec<f64>` with exactly three elements:
	/// `[longitude, latitude, zoom]`.
	///
	/// # Errors
	///
	/// Returns an error if the length is not exactly three.
	/// If desired, you could also validate numeric bounds here before casting
	/// `zoom` to `u8`.
	///
	/// # Examples
	/// ```
	/// use versatiles_core::types::GeoCenter;
	/// use anyhow::Result;
	///
	/// fn example() -> Result<()> {
	///     let vec = vec![-75.5, 40.2, 4.0];
	///     let center = GeoCenter::try_from(vec)?;
	///     assert_eq!(center, GeoCenter(-75.5, 40.2, 4));
	///     Ok(())
	/// }
	/// ```
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 3,
			"center must have 3 elements: [longitude, latitude, zoom]"
		);
		Ok(GeoCenter(input[0], input[1], input[2] as u8))
	}
}
