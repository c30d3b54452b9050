use super::*;
use std::fmt::Debug;
use traits::SingleGeometryTrait;

#[derive(Clone, PartialEq)]
pub struct PointGeometry(pub Coordinates0);

impl PointGeometry {
	#[allow(dead_code)]
	fn new(c: [f64; 2]) -> Self {
		Self(c)
	}
}

impl SingleGeometryTrait<MultiPointGeometry> for PointGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn into_multi(self) -> MultiPointGeometry {
		MultiPointGeometry(vec![self.0])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.0).finish()
	}
}

impl<T: Convertible> From<[T; 2]> for PointGeometry {
	fn from(value: [T; 2]) -> Self {
		Self(T::convert_coordinates0(value))
	}
}

impl<T: Convertible> From<&[T; 2]> for PointGeometry {
	fn from(value: &[T; 2]) -> Self {
		Self(T::convert_coordinates0(*value))
	}
}
