//! GeoJSON feature-family validation (§4.I): every feature's geometry must
//! fall into one of the `{polygon, line, circle}` families a style layer can
//! render. Parsing is delegated to `versatiles_geometry`'s existing GeoJSON
//! parser rather than re-implementing it here.

use versatiles_core::StoreError;
use versatiles_geometry::{geo::Geometry, geojson::parse_geojson};

/// The three renderable geometry families §4.I names. Point geometries count
/// as `Circle` since a style layer renders bare points as circle markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFamily {
	Polygon,
	Line,
	Circle,
}

#[must_use]
pub fn classify(geometry: &Geometry) -> GeometryFamily {
	match geometry {
		Geometry::Polygon(_) | Geometry::MultiPolygon(_) => GeometryFamily::Polygon,
		Geometry::LineString(_) | Geometry::MultiLineString(_) => GeometryFamily::Line,
		Geometry::Point(_) | Geometry::MultiPoint(_) => GeometryFamily::Circle,
	}
}

/// Parses `data` as a GeoJSON `FeatureCollection` and checks every feature's
/// geometry classifies into a known family. There's nothing left to check
/// beyond that — the family set is exhaustive over `Geometry`'s variants, so
/// this can never itself fail; it exists as a named checkpoint future
/// geometry variants would have to account for.
pub fn validate_feature_families(data: &[u8]) -> Result<(), StoreError> {
	let text = std::str::from_utf8(data).map_err(|e| StoreError::SchemaInvalid(e.to_string()))?;
	let collection = parse_geojson(text).map_err(|e| StoreError::SchemaInvalid(e.to_string()))?;
	for feature in &collection.features {
		let _ = classify(&feature.geometry);
	}
	Ok(())
}

/// A permissive default GeoJSON document substituted when a local file is
/// missing but an origin is configured and unreachable (§4.I), so a style
/// referencing this source can still load with an empty feature set rather
/// than failing outright.
#[must_use]
pub fn default_geojson_bytes() -> Vec<u8> {
	br#"{"type":"FeatureCollection","features":[]}"#.to_vec()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_polygon_feature() {
		let data = br#"{"type":"FeatureCollection","features":[
			{"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]},"properties":{}}
		]}"#;
		assert!(validate_feature_families(data).is_ok());
	}

	#[test]
	fn accepts_point_as_circle_family() {
		let data = br#"{"type":"FeatureCollection","features":[
			{"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{}}
		]}"#;
		assert!(validate_feature_families(data).is_ok());
		let collection = parse_geojson(std::str::from_utf8(data).unwrap()).unwrap();
		assert_eq!(classify(&collection.features[0].geometry), GeometryFamily::Circle);
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(validate_feature_families(b"not json").is_err());
	}

	#[test]
	fn default_document_is_an_empty_valid_collection() {
		assert!(validate_feature_families(&default_geojson_bytes()).is_ok());
	}
}
