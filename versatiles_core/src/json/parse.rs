//! JSON text parser, built on the same byte-iterator primitives the GeoJSON
//! parser in `versatiles_geometry` uses.

use super::{JsonArray, JsonObject, JsonValue};
use crate::byte_iterator::{ByteIterator, parse_array_entries, parse_number_as, parse_object_entries, parse_quoted_json_string, parse_tag};
use anyhow::Result;
use std::{collections::BTreeMap, io::Cursor};
use versatiles_derive::context;

/// Parses `json` into a [`JsonValue`].
#[context("while parsing JSON '{}'", json)]
pub fn parse_json_str(json: &str) -> Result<JsonValue> {
	let mut iter = ByteIterator::from_reader(Cursor::new(json), true);
	parse_json_iter(&mut iter)
}

/// Parses a single JSON value starting at the iterator's current position,
/// leaving it positioned just past the value. Used both as the entry point
/// for [`parse_json_str`] and, by callers in other crates, to skip over an
/// unrecognized member's value without needing its type ahead of time.
pub fn parse_json_iter(iter: &mut ByteIterator) -> Result<JsonValue> {
	iter.skip_whitespace();
	match iter.expect_peeked_byte()? {
		b'[' => parse_json_array(iter),
		b'{' => parse_json_object(iter),
		b'"' => parse_json_string(iter),
		d if d.is_ascii_digit() || d == b'-' => parse_json_number(iter),
		b't' => parse_tag(iter, "true").map(|()| JsonValue::Boolean(true)),
		b'f' => parse_tag(iter, "false").map(|()| JsonValue::Boolean(false)),
		b'n' => parse_tag(iter, "null").map(|()| JsonValue::Null),
		c => Err(iter.format_error(&format!("unexpected character '{}'", c as char))),
	}
}

fn parse_json_array(iter: &mut ByteIterator) -> Result<JsonValue> {
	let items = parse_array_entries(iter, parse_json_iter)?;
	Ok(JsonValue::Array(JsonArray(items)))
}

fn parse_json_object(iter: &mut ByteIterator) -> Result<JsonValue> {
	let mut map = BTreeMap::new();
	parse_object_entries(iter, |key, iter2| {
		map.insert(key, parse_json_iter(iter2)?);
		Ok(())
	})?;
	Ok(JsonValue::Object(JsonObject(map)))
}

fn parse_json_string(iter: &mut ByteIterator) -> Result<JsonValue> {
	parse_quoted_json_string(iter).map(JsonValue::String)
}

fn parse_json_number(iter: &mut ByteIterator) -> Result<JsonValue> {
	parse_number_as::<f64>(iter).map(JsonValue::Number)
}
