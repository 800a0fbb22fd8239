use serde_json::Number;

use crate::geo::pairs::{PairMap, metadata_data};
use crate::geo::value::Value;
use crate::geo::{GeoError, Result};

/// Name of the point attribute carrying positions.
pub const POSITION_ATTRIBUTE: &str = "P";

/// Child slot of an attribute `values` node that holds the per-point tuple
/// rows. The slots before it hold the `size` and `storage` pairs, so this
/// offset is a structural convention of the format, not something to infer.
const TUPLES_SLOT: usize = 5;

/// Numeric width for decoded position components.
///
/// The tree stores every number as f64; implementations narrow on read and
/// widen again on write-back.
pub trait PositionScalar: Copy {
	/// Narrow from the tree's native representation.
	fn from_f64(value: f64) -> Self;
	/// Widen back for tree write-back.
	fn into_f64(self) -> f64;
}

impl PositionScalar for f32 {
	fn from_f64(value: f64) -> Self {
		value as f32
	}

	fn into_f64(self) -> f64 {
		f64::from(self)
	}
}

impl PositionScalar for f64 {
	fn from_f64(value: f64) -> Self {
		value
	}

	fn into_f64(self) -> f64 {
		self
	}
}

/// Storage encodings a point attribute payload can use. Only the per-point
/// tuple layout is decoded; the others are recognized to be rejected by
/// name instead of indexed blindly.
enum PointStorage<'a> {
	/// Per-point rows at the fixed tuple slot of the `values` node.
	Tuples(&'a [Value]),
}

fn classify_storage(values: &Value) -> Result<PointStorage<'_>> {
	let items = values.as_array().ok_or(GeoError::TypeMismatch {
		context: "attribute values",
		expected: "array",
		got: values.kind(),
	})?;
	let map = PairMap::from_tree(values)?;

	if map.contains("tuples") {
		let keyed = matches!(items.get(TUPLES_SLOT - 1), Some(Value::String(key)) if key.as_ref() == "tuples");
		let rows = if keyed {
			items.get(TUPLES_SLOT).and_then(Value::as_array)
		} else {
			None
		};
		let rows = rows.ok_or_else(|| GeoError::UnsupportedAttributeEncoding {
			encoding: "tuples with unexpected layout".to_owned(),
		})?;
		return Ok(PointStorage::Tuples(rows));
	}

	for known in ["arrays", "rawpagedata", "packing"] {
		if map.contains(known) {
			return Err(GeoError::UnsupportedAttributeEncoding {
				encoding: known.to_owned(),
			});
		}
	}
	Err(GeoError::UnsupportedAttributeEncoding {
		encoding: "unknown".to_owned(),
	})
}

/// Locate the `"P"` point attribute and flatten its coordinates to
/// `(x, y, z)` per point, in point order.
///
/// Entries are scanned in file order and only the first match is
/// interpreted; the presence check runs once, after the full scan.
pub fn resolve_positions<P: PositionScalar>(attributes: Option<&Value>, point_count: u32) -> Result<Vec<P>> {
	for entry in point_attribute_entries(attributes)? {
		let (metadata, data) = metadata_data(entry)?;
		if attribute_name(metadata)? != Some(POSITION_ATTRIBUTE) {
			continue;
		}
		return decode_position_tuples(data, point_count);
	}
	Err(GeoError::MissingPositionAttribute)
}

fn point_attribute_entries(attributes: Option<&Value>) -> Result<&[Value]> {
	let Some(attributes) = attributes else {
		return Err(GeoError::MissingPointAttributes);
	};
	PairMap::from_tree(attributes)?
		.get("pointattributes")
		.and_then(Value::as_array)
		.ok_or(GeoError::MissingPointAttributes)
}

fn attribute_name(metadata: &Value) -> Result<Option<&str>> {
	Ok(PairMap::from_tree(metadata)?.get("name").and_then(Value::as_str))
}

fn decode_position_tuples<P: PositionScalar>(data: &Value, point_count: u32) -> Result<Vec<P>> {
	let values = PairMap::from_tree(data)?.get("values").ok_or(GeoError::MissingKey {
		section: "P attribute data",
		key: "values",
	})?;
	let PointStorage::Tuples(rows) = classify_storage(values)?;

	if rows.len() != point_count as usize {
		return Err(GeoError::InvalidPositionShape {
			what: "point tuples",
			expected: point_count as usize,
			got: rows.len(),
		});
	}

	let mut out = Vec::with_capacity(rows.len() * 3);
	for row in rows {
		let components = row.as_array().unwrap_or(&[]);
		if components.len() != 3 {
			return Err(GeoError::InvalidPositionShape {
				what: "components per point",
				expected: 3,
				got: components.len(),
			});
		}
		for component in components {
			let wide = component.as_f64().ok_or(GeoError::TypeMismatch {
				context: "P tuple component",
				expected: "number",
				got: component.kind(),
			})?;
			out.push(P::from_f64(wide));
		}
	}
	Ok(out)
}

/// Write a flat `(x, y, z)` position array back into the document tree's
/// `"P"` attribute node, so a later pass-through write emits it.
pub fn write_positions<P: PositionScalar>(root: &mut Value, point_count: u32, positions: &[P]) -> Result<()> {
	let expected = point_count as usize * 3;
	if positions.len() != expected {
		return Err(GeoError::InvalidPositionShape {
			what: "components",
			expected,
			got: positions.len(),
		});
	}

	let mut rows = Vec::with_capacity(point_count as usize);
	for (index, triple) in positions.chunks_exact(3).enumerate() {
		let mut row = Vec::with_capacity(3);
		for component in triple {
			let number = Number::from_f64(component.into_f64()).ok_or(GeoError::NonFinitePosition { index })?;
			row.push(Value::Number(number));
		}
		rows.push(Value::Array(row));
	}

	let slot = position_tuples_mut(root)?;
	*slot = Value::Array(rows);
	Ok(())
}

/// Navigate mutably to the `"P"` tuples node inside the raw tree.
fn position_tuples_mut(root: &mut Value) -> Result<&mut Value> {
	let attributes = pair_value_mut(root, "attributes").ok_or(GeoError::MissingPointAttributes)?;
	let entries = pair_value_mut(attributes, "pointattributes").ok_or(GeoError::MissingPointAttributes)?;
	let Value::Array(entries) = entries else {
		return Err(GeoError::MissingPointAttributes);
	};

	let position = entries
		.iter()
		.position(|entry| is_position_entry(entry))
		.ok_or(GeoError::MissingPositionAttribute)?;
	let Value::Array(items) = &mut entries[position] else {
		return Err(GeoError::MissingPositionAttribute);
	};
	let data = items.get_mut(1).ok_or(GeoError::MissingPositionAttribute)?;

	let values = pair_value_mut(data, "values").ok_or(GeoError::MissingKey {
		section: "P attribute data",
		key: "values",
	})?;
	let Value::Array(children) = values else {
		return Err(GeoError::UnsupportedAttributeEncoding {
			encoding: values.kind().to_owned(),
		});
	};
	children.get_mut(TUPLES_SLOT).ok_or_else(|| GeoError::UnsupportedAttributeEncoding {
		encoding: "tuples with unexpected layout".to_owned(),
	})
}

fn is_position_entry(entry: &Value) -> bool {
	let Some(items) = entry.as_array() else {
		return false;
	};
	let Some(metadata) = items.first() else {
		return false;
	};
	matches!(attribute_name(metadata), Ok(Some(POSITION_ATTRIBUTE)))
}

/// Mutable pair-list lookup; later bindings shadow earlier ones, matching
/// the read-side view.
fn pair_value_mut<'a>(tree: &'a mut Value, key: &str) -> Option<&'a mut Value> {
	let Value::Array(items) = tree else {
		return None;
	};

	let mut slot = None;
	for index in (0..items.len().saturating_sub(1)).step_by(2) {
		if matches!(&items[index], Value::String(name) if name.as_ref() == key) {
			slot = Some(index + 1);
		}
	}
	slot.map(move |index| &mut items[index])
}

#[cfg(test)]
mod tests {
	use super::{resolve_positions, write_positions};
	use crate::geo::value::Value;
	use crate::geo::GeoError;

	fn attributes_tree(entries: &str) -> Value {
		Value::parse(&format!(r#"["pointattributes",{entries}]"#)).expect("text parses")
	}

	fn p_entry(tuples: &str) -> String {
		format!(
			r#"[["scope","public","type","numeric","name","P"],["size",3,"storage","fpreal32","values",["size",3,"storage","fpreal32","tuples",{tuples}]]]"#
		)
	}

	#[test]
	fn positions_flatten_in_point_order() {
		let tree = attributes_tree(&format!("[{}]", p_entry("[[0,0,0],[1,0,0],[0,1,0]]")));
		let positions: Vec<f64> = resolve_positions(Some(&tree), 3).expect("positions resolve");
		assert_eq!(positions, [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
	}

	#[test]
	fn narrow_scalar_width_is_supported() {
		let tree = attributes_tree(&format!("[{}]", p_entry("[[0.5,1.25,-2]]")));
		let positions: Vec<f32> = resolve_positions(Some(&tree), 1).expect("positions resolve");
		assert_eq!(positions, [0.5_f32, 1.25, -2.0]);
	}

	#[test]
	fn position_entry_need_not_come_first() {
		let other = r#"[["scope","public","type","numeric","name","Cd"],["size",3,"storage","fpreal32","values",["size",3,"storage","fpreal32","tuples",[[1,1,1]]]]]"#;
		let tree = attributes_tree(&format!("[{},{}]", other, p_entry("[[2,3,4]]")));
		let positions: Vec<f64> = resolve_positions(Some(&tree), 1).expect("positions resolve");
		assert_eq!(positions, [2.0, 3.0, 4.0]);
	}

	#[test]
	fn short_tuple_list_is_a_shape_error() {
		let tree = attributes_tree(&format!("[{}]", p_entry("[[0,0,0],[1,0,0]]")));
		let err = resolve_positions::<f64>(Some(&tree), 3).expect_err("short list fails");
		assert!(matches!(
			err,
			GeoError::InvalidPositionShape {
				what: "point tuples",
				expected: 3,
				got: 2,
			}
		));
	}

	#[test]
	fn wide_tuple_is_a_shape_error() {
		let tree = attributes_tree(&format!("[{}]", p_entry("[[0,0,0,0]]")));
		let err = resolve_positions::<f64>(Some(&tree), 1).expect_err("4-wide tuple fails");
		assert!(matches!(err, GeoError::InvalidPositionShape { expected: 3, got: 4, .. }));
	}

	#[test]
	fn missing_position_attribute_is_reported_after_full_scan() {
		let other = r#"[["scope","public","type","numeric","name","Cd"],["size",3,"storage","fpreal32","values",["size",3,"storage","fpreal32","tuples",[[1,1,1]]]]]"#;
		let tree = attributes_tree(&format!("[{other}]"));
		let err = resolve_positions::<f64>(Some(&tree), 1).expect_err("no P fails");
		assert!(matches!(err, GeoError::MissingPositionAttribute));
	}

	#[test]
	fn absent_section_is_missing_point_attributes() {
		let err = resolve_positions::<f64>(None, 1).expect_err("absent section fails");
		assert!(matches!(err, GeoError::MissingPointAttributes));
	}

	#[test]
	fn paged_storage_is_rejected_by_name() {
		let entry = r#"[["scope","public","type","numeric","name","P"],["size",3,"storage","fpreal32","values",["size",3,"storage","fpreal32","rawpagedata",[0,0,0]]]]"#;
		let tree = attributes_tree(&format!("[{entry}]"));
		let err = resolve_positions::<f64>(Some(&tree), 1).expect_err("paged storage fails");
		assert!(matches!(err, GeoError::UnsupportedAttributeEncoding { encoding } if encoding == "rawpagedata"));
	}

	#[test]
	fn write_back_replaces_the_tuples_node() {
		let mut root = Value::Array(vec![
			Value::String("attributes".into()),
			attributes_tree(&format!("[{}]", p_entry("[[0,0,0],[1,0,0]]"))),
		]);
		write_positions(&mut root, 2, &[9.0_f64, 8.0, 7.0, 6.0, 5.0, 4.0]).expect("write-back succeeds");

		let Value::Array(items) = &root else { panic!("root is array") };
		let positions: Vec<f64> = resolve_positions(Some(&items[1]), 2).expect("positions resolve");
		assert_eq!(positions, [9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
	}

	#[test]
	fn write_back_rejects_wrong_component_count() {
		let mut root = Value::Array(vec![
			Value::String("attributes".into()),
			attributes_tree(&format!("[{}]", p_entry("[[0,0,0]]"))),
		]);
		let err = write_positions(&mut root, 1, &[1.0_f64, 2.0]).expect_err("short write fails");
		assert!(matches!(err, GeoError::InvalidPositionShape { expected: 3, got: 2, .. }));
	}
}
