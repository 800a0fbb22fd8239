use crate::geo::value::Value;
use crate::geo::{GeoError, Result};

/// Ordered key/value view over one document section.
///
/// The format writes maps as flat arrays alternating key and value; real
/// files also use plain JSON objects for some sections (`info`). Both shapes
/// normalize to the same lookup structure. Duplicate keys follow
/// overwrite-on-reassignment semantics: the last binding wins.
#[derive(Debug, Clone)]
pub struct PairMap<'a> {
	entries: Vec<(&'a str, &'a Value)>,
}

impl<'a> PairMap<'a> {
	/// Build a lookup from a pair-list array or an object node.
	pub fn from_tree(tree: &'a Value) -> Result<Self> {
		match tree {
			Value::Map(members) => Ok(Self {
				entries: members.iter().map(|(key, value)| (key.as_ref(), value)).collect(),
			}),
			Value::Array(items) => Self::from_pair_list(items),
			other => Err(GeoError::TypeMismatch {
				context: "pair list",
				expected: "array or object",
				got: other.kind(),
			}),
		}
	}

	fn from_pair_list(items: &'a [Value]) -> Result<Self> {
		if items.len() % 2 != 0 {
			return Err(GeoError::MalformedPairList { len: items.len() });
		}

		let mut entries = Vec::with_capacity(items.len() / 2);
		for (slot, pair) in items.chunks_exact(2).enumerate() {
			let Value::String(key) = &pair[0] else {
				return Err(GeoError::InvalidKeyType {
					kind: pair[0].kind(),
					at: slot * 2,
				});
			};
			entries.push((key.as_ref(), &pair[1]));
		}
		Ok(Self { entries })
	}

	/// Look up the value bound to `key`; later bindings shadow earlier ones.
	pub fn get(&self, key: &str) -> Option<&'a Value> {
		self.entries.iter().rev().find(|(name, _)| *name == key).map(|(_, value)| *value)
	}

	/// Whether `key` is bound at all.
	pub fn contains(&self, key: &str) -> bool {
		self.entries.iter().any(|(name, _)| *name == key)
	}

	/// Entries in original binding order.
	pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
		self.entries.iter().copied()
	}

	/// Number of bindings, duplicates included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the section holds no bindings.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Split one `(metadata, data)` record, the entry convention shared by point
/// attributes, point groups, and primitive runs.
pub fn metadata_data(entry: &Value) -> Result<(&Value, &Value)> {
	let items = entry.as_array().ok_or(GeoError::TypeMismatch {
		context: "metadata/data entry",
		expected: "array",
		got: entry.kind(),
	})?;
	let [metadata, data, ..] = items else {
		return Err(GeoError::TypeMismatch {
			context: "metadata/data entry",
			expected: "two-element array",
			got: "short array",
		});
	};
	Ok((metadata, data))
}

#[cfg(test)]
mod tests {
	use super::PairMap;
	use crate::geo::value::Value;
	use crate::geo::GeoError;

	#[test]
	fn pair_list_round_trips_in_original_order() {
		let tree = Value::parse(r#"["a",1,"b",[2,3],"c","three"]"#).expect("text parses");
		let map = PairMap::from_tree(&tree).expect("normalizes");

		let mut expanded = Vec::new();
		for (key, value) in map.iter() {
			expanded.push(Value::String(key.into()));
			expanded.push(value.clone());
		}
		assert_eq!(Value::Array(expanded), tree);
	}

	#[test]
	fn odd_length_is_rejected() {
		let tree = Value::parse(r#"["a",1,"b"]"#).expect("text parses");
		let err = PairMap::from_tree(&tree).expect_err("odd pair list fails");
		assert!(matches!(err, GeoError::MalformedPairList { len: 3 }));
	}

	#[test]
	fn non_string_key_is_rejected() {
		let tree = Value::parse(r#"["a",1,2,3]"#).expect("text parses");
		let err = PairMap::from_tree(&tree).expect_err("numeric key fails");
		assert!(matches!(err, GeoError::InvalidKeyType { kind: "number", at: 2 }));
	}

	#[test]
	fn duplicate_keys_last_binding_wins() {
		let tree = Value::parse(r#"["a",1,"a",2]"#).expect("text parses");
		let map = PairMap::from_tree(&tree).expect("normalizes");
		assert_eq!(map.get("a").and_then(Value::as_u32), Some(2));
		assert_eq!(map.len(), 2);
	}

	#[test]
	fn object_nodes_are_already_normalized() {
		let tree = Value::parse(r#"{"software":"Houdini","frame":12}"#).expect("text parses");
		let map = PairMap::from_tree(&tree).expect("normalizes");
		assert_eq!(map.get("software").and_then(Value::as_str), Some("Houdini"));
		assert_eq!(map.get("frame").and_then(Value::as_u32), Some(12));
		assert!(!map.contains("fps"));
	}

	#[test]
	fn scalars_do_not_normalize() {
		let tree = Value::parse("12").expect("text parses");
		assert!(PairMap::from_tree(&tree).is_err());
	}
}
