use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

use crate::geo::{GeoError, Result};

/// One node of the dynamically typed document tree.
///
/// The tree is the parse target of the `.geo` text notation; everything else
/// in this crate only walks it. Member order of objects and the exact
/// integer/float spelling of numbers are preserved so an untouched tree
/// re-serializes canonically.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// JSON `null`.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Numeric scalar, spelling preserved.
	Number(Number),
	/// String scalar.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Ordered key/value object, member order as written.
	Map(Vec<(Box<str>, Value)>),
}

impl Value {
	/// Parse one document from `.geo` text.
	pub fn parse(text: &str) -> Result<Self> {
		let raw: serde_json::Value = serde_json::from_str(text)?;
		Ok(Self::from_json(raw))
	}

	fn from_json(raw: serde_json::Value) -> Self {
		match raw {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(value) => Self::Bool(value),
			serde_json::Value::Number(value) => Self::Number(value),
			serde_json::Value::String(value) => Self::String(value.into_boxed_str()),
			serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from_json).collect()),
			serde_json::Value::Object(members) => Self::Map(
				members
					.into_iter()
					.map(|(key, value)| (key.into_boxed_str(), Self::from_json(value)))
					.collect(),
			),
		}
	}

	/// Short label for the node kind, used in error reports.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Map(_) => "object",
		}
	}

	/// Borrow as a boolean scalar.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow as a string scalar.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow as a sequence.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Numeric value widened to f64.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(value) => value.as_f64(),
			_ => None,
		}
	}

	/// Non-negative integer value, if losslessly representable.
	pub fn as_u32(&self) -> Option<u32> {
		match self {
			Self::Number(value) => value.as_u64().and_then(|wide| u32::try_from(wide).ok()),
			_ => None,
		}
	}

	/// Coerce to a boolean or fail naming `context`.
	pub fn expect_bool(&self, context: &'static str) -> Result<bool> {
		self.as_bool().ok_or(GeoError::TypeMismatch {
			context,
			expected: "bool",
			got: self.kind(),
		})
	}

	/// Coerce to a string or fail naming `context`.
	pub fn expect_str(&self, context: &'static str) -> Result<&str> {
		self.as_str().ok_or(GeoError::TypeMismatch {
			context,
			expected: "string",
			got: self.kind(),
		})
	}

	/// Coerce to an unsigned count or fail naming `context`.
	pub fn expect_u32(&self, context: &'static str) -> Result<u32> {
		self.as_u32().ok_or(GeoError::TypeMismatch {
			context,
			expected: "unsigned integer",
			got: self.kind(),
		})
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Number(value) => value.serialize(serializer),
			Self::String(value) => serializer.serialize_str(value),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(members) => {
				let mut map = serializer.serialize_map(Some(members.len()))?;
				for (key, value) in members {
					map.serialize_entry(key.as_ref(), value)?;
				}
				map.end()
			}
		}
	}
}
