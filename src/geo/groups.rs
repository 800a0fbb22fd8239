use crate::geo::pairs::{PairMap, metadata_data};
use crate::geo::rle::{decode_bool_runs, parse_bool_runs};
use crate::geo::value::Value;
use crate::geo::{GeoError, Result};

/// Name of the point group marking surface points.
pub const SURFACE_GROUP: &str = "surface_points";

/// Decode the per-point surface membership mask.
///
/// An absent section or a missing `surface_points` group yields an empty
/// mask, not an error; a present group whose mask does not cover every
/// point fails with `GroupSizeMismatch`.
pub fn resolve_surface_membership(point_groups: Option<&Value>, point_count: u32) -> Result<Vec<bool>> {
	let Some(point_groups) = point_groups else {
		return Ok(Vec::new());
	};
	let entries = point_groups.as_array().ok_or(GeoError::TypeMismatch {
		context: "pointgroups",
		expected: "array",
		got: point_groups.kind(),
	})?;

	for entry in entries {
		let (metadata, data) = metadata_data(entry)?;
		let name = PairMap::from_tree(metadata)?.get("name").and_then(Value::as_str);
		if name != Some(SURFACE_GROUP) {
			continue;
		}
		return decode_membership(data, point_count);
	}
	Ok(Vec::new())
}

fn decode_membership(data: &Value, point_count: u32) -> Result<Vec<bool>> {
	let selection = PairMap::from_tree(data)?.get("selection").ok_or(GeoError::MissingKey {
		section: "point group",
		key: "selection",
	})?;
	let unordered = PairMap::from_tree(selection)?.get("unordered").ok_or(GeoError::MissingKey {
		section: "point group selection",
		key: "unordered",
	})?;
	let runs_tree = PairMap::from_tree(unordered)?.get("boolRLE").ok_or(GeoError::MissingKey {
		section: "point group selection",
		key: "boolRLE",
	})?;

	let runs = parse_bool_runs(runs_tree)?;
	decode_bool_runs(&runs, point_count).map_err(|err| match err {
		GeoError::RunLengthMismatch { expected, got } => GeoError::GroupSizeMismatch { expected, got },
		other => other,
	})
}
