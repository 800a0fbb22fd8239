use crate::geo::value::Value;
use crate::geo::{GeoError, Result};

/// Expand `(count, flag)` runs into a dense boolean mask.
///
/// Each run carries its own flag; flags are never assumed to alternate. The
/// total run length is checked against `expected_len` before any expansion
/// happens.
pub fn decode_bool_runs(runs: &[(u32, bool)], expected_len: u32) -> Result<Vec<bool>> {
	let total: u64 = runs.iter().map(|run| u64::from(run.0)).sum();
	if total != u64::from(expected_len) {
		return Err(GeoError::RunLengthMismatch {
			expected: expected_len,
			got: total,
		});
	}

	let mut out = Vec::with_capacity(expected_len as usize);
	for &(count, flag) in runs {
		out.extend(std::iter::repeat(flag).take(count as usize));
	}
	Ok(out)
}

/// Parse the wire form of a boolean run list: a flat array alternating run
/// count and flag (`[4,false,2,true]`).
pub fn parse_bool_runs(tree: &Value) -> Result<Vec<(u32, bool)>> {
	let items = tree.as_array().ok_or(GeoError::TypeMismatch {
		context: "boolRLE",
		expected: "array",
		got: tree.kind(),
	})?;
	if items.len() % 2 != 0 {
		return Err(GeoError::MalformedRunList { len: items.len() });
	}

	items
		.chunks_exact(2)
		.map(|pair| {
			let count = pair[0].expect_u32("boolRLE run count")?;
			let flag = pair[1].expect_bool("boolRLE run flag")?;
			Ok((count, flag))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::{decode_bool_runs, parse_bool_runs};
	use crate::geo::value::Value;
	use crate::geo::GeoError;

	#[test]
	fn runs_expand_in_order() {
		let mask = decode_bool_runs(&[(3, true), (2, false)], 5).expect("runs decode");
		assert_eq!(mask, [true, true, true, false, false]);
	}

	#[test]
	fn short_expansion_is_a_length_mismatch() {
		let err = decode_bool_runs(&[(3, true)], 5).expect_err("short runs fail");
		assert!(matches!(err, GeoError::RunLengthMismatch { expected: 5, got: 3 }));
	}

	#[test]
	fn flags_need_not_alternate() {
		let mask = decode_bool_runs(&[(1, true), (2, true), (1, false)], 4).expect("runs decode");
		assert_eq!(mask, [true, true, true, false]);
	}

	#[test]
	fn wire_form_parses_counts_and_flags() {
		let tree = Value::parse("[4,false,2,true]").expect("text parses");
		assert_eq!(parse_bool_runs(&tree).expect("runs parse"), [(4, false), (2, true)]);
	}

	#[test]
	fn odd_wire_form_is_rejected() {
		let tree = Value::parse("[4,false,2]").expect("text parses");
		let err = parse_bool_runs(&tree).expect_err("odd run list fails");
		assert!(matches!(err, GeoError::MalformedRunList { len: 3 }));
	}

	#[test]
	fn non_bool_flag_is_rejected() {
		let tree = Value::parse("[4,1]").expect("text parses");
		assert!(parse_bool_runs(&tree).is_err());
	}
}
