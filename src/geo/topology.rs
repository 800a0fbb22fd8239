use crate::geo::pairs::PairMap;
use crate::geo::value::Value;
use crate::geo::{GeoError, Result};

/// Point-reference connectivity decoded from the `topology` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
	/// Flat vertex-to-point indices in file order.
	pub flat_indices: Vec<u32>,
	/// Vertices per primitive; 0 when the topology is empty or unshaped.
	pub verts_per_primitive: u32,
}

impl Topology {
	/// Whether the file carried no connectivity.
	pub fn is_empty(&self) -> bool {
		self.flat_indices.is_empty()
	}

	/// Per-primitive vertex tuples in primitive order.
	///
	/// Empty when the index list has no uniform arity (mixed files, or an
	/// empty topology).
	pub fn primitive_verts(&self) -> Vec<&[u32]> {
		match self.verts_per_primitive {
			arity @ (3 | 4) => self.flat_indices.chunks_exact(arity as usize).collect(),
			_ => Vec::new(),
		}
	}
}

/// Read the flat `pointref.indices` list, if the section carries one.
pub fn point_ref_indices(topology: Option<&Value>) -> Result<Option<Vec<u32>>> {
	let Some(topology) = topology else {
		return Ok(None);
	};
	let map = PairMap::from_tree(topology)?;
	let Some(point_ref) = map.get("pointref") else {
		return Ok(None);
	};
	let Some(indices) = PairMap::from_tree(point_ref)?.get("indices") else {
		return Ok(None);
	};

	let items = indices.as_array().ok_or(GeoError::TypeMismatch {
		context: "pointref.indices",
		expected: "array",
		got: indices.kind(),
	})?;
	let mut out = Vec::with_capacity(items.len());
	for item in items {
		out.push(item.expect_u32("pointref.indices")?);
	}
	Ok(Some(out))
}

/// Shape the flat index list into per-primitive vertex tuples.
///
/// Absent `pointref.indices` or a zero primitive count is a deliberate
/// no-op yielding an empty topology, not a failure.
pub fn resolve_topology(topology: Option<&Value>, primitive_count: u32) -> Result<Topology> {
	let Some(flat_indices) = point_ref_indices(topology)? else {
		return Ok(Topology::default());
	};
	if primitive_count == 0 {
		return Ok(Topology::default());
	}

	if flat_indices.len() % primitive_count as usize != 0 {
		return Err(GeoError::IndicesSizeMismatch {
			indices: flat_indices.len(),
			primitives: primitive_count,
		});
	}

	let arity = (flat_indices.len() / primitive_count as usize) as u32;
	if arity != 3 && arity != 4 {
		return Err(GeoError::UnsupportedPrimitiveArity { arity });
	}

	Ok(Topology {
		flat_indices,
		verts_per_primitive: arity,
	})
}

#[cfg(test)]
mod tests {
	use super::{point_ref_indices, resolve_topology};
	use crate::geo::value::Value;
	use crate::geo::GeoError;

	fn topology_tree(indices: &str) -> Value {
		Value::parse(&format!(r#"["pointref",["indices",{indices}]]"#)).expect("text parses")
	}

	#[test]
	fn indices_reshape_row_major() {
		let tree = topology_tree("[0,1,2,3,4,5,6,7]");
		let topology = resolve_topology(Some(&tree), 2).expect("topology resolves");

		assert_eq!(topology.verts_per_primitive, 4);
		assert_eq!(topology.primitive_verts(), vec![&[0, 1, 2, 3][..], &[4, 5, 6, 7][..]]);
	}

	#[test]
	fn triangle_arity_is_accepted() {
		let tree = topology_tree("[0,1,2,2,1,3]");
		let topology = resolve_topology(Some(&tree), 2).expect("topology resolves");
		assert_eq!(topology.verts_per_primitive, 3);
	}

	#[test]
	fn unsupported_arity_is_rejected() {
		let tree = topology_tree("[0,1,2,3,4,5,6,7,8,9]");
		let err = resolve_topology(Some(&tree), 2).expect_err("arity 5 fails");
		assert!(matches!(err, GeoError::UnsupportedPrimitiveArity { arity: 5 }));
	}

	#[test]
	fn indivisible_index_list_is_rejected() {
		let tree = topology_tree("[0,1,2,3,4,5,6]");
		let err = resolve_topology(Some(&tree), 2).expect_err("7 % 2 fails");
		assert!(matches!(err, GeoError::IndicesSizeMismatch { indices: 7, primitives: 2 }));
	}

	#[test]
	fn absent_indices_yield_empty_topology() {
		let tree = Value::parse(r#"["pointref",["somethingelse",[]]]"#).expect("text parses");
		let topology = resolve_topology(Some(&tree), 4).expect("topology resolves");
		assert!(topology.is_empty());
		assert!(resolve_topology(None, 4).expect("topology resolves").is_empty());
	}

	#[test]
	fn zero_primitives_yield_empty_topology() {
		let tree = topology_tree("[0,1,2,3]");
		let topology = resolve_topology(Some(&tree), 0).expect("topology resolves");
		assert!(topology.is_empty());
		assert_eq!(topology.primitive_verts(), Vec::<&[u32]>::new());
	}

	#[test]
	fn flat_indices_read_without_reshaping() {
		let tree = topology_tree("[5,6,7]");
		let flat = point_ref_indices(Some(&tree)).expect("indices read");
		assert_eq!(flat, Some(vec![5, 6, 7]));
	}

	#[test]
	fn negative_index_is_rejected() {
		let tree = topology_tree("[0,-1,2]");
		assert!(point_ref_indices(Some(&tree)).is_err());
	}
}
