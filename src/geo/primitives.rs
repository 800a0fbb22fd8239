use thiserror::Error;

use crate::geo::pairs::{PairMap, metadata_data};
use crate::geo::value::Value;
use crate::geo::{GeoError, Result};

/// Primitive kind tag of one run entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
	/// Tetrahedra, four vertices per primitive.
	Tetrahedron,
	/// Surface polygons, three vertices per primitive.
	Polygon,
	/// Any other primitive kind; consumes no indices.
	Other,
}

/// One contiguous block of same-kind primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveRun {
	/// Kind tag parsed from the run's `type` field.
	pub kind: RunKind,
	/// Primitive count from the run's `nprimitives` field, 0 when absent.
	pub count: u32,
}

/// Non-fatal inconsistencies observed while splitting mixed primitives.
///
/// Run metadata is only partially populated in some real files; the split
/// stays best-effort and reports what did not line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitWarning {
	/// The runs asked for a different number of indices than the file holds.
	#[error("primitive runs consumed {consumed} of {total} indices")]
	LeftoverIndices {
		/// Indices the runs asked to consume.
		consumed: usize,
		/// Flat index list length.
		total: usize,
	},
	/// Surface indices disagree with the reported polygon count.
	#[error("surface indices {got}, expected {expected}")]
	SurfaceCountMismatch {
		/// Three times the reported polygon count.
		expected: usize,
		/// Surface indices actually collected.
		got: usize,
	},
	/// Tetrahedron indices disagree with the reported tetrahedron count.
	#[error("tetrahedron indices {got}, expected {expected}")]
	TetCountMismatch {
		/// Four times the reported tetrahedron count.
		expected: usize,
		/// Tetrahedron indices actually collected.
		got: usize,
	},
}

/// Outcome of partitioning a mixed tetrahedron/surface index list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitIndices {
	/// Flat tetrahedron indices, four per primitive.
	pub tet_indices: Vec<u32>,
	/// Flat surface indices, three per primitive.
	pub surface_indices: Vec<u32>,
	/// Count mismatches observed during the walk.
	pub warnings: Vec<SplitWarning>,
}

/// Parse the ordered run list from the `primitives` section.
///
/// Entries without a recognizable kind or count stay in the walk as
/// zero-length runs rather than aborting it.
pub fn parse_primitive_runs(primitives: Option<&Value>) -> Result<Vec<PrimitiveRun>> {
	let Some(primitives) = primitives else {
		return Ok(Vec::new());
	};
	let entries = primitives.as_array().ok_or(GeoError::TypeMismatch {
		context: "primitives",
		expected: "array",
		got: primitives.kind(),
	})?;
	Ok(entries.iter().map(parse_run).collect())
}

fn parse_run(entry: &Value) -> PrimitiveRun {
	let Ok((metadata, body)) = metadata_data(entry) else {
		return PrimitiveRun {
			kind: RunKind::Other,
			count: 0,
		};
	};
	PrimitiveRun {
		kind: run_kind(metadata),
		count: run_count(body),
	}
}

fn run_kind(metadata: &Value) -> RunKind {
	let Ok(map) = PairMap::from_tree(metadata) else {
		return RunKind::Other;
	};
	let Some(tag) = map.get("type").and_then(Value::as_str) else {
		return RunKind::Other;
	};

	if tag.starts_with("Tetrahedron") {
		RunKind::Tetrahedron
	} else if tag.starts_with("Poly") {
		RunKind::Polygon
	} else {
		RunKind::Other
	}
}

fn run_count(body: &Value) -> u32 {
	let Ok(map) = PairMap::from_tree(body) else {
		return 0;
	};
	map.get("nprimitives").and_then(Value::as_u32).unwrap_or(0)
}

/// Partition a flat mixed index list into tetrahedron and surface index
/// lists by walking the runs in order.
///
/// Count disagreements are returned as warnings with the best-effort
/// result, never as a failure.
pub fn split_primitives(flat_indices: &[u32], runs: &[PrimitiveRun], surface_count: u32, tet_count: u32) -> SplitIndices {
	let mut split = SplitIndices::default();
	let mut cursor = 0_usize;
	let mut wanted = 0_usize;

	for run in runs {
		let verts = match run.kind {
			RunKind::Tetrahedron => 4,
			RunKind::Polygon => 3,
			RunKind::Other => continue,
		};
		let take = verts * run.count as usize;
		wanted += take;

		let end = (cursor + take).min(flat_indices.len());
		let slice = &flat_indices[cursor..end];
		match run.kind {
			RunKind::Tetrahedron => split.tet_indices.extend_from_slice(slice),
			RunKind::Polygon => split.surface_indices.extend_from_slice(slice),
			RunKind::Other => {}
		}
		cursor = end;
	}

	if wanted != flat_indices.len() {
		split.warnings.push(SplitWarning::LeftoverIndices {
			consumed: wanted,
			total: flat_indices.len(),
		});
	}
	let expected_surface = surface_count as usize * 3;
	if split.surface_indices.len() != expected_surface {
		split.warnings.push(SplitWarning::SurfaceCountMismatch {
			expected: expected_surface,
			got: split.surface_indices.len(),
		});
	}
	let expected_tet = tet_count as usize * 4;
	if split.tet_indices.len() != expected_tet {
		split.warnings.push(SplitWarning::TetCountMismatch {
			expected: expected_tet,
			got: split.tet_indices.len(),
		});
	}
	split
}
