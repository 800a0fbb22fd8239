use std::fs;
use std::path::{Path, PathBuf};

use crate::geo::attributes::{PositionScalar, resolve_positions, write_positions};
use crate::geo::compression::decode_bytes;
use crate::geo::groups::resolve_surface_membership;
use crate::geo::header::extract_header;
use crate::geo::primitives::{parse_primitive_runs, split_primitives};
use crate::geo::topology::{point_ref_indices, resolve_topology};
use crate::geo::value::Value;
use crate::geo::{Compression, GeoError, GeoHeader, PairMap, Result, SplitIndices, SplitWarning, Topology};

/// Primitive composition of a decoded file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimitiveMode {
	/// Every primitive shares one arity (plain tetrahedral or triangle mesh).
	#[default]
	Uniform,
	/// Tetrahedra and surface polygons mixed in one file.
	MixedTetSurface,
}

/// Behavior switches for one decode pass.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
	/// Expected primitive composition.
	pub mode: PrimitiveMode,
}

/// One decoded `.geo` document.
///
/// Every derived field is the read-only product of a single decode pass
/// over the retained raw tree. The raw tree is kept byte-faithful for
/// pass-through writing; the only way back into it is
/// [`GeoFile::set_positions`].
#[derive(Debug)]
pub struct GeoFile<P: PositionScalar = f64> {
	/// Compression detected on the input stream.
	pub compression: Compression,
	raw: Value,
	input_path: Option<PathBuf>,
	mode: PrimitiveMode,
	header: GeoHeader,
	positions: Vec<P>,
	topology: Topology,
	split: SplitIndices,
	surface_points: Vec<bool>,
}

impl<P: PositionScalar> GeoFile<P> {
	/// Read and decode a `.geo` or `.geo.gz` file with default options.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, &DecodeOptions::default())
	}

	/// Read and decode with explicit options.
	pub fn open_with(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Self> {
		let path = path.as_ref();
		Self::open_impl(path, options).map_err(|source| GeoError::InFile {
			path: path.to_owned(),
			source: Box::new(source),
		})
	}

	fn open_impl(path: &Path, options: &DecodeOptions) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, text) = decode_bytes(raw)?;
		let mut file = Self::parse_str(&text, options)?;
		file.compression = compression;
		file.input_path = Some(path.to_owned());
		Ok(file)
	}

	/// Decode a document from text; no input path is attached.
	pub fn parse_str(text: &str, options: &DecodeOptions) -> Result<Self> {
		Self::decode(Value::parse(text)?, options)
	}

	fn decode(raw: Value, options: &DecodeOptions) -> Result<Self> {
		let doc = PairMap::from_tree(&raw)?;
		let (header, sections) = extract_header(&doc)?;

		if options.mode == PrimitiveMode::MixedTetSurface
			&& header.primitive_count != header.surface_count.saturating_add(header.tet_count)
		{
			return Err(GeoError::PrimitiveCountMismatch {
				primitives: header.primitive_count,
				surfaces: header.surface_count,
				tets: header.tet_count,
			});
		}

		let positions = resolve_positions::<P>(sections.attributes, header.point_count)?;

		let (topology, split, surface_points) = match options.mode {
			PrimitiveMode::Uniform => (
				resolve_topology(sections.topology, header.primitive_count)?,
				SplitIndices::default(),
				Vec::new(),
			),
			PrimitiveMode::MixedTetSurface => {
				let flat_indices = point_ref_indices(sections.topology)?.unwrap_or_default();
				let runs = parse_primitive_runs(sections.primitives)?;
				let split = split_primitives(&flat_indices, &runs, header.surface_count, header.tet_count);
				let surface_points = resolve_surface_membership(sections.point_groups, header.point_count)?;
				let topology = Topology {
					flat_indices,
					verts_per_primitive: 0,
				};
				(topology, split, surface_points)
			}
		};

		Ok(Self {
			compression: Compression::None,
			raw,
			input_path: None,
			mode: options.mode,
			header,
			positions,
			topology,
			split,
			surface_points,
		})
	}

	/// Decoded header fields.
	pub fn header(&self) -> &GeoHeader {
		&self.header
	}

	/// Primitive composition the file was decoded under.
	pub fn mode(&self) -> PrimitiveMode {
		self.mode
	}

	/// Flattened per-point positions, `(x, y, z)` per point in point order.
	pub fn positions(&self) -> &[P] {
		&self.positions
	}

	/// Flat vertex-to-point indices in file order.
	pub fn flat_indices(&self) -> &[u32] {
		&self.topology.flat_indices
	}

	/// Resolved connectivity.
	pub fn topology(&self) -> &Topology {
		&self.topology
	}

	/// Per-primitive vertex tuples; empty outside uniform mode.
	pub fn primitive_verts(&self) -> Vec<&[u32]> {
		self.topology.primitive_verts()
	}

	/// Flat tetrahedron indices, four per primitive; empty outside mixed mode.
	pub fn tet_indices(&self) -> &[u32] {
		&self.split.tet_indices
	}

	/// Flat surface indices, three per primitive; empty outside mixed mode.
	pub fn surface_indices(&self) -> &[u32] {
		&self.split.surface_indices
	}

	/// Per-point surface membership, empty when no group was present.
	pub fn surface_points(&self) -> &[bool] {
		&self.surface_points
	}

	/// Non-fatal inconsistencies from the mixed-primitive split.
	pub fn split_warnings(&self) -> &[SplitWarning] {
		&self.split.warnings
	}

	/// Replace the point positions, both in the decoded array and in the raw
	/// tree, so a later [`GeoFile::write`] emits them.
	pub fn set_positions(&mut self, positions: &[P]) -> Result<()> {
		write_positions(&mut self.raw, self.header.point_count, positions)?;
		self.positions = positions.to_vec();
		Ok(())
	}

	/// Canonical text serialization of the retained raw tree.
	pub fn to_geo_string(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.raw)?)
	}

	/// Serialize the raw tree to disk, deriving `<dir>/<stem>.geo` from the
	/// input path when no explicit output path is given. Returns the path
	/// written.
	pub fn write(&self, output: Option<&Path>) -> Result<PathBuf> {
		let path = match output {
			Some(path) => path.to_owned(),
			None => self
				.input_path
				.as_deref()
				.ok_or(GeoError::MissingOutputPath)?
				.with_extension("geo"),
		};
		fs::write(&path, self.to_geo_string()?)?;
		Ok(path)
	}
}

/// One-shot convenience: read a plain tetrahedral file and return its
/// flattened positions and tetrahedron indices.
pub fn read_tet_mesh(path: impl AsRef<Path>) -> Result<(Vec<f64>, Vec<u32>)> {
	let file = GeoFile::<f64>::open(path)?;
	let positions = file.positions().to_vec();
	let indices = file.flat_indices().to_vec();
	Ok((positions, indices))
}

#[cfg(test)]
mod tests {
	use super::{DecodeOptions, GeoFile, PrimitiveMode};
	use crate::geo::GeoError;

	const UNIFORM_DOC: &str = r#"["fileversion","20.0.590","pointcount",4,"vertexcount",4,"primitivecount",1,"topology",["pointref",["indices",[0,1,2,3]]],"attributes",["pointattributes",[[["scope","public","type","numeric","name","P"],["size",3,"storage","fpreal32","values",["size",3,"storage","fpreal32","tuples",[[0,0,0],[1,0,0],[0,1,0],[0,0,1]]]]]]]]"#;

	#[test]
	fn uniform_document_decodes_end_to_end() {
		let geo = GeoFile::<f64>::parse_str(UNIFORM_DOC, &DecodeOptions::default()).expect("document decodes");

		assert_eq!(geo.header().point_count, 4);
		assert_eq!(geo.topology().verts_per_primitive, 4);
		assert_eq!(geo.primitive_verts(), vec![&[0, 1, 2, 3][..]]);
		assert_eq!(geo.positions().len(), 12);
		assert!(geo.surface_points().is_empty());
	}

	#[test]
	fn pass_through_serialization_is_idempotent() {
		let geo = GeoFile::<f64>::parse_str(UNIFORM_DOC, &DecodeOptions::default()).expect("document decodes");
		let first = geo.to_geo_string().expect("serializes");
		let again = GeoFile::<f64>::parse_str(&first, &DecodeOptions::default()).expect("reparses");
		assert_eq!(first, again.to_geo_string().expect("serializes"));
	}

	#[test]
	fn set_positions_flows_into_serialization() {
		let mut geo = GeoFile::<f64>::parse_str(UNIFORM_DOC, &DecodeOptions::default()).expect("document decodes");
		let moved: Vec<f64> = geo.positions().iter().map(|component| component + 2.0).collect();
		geo.set_positions(&moved).expect("positions set");

		let text = geo.to_geo_string().expect("serializes");
		let reread = GeoFile::<f64>::parse_str(&text, &DecodeOptions::default()).expect("reparses");
		assert_eq!(reread.positions(), moved.as_slice());
	}

	#[test]
	fn mixed_mode_requires_consistent_counts() {
		let doc = r#"["pointcount",1,"primitivecount",5,"info",{"primcount_summary":"      3 Polygons\n      1 Tetrahedron\n"},"attributes",["pointattributes",[[["name","P"],["size",3,"storage","fpreal32","values",["size",3,"storage","fpreal32","tuples",[[0,0,0]]]]]]]]"#;
		let options = DecodeOptions {
			mode: PrimitiveMode::MixedTetSurface,
		};
		let err = GeoFile::<f64>::parse_str(doc, &options).expect_err("3 + 1 != 5 fails");
		assert!(matches!(
			err,
			GeoError::PrimitiveCountMismatch {
				primitives: 5,
				surfaces: 3,
				tets: 1,
			}
		));
	}

	#[test]
	fn write_without_any_path_is_an_error() {
		let geo = GeoFile::<f64>::parse_str(UNIFORM_DOC, &DecodeOptions::default()).expect("document decodes");
		assert!(matches!(geo.write(None), Err(GeoError::MissingOutputPath)));
	}
}
