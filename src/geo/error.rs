use std::path::PathBuf;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors produced while reading and decoding `.geo` data.
#[derive(Debug, Error)]
pub enum GeoError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Underlying JSON text could not be parsed.
	#[error("parse: {0}")]
	Parse(#[from] serde_json::Error),
	/// Input bytes were not UTF-8 text after decompression.
	#[error("input is not valid UTF-8 text")]
	NotText,
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Failure annotated with the input path it came from.
	#[error("{}: {source}", .path.display())]
	InFile {
		/// Offending input file.
		path: PathBuf,
		/// Underlying failure.
		source: Box<GeoError>,
	},
	/// Pair list array did not hold an even number of elements.
	#[error("pair list has odd length {len}")]
	MalformedPairList {
		/// Offending array length.
		len: usize,
	},
	/// Pair list key slot held a non-string node.
	#[error("pair list key at element {at} is {kind}, expected string")]
	InvalidKeyType {
		/// Node kind found in the key slot.
		kind: &'static str,
		/// Element offset of the key slot.
		at: usize,
	},
	/// Runtime node kind disagreed with the section convention.
	#[error("type mismatch in {context}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Section or field being decoded.
		context: &'static str,
		/// Expected node kind.
		expected: &'static str,
		/// Actual node kind.
		got: &'static str,
	},
	/// Expected key was absent from a section pair list.
	#[error("missing key {key:?} in {section}")]
	MissingKey {
		/// Section being decoded.
		section: &'static str,
		/// Absent key.
		key: &'static str,
	},
	/// Run-length list array did not hold an even number of elements.
	#[error("run-length list has odd length {len}")]
	MalformedRunList {
		/// Offending array length.
		len: usize,
	},
	/// Run-length data expanded to a different length than reported.
	#[error("run-length data expands to {got} entries, expected {expected}")]
	RunLengthMismatch {
		/// Independently reported element count.
		expected: u32,
		/// Sum of run lengths.
		got: u64,
	},
	/// Flat index list is not divisible by the primitive count.
	#[error("{indices} indices do not divide into {primitives} primitives")]
	IndicesSizeMismatch {
		/// Flat index list length.
		indices: usize,
		/// Reported primitive count.
		primitives: u32,
	},
	/// Per-primitive vertex count is neither 3 nor 4.
	#[error("unsupported primitive arity {arity} (expected 3 or 4)")]
	UnsupportedPrimitiveArity {
		/// Inferred vertices per primitive.
		arity: u32,
	},
	/// `attributes.pointattributes` section absent or not a sequence.
	#[error("no pointattributes section in file")]
	MissingPointAttributes,
	/// No point attribute named `P` after scanning all entries.
	#[error("no P attribute found in point attributes")]
	MissingPositionAttribute,
	/// Position payload shape disagreed with the reported point count.
	#[error("invalid position shape: expected {expected} {what}, got {got}")]
	InvalidPositionShape {
		/// Unit being counted.
		what: &'static str,
		/// Expected element count.
		expected: usize,
		/// Actual element count.
		got: usize,
	},
	/// Position component was NaN or infinite on write-back.
	#[error("non-finite position component at point {index}")]
	NonFinitePosition {
		/// Point index of the offending tuple.
		index: usize,
	},
	/// Point attribute payload uses a storage encoding this decoder does not handle.
	#[error("unsupported attribute storage encoding: {encoding}")]
	UnsupportedAttributeEncoding {
		/// Encoding label, as found in the file.
		encoding: String,
	},
	/// Mixed-mode primitive count does not equal surface plus tetrahedron counts.
	#[error("primitive count {primitives} != {surfaces} surfaces + {tets} tetrahedra")]
	PrimitiveCountMismatch {
		/// Reported total primitive count.
		primitives: u32,
		/// Surface primitive count from the info summary.
		surfaces: u32,
		/// Tetrahedron count from the info summary.
		tets: u32,
	},
	/// Decoded group membership mask length disagreed with the point count.
	#[error("point group mask has {got} entries, expected {expected}")]
	GroupSizeMismatch {
		/// Reported point count.
		expected: u32,
		/// Decoded mask length.
		got: u64,
	},
	/// Write was requested with no output path and no input path to derive one from.
	#[error("no output path given and no input path to derive one from")]
	MissingOutputPath,
}
