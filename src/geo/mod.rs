mod attributes;
mod compression;
mod error;
mod file;
mod groups;
mod header;
mod pairs;
mod primitives;
mod rle;
mod topology;
mod value;

/// Position attribute resolution and numeric-width parameterization.
pub use attributes::{POSITION_ATTRIBUTE, PositionScalar, resolve_positions, write_positions};
/// Compression detection result.
pub use compression::Compression;
/// Error and result aliases.
pub use error::{GeoError, Result};
/// Document container, decode options, and one-shot readers.
pub use file::{DecodeOptions, GeoFile, PrimitiveMode, read_tet_mesh};
/// Point-group membership decoding.
pub use groups::{SURFACE_GROUP, resolve_surface_membership};
/// Header fields and section binding.
pub use header::{GeoHeader, Sections, extract_header};
/// Pair-list normalization.
pub use pairs::{PairMap, metadata_data};
/// Primitive run parsing and mixed-index splitting.
pub use primitives::{PrimitiveRun, RunKind, SplitIndices, SplitWarning, parse_primitive_runs, split_primitives};
/// Run-length boolean mask decoding.
pub use rle::{decode_bool_runs, parse_bool_runs};
/// Connectivity resolution.
pub use topology::{Topology, point_ref_indices, resolve_topology};
/// Document tree node type.
pub use value::Value;
