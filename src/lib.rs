//! Public library API for decoding Houdini `.geo` geometry files.

/// Document tree handling, header extraction, topology, attribute, and group resolution, and pass-through writing.
pub mod geo;
