use std::path::PathBuf;

use geodoc::geo::{DecodeOptions, GeoFile, PrimitiveMode, Result};

/// Decode in mixed mode and print the tetrahedron/surface partition.
pub fn run(path: PathBuf) -> Result<()> {
	let options = DecodeOptions {
		mode: PrimitiveMode::MixedTetSurface,
	};
	let geo = GeoFile::<f64>::open_with(&path, &options)?;
	let header = geo.header();

	println!("primitivecount: {}", header.primitive_count);
	println!("surfacecount: {}", header.surface_count);
	println!("tetcount: {}", header.tet_count);
	println!("tet_indices: {}", geo.tet_indices().len());
	println!("surface_indices: {}", geo.surface_indices().len());

	let surface_points = geo.surface_points().iter().filter(|flag| **flag).count();
	println!("surface_points: {surface_points} of {}", header.point_count);

	for warning in geo.split_warnings() {
		println!("warning: {warning}");
	}

	Ok(())
}
