use std::path::PathBuf;

use geodoc::geo::{DecodeOptions, GeoFile, PrimitiveMode, Result};

/// Print header fields and decode statistics.
pub fn run(path: PathBuf, mixed: bool, json: bool) -> Result<()> {
	let options = DecodeOptions {
		mode: if mixed { PrimitiveMode::MixedTetSurface } else { PrimitiveMode::Uniform },
	};
	let geo = GeoFile::<f64>::open_with(&path, &options)?;
	let header = geo.header();
	let surface_point_count = geo.surface_points().iter().filter(|flag| **flag).count();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: geo.compression.as_str(),
			file_version: header.file_version.clone(),
			has_index: header.has_index,
			point_count: header.point_count,
			vertex_count: header.vertex_count,
			primitive_count: header.primitive_count,
			surface_count: header.surface_count,
			tet_count: header.tet_count,
			verts_per_primitive: geo.topology().verts_per_primitive,
			tet_index_count: geo.tet_indices().len(),
			surface_index_count: geo.surface_indices().len(),
			surface_point_count,
			warnings: geo.split_warnings().iter().map(ToString::to_string).collect(),
		};
		println!("{}", serde_json::to_string(&payload)?);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", geo.compression.as_str());
	println!("fileversion: {}", header.file_version);
	println!("hasindex: {}", header.has_index);
	println!("pointcount: {}", header.point_count);
	println!("vertexcount: {}", header.vertex_count);
	println!("primitivecount: {}", header.primitive_count);

	if mixed {
		println!("surfacecount: {}", header.surface_count);
		println!("tetcount: {}", header.tet_count);
		println!("tet_indices: {}", geo.tet_indices().len());
		println!("surface_indices: {}", geo.surface_indices().len());
		println!("surface_points: {surface_point_count}");
	} else {
		println!("verts_per_primitive: {}", geo.topology().verts_per_primitive);
		println!("primitives: {}", geo.primitive_verts().len());
	}

	for warning in geo.split_warnings() {
		println!("warning: {warning}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	file_version: String,
	has_index: bool,
	point_count: u32,
	vertex_count: u32,
	primitive_count: u32,
	surface_count: u32,
	tet_count: u32,
	verts_per_primitive: u32,
	tet_index_count: usize,
	surface_index_count: usize,
	surface_point_count: usize,
	warnings: Vec<String>,
}
