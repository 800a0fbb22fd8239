use std::path::PathBuf;

use geodoc::geo::{GeoFile, Result};

/// Print resolved connectivity, one primitive per line.
pub fn run(path: PathBuf, limit: Option<usize>) -> Result<()> {
	let geo = GeoFile::<f64>::open(&path)?;
	let topology = geo.topology();
	let tuples = topology.primitive_verts();

	println!("verts_per_primitive: {}", topology.verts_per_primitive);
	println!("primitives: {}", tuples.len());

	let take = limit.unwrap_or(tuples.len()).min(tuples.len());
	for (index, verts) in tuples.iter().take(take).enumerate() {
		let rendered: Vec<String> = verts.iter().map(ToString::to_string).collect();
		println!("{index}: {}", rendered.join(" "));
	}

	Ok(())
}
