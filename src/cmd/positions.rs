use std::path::PathBuf;

use geodoc::geo::{GeoFile, Result};

/// Print decoded point positions, one point per line.
pub fn run(path: PathBuf, limit: Option<usize>) -> Result<()> {
	let geo = GeoFile::<f64>::open(&path)?;
	let positions = geo.positions();
	let total = positions.len() / 3;

	println!("points: {total}");
	let take = limit.unwrap_or(total).min(total);
	for (index, triple) in positions.chunks_exact(3).take(take).enumerate() {
		println!("{index}: {} {} {}", triple[0], triple[1], triple[2]);
	}

	Ok(())
}
