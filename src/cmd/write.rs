use std::path::PathBuf;

use geodoc::geo::{DecodeOptions, GeoFile, PrimitiveMode, Result};

/// Re-serialize the untouched document tree to disk.
pub fn run(path: PathBuf, mixed: bool, out: Option<PathBuf>) -> Result<()> {
	let options = DecodeOptions {
		mode: if mixed { PrimitiveMode::MixedTetSurface } else { PrimitiveMode::Uniform },
	};
	let geo = GeoFile::<f64>::open_with(&path, &options)?;
	let written = geo.write(out.as_deref())?;

	println!("wrote: {}", written.display());
	Ok(())
}
