use std::io::Read;

use crate::geo::{GeoError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// gzip member magic used by compressed `.geo.gz` files.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Plain text stream.
	None,
	/// gzip-compressed stream.
	Gzip,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Gzip => "gzip",
		}
	}
}

/// Detect and decode compression, returning `(mode, text)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, String)> {
	if raw.starts_with(&GZIP_MAGIC) {
		let out = decode_gzip(&raw)?;
		let text = String::from_utf8(out).map_err(|_| GeoError::NotText)?;
		return Ok((Compression::Gzip, text));
	}

	let text = String::from_utf8(raw).map_err(|_| GeoError::NotText)?;
	Ok((Compression::None, text))
}

fn decode_gzip(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = flate2::read::GzDecoder::new(raw);
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(GeoError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
