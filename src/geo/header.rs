use crate::geo::pairs::PairMap;
use crate::geo::value::Value;
use crate::geo::Result;

/// Scalar fields from the top of a `.geo` document.
///
/// Absent fields take format-defined defaults: empty version, no index,
/// zero counts. `surface_count` and `tet_count` come from the info section's
/// human-readable primitive tally and stay 0 when it is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoHeader {
	/// Houdini release that wrote the file.
	pub file_version: String,
	/// Whether the file advertises an embedded index.
	pub has_index: bool,
	/// Number of points.
	pub point_count: u32,
	/// Number of vertices.
	pub vertex_count: u32,
	/// Number of primitives of all kinds.
	pub primitive_count: u32,
	/// Surface primitives reported by the info summary.
	pub surface_count: u32,
	/// Tetrahedra reported by the info summary.
	pub tet_count: u32,
}

/// Raw sub-trees of the named document sections, absent ones left `None`.
///
/// Absence is not an error here; it only becomes one when a downstream
/// resolver requires the section.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sections<'a> {
	/// `topology` section.
	pub topology: Option<&'a Value>,
	/// `attributes` section.
	pub attributes: Option<&'a Value>,
	/// `info` section.
	pub info: Option<&'a Value>,
	/// `primitives` section.
	pub primitives: Option<&'a Value>,
	/// `pointgroups` section.
	pub point_groups: Option<&'a Value>,
	/// `primitivegroups` section, kept only for pass-through.
	pub primitive_groups: Option<&'a Value>,
}

/// Bind the top-level pair list to typed header fields and section trees.
pub fn extract_header<'a>(doc: &PairMap<'a>) -> Result<(GeoHeader, Sections<'a>)> {
	let mut header = GeoHeader::default();
	let mut sections = Sections::default();

	for (key, value) in doc.iter() {
		match key {
			"fileversion" => header.file_version = value.expect_str("fileversion")?.to_owned(),
			"hasindex" => header.has_index = value.expect_bool("hasindex")?,
			"pointcount" => header.point_count = value.expect_u32("pointcount")?,
			"vertexcount" => header.vertex_count = value.expect_u32("vertexcount")?,
			"primitivecount" => header.primitive_count = value.expect_u32("primitivecount")?,
			"topology" => sections.topology = Some(value),
			"attributes" => sections.attributes = Some(value),
			"info" => sections.info = Some(value),
			"primitives" => sections.primitives = Some(value),
			"pointgroups" => sections.point_groups = Some(value),
			"primitivegroups" => sections.primitive_groups = Some(value),
			_ => {}
		}
	}

	if let Some(info) = sections.info {
		let info_map = PairMap::from_tree(info)?;
		if let Some(summary) = info_map.get("primcount_summary").and_then(Value::as_str) {
			let (surfaces, tets) = parse_primcount_summary(summary);
			header.surface_count = surfaces;
			header.tet_count = tets;
		}
	}

	Ok((header, sections))
}

/// Scan the human-readable primitive tally for surface and tetrahedron
/// counts.
///
/// Lines look like `          1,024 Tetrahedrons`; anything that does not
/// match `<count> <word>` is skipped.
fn parse_primcount_summary(summary: &str) -> (u32, u32) {
	let mut surfaces = 0;
	let mut tets = 0;

	for line in summary.lines() {
		let mut words = line.split_whitespace();
		let (Some(count), Some(label)) = (words.next(), words.next()) else {
			continue;
		};
		let Some(count) = parse_grouped_u32(count) else {
			continue;
		};

		if label.eq_ignore_ascii_case("polygon") || label.eq_ignore_ascii_case("polygons") {
			surfaces = count;
		} else if label.eq_ignore_ascii_case("tetrahedron") || label.eq_ignore_ascii_case("tetrahedrons") {
			tets = count;
		}
	}

	(surfaces, tets)
}

fn parse_grouped_u32(text: &str) -> Option<u32> {
	if text.is_empty() || !text.bytes().next().is_some_and(|byte| byte.is_ascii_digit()) {
		return None;
	}

	let mut value = 0_u32;
	for byte in text.bytes() {
		if byte == b',' {
			continue;
		}
		if !byte.is_ascii_digit() {
			return None;
		}
		value = value.checked_mul(10)?.checked_add(u32::from(byte - b'0'))?;
	}
	Some(value)
}
