use serde::Serialize;

use crate::resource::bytes::Cursor;
use crate::resource::{Block, ResourceError, Result};

/// A file the resource was compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDependency {
	/// Path relative to the content root.
	pub content_relative_filename: String,
	/// Search path the file was found through.
	pub content_search_path: String,
	/// CRC of the source file.
	pub file_crc: u32,
	/// Compiler flags.
	pub flags: u32,
}

/// A compiler argument that affected the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentDependency {
	/// Argument name.
	pub parameter_name: String,
	/// Argument type label.
	pub parameter_type: String,
	/// Fingerprint of the value used.
	pub fingerprint: u32,
	/// Fingerprint of the default value.
	pub fingerprint_default: u32,
}

/// Compiler-specific provenance, used to infer the resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialDependency {
	/// Free-form content, e.g. a compiler version banner.
	pub string: String,
	/// Compiler identifier such as `CompileTexture`.
	pub compiler_identifier: String,
	/// Fingerprint.
	pub fingerprint: u32,
	/// Compiler user data.
	pub user_data: u32,
}

/// Additional file tracked alongside the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalRelatedFile {
	/// Path relative to the content root.
	pub content_relative_filename: String,
	/// Search path the file was found through.
	pub content_search_path: String,
}

/// A resource compiled as a child of this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildResource {
	/// Child resource id.
	pub id: u64,
	/// Child resource name.
	pub resource_name: String,
	/// Trailing word with no known meaning.
	pub unknown: u32,
}

/// Named integer emitted by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraInt {
	/// Key.
	pub name: String,
	/// Value.
	pub value: i32,
}

/// Named float emitted by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraFloat {
	/// Key.
	pub name: String,
	/// Value.
	pub value: f32,
}

/// Named string emitted by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraString {
	/// Key.
	pub name: String,
	/// Value.
	pub value: String,
}

/// Legacy edit info (`REDI` block): compiler provenance and dependencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditInfo {
	/// Source files.
	pub input_dependencies: Vec<InputDependency>,
	/// Extra source files.
	pub additional_input_dependencies: Vec<InputDependency>,
	/// Compiler arguments.
	pub argument_dependencies: Vec<ArgumentDependency>,
	/// Compiler-specific provenance.
	pub special_dependencies: Vec<SpecialDependency>,
	/// Related files.
	pub additional_related_files: Vec<AdditionalRelatedFile>,
	/// Child resources.
	pub child_resources: Vec<ChildResource>,
	/// Extra integers.
	pub extra_ints: Vec<ExtraInt>,
	/// Extra floats.
	pub extra_floats: Vec<ExtraFloat>,
	/// Extra strings.
	pub extra_strings: Vec<ExtraString>,
}

const TABLE_COUNT: usize = 10;

impl EditInfo {
	/// Parse the edit info block.
	pub fn parse(bytes: &[u8], block: &Block) -> Result<Self> {
		let mut cursor = Cursor::at(bytes, block.offset);
		let mut tables = [(0_usize, 0_usize); TABLE_COUNT];
		for table in &mut tables {
			*table = cursor.read_table()?;
		}
		let [input, additional_input, argument, special, custom, related, children, ints, floats, strings] = tables;

		if custom.1 != 0 {
			return Err(ResourceError::InvalidEditInfo {
				reason: format!("custom dependency table has {} entries, expected none", custom.1),
			});
		}

		let info = Self {
			input_dependencies: read_records(bytes, input, 16, read_input)?,
			additional_input_dependencies: read_records(bytes, additional_input, 16, read_input)?,
			argument_dependencies: read_records(bytes, argument, 16, |cursor| {
				Ok(ArgumentDependency {
					parameter_name: read_string(cursor)?,
					parameter_type: read_string(cursor)?,
					fingerprint: cursor.read_u32_le()?,
					fingerprint_default: cursor.read_u32_le()?,
				})
			})?,
			special_dependencies: read_records(bytes, special, 16, |cursor| {
				Ok(SpecialDependency {
					string: read_string(cursor)?,
					compiler_identifier: read_string(cursor)?,
					fingerprint: cursor.read_u32_le()?,
					user_data: cursor.read_u32_le()?,
				})
			})?,
			additional_related_files: read_records(bytes, related, 8, |cursor| {
				Ok(AdditionalRelatedFile {
					content_relative_filename: read_string(cursor)?,
					content_search_path: read_string(cursor)?,
				})
			})?,
			child_resources: read_records(bytes, children, 16, |cursor| {
				Ok(ChildResource {
					id: cursor.read_u64_le()?,
					resource_name: read_string(cursor)?,
					unknown: cursor.read_u32_le()?,
				})
			})?,
			extra_ints: read_records(bytes, ints, 8, |cursor| {
				Ok(ExtraInt {
					name: read_string(cursor)?,
					value: cursor.read_i32_le()?,
				})
			})?,
			extra_floats: read_records(bytes, floats, 8, |cursor| {
				Ok(ExtraFloat {
					name: read_string(cursor)?,
					value: cursor.read_f32_le()?,
				})
			})?,
			extra_strings: read_records(bytes, strings, 8, |cursor| {
				Ok(ExtraString {
					name: read_string(cursor)?,
					value: read_string(cursor)?,
				})
			})?,
		};

		tracing::debug!(
			inputs = info.input_dependencies.len(),
			specials = info.special_dependencies.len(),
			children = info.child_resources.len(),
			"edit info parsed"
		);
		Ok(info)
	}
}

fn read_records<'a, T>(
	bytes: &'a [u8],
	(start, count): (usize, usize),
	size: usize,
	mut read: impl FnMut(&mut Cursor<'a>) -> Result<T>,
) -> Result<Vec<T>> {
	if count == 0 {
		return Ok(Vec::new());
	}

	let mut cursor = Cursor::at(bytes, start);
	cursor.check_span(start, count, size)?;
	let mut out = Vec::with_capacity(count);
	for _ in 0..count {
		out.push(read(&mut cursor)?);
	}
	Ok(out)
}

fn read_input(cursor: &mut Cursor<'_>) -> Result<InputDependency> {
	Ok(InputDependency {
		content_relative_filename: read_string(cursor)?,
		content_search_path: read_string(cursor)?,
		file_crc: cursor.read_u32_le()?,
		flags: cursor.read_u32_le()?,
	})
}

fn read_string(cursor: &mut Cursor<'_>) -> Result<String> {
	Ok(cursor.read_offset_string()?.unwrap_or_default())
}
