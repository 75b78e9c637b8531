use std::collections::HashMap;

use serde::Serialize;

use crate::resource::bytes::Cursor;
use crate::resource::{Block, FieldType, Indirection, ResourceError, Result};

const STRUCT_RECORD_SIZE: usize = 40;
const FIELD_RECORD_SIZE: usize = 24;
const ENUM_RECORD_SIZE: usize = 24;
const ENUM_VALUE_RECORD_SIZE: usize = 8;
/// The enum table header sits at a fixed position, not after the struct table.
const ENUM_TABLE_POS: usize = 12;

/// One field of a manifest struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
	/// Field name.
	pub name: String,
	/// Inline element count; `0` and `1` both mean a single value.
	pub count: u16,
	/// Offset from the owning struct's start.
	pub on_disk_offset: usize,
	/// Raw indirection tags, outermost first.
	pub indirections: Vec<u8>,
	/// Struct or enum id for struct/enum typed fields.
	pub type_data: u32,
	/// Raw type code.
	pub type_code: i16,
}

impl FieldDefinition {
	/// Known scalar type, if the code is recognized.
	pub fn field_type(&self) -> Option<FieldType> {
		FieldType::from_code(self.type_code)
	}

	/// Indirection chain with unknown tags left as `Err(code)`.
	pub fn indirection_chain(&self) -> impl Iterator<Item = std::result::Result<Indirection, u8>> + '_ {
		self.indirections
			.iter()
			.map(|code| Indirection::from_code(*code).ok_or(*code))
	}
}

/// One struct schema from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDefinition {
	/// Introspection version stamped on this record.
	pub introspection_version: u32,
	/// Struct id referenced by fields and base links.
	pub id: u32,
	/// Struct name.
	pub name: String,
	/// Layout checksum.
	pub disk_crc: u32,
	/// Compiler user version.
	pub user_version: i32,
	/// Size on disk.
	pub disk_size: u16,
	/// Alignment on disk.
	pub alignment: u16,
	/// Base struct id for single-inheritance layouts.
	pub base_struct_id: Option<u32>,
	/// Struct flags byte.
	pub flags: u8,
	/// Own fields in schema order.
	pub fields: Vec<FieldDefinition>,
}

/// One named enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
	/// Value name.
	pub name: String,
	/// Value.
	pub value: i32,
}

/// One enum schema from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
	/// Introspection version stamped on this record.
	pub introspection_version: u32,
	/// Enum id referenced by enum-typed fields.
	pub id: u32,
	/// Enum name.
	pub name: String,
	/// Layout checksum.
	pub disk_crc: u32,
	/// Compiler user version.
	pub user_version: i32,
	/// Named values in schema order.
	pub values: Vec<EnumValue>,
}

impl EnumDefinition {
	/// Name of the first value whose bit pattern equals `raw`.
	pub fn name_of(&self, raw: u32) -> Option<&str> {
		self.values
			.iter()
			.find(|item| item.value as u32 == raw)
			.map(|item| item.name.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldRef {
	owner: usize,
	field: usize,
}

/// Parsed introspection manifest (`NTRO` block).
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
	/// Manifest format version.
	pub introspection_version: u32,
	/// Struct definitions in block order. The first one is the payload root.
	pub structs: Vec<StructDefinition>,
	/// Enum definitions in block order.
	pub enums: Vec<EnumDefinition>,
	#[serde(skip)]
	struct_index: HashMap<u32, usize>,
	#[serde(skip)]
	layouts: Vec<Vec<FieldRef>>,
}

impl Manifest {
	/// Parse the manifest block body.
	pub fn parse(bytes: &[u8], block: &Block) -> Result<Self> {
		let manifest = parse_tables(bytes, block.offset).map_err(into_malformed)?;
		tracing::debug!(
			structs = manifest.structs.len(),
			enums = manifest.enums.len(),
			version = manifest.introspection_version,
			"manifest parsed"
		);
		Ok(manifest)
	}

	/// Build a manifest from already-parsed definitions, computing layouts.
	pub fn from_definitions(introspection_version: u32, structs: Vec<StructDefinition>, enums: Vec<EnumDefinition>) -> Result<Self> {
		let mut struct_index = HashMap::with_capacity(structs.len());
		for (index, item) in structs.iter().enumerate() {
			if struct_index.insert(item.id, index).is_some() {
				return Err(malformed(0, format!("duplicate struct id 0x{:08x}", item.id)));
			}
		}

		let mut layouts = Vec::with_capacity(structs.len());
		for index in 0..structs.len() {
			let mut out = Vec::new();
			let mut stack = Vec::new();
			flatten(&structs, &struct_index, index, &mut stack, &mut out)?;
			layouts.push(out);
		}

		Ok(Self {
			introspection_version,
			structs,
			enums,
			struct_index,
			layouts,
		})
	}

	/// Look up a struct by id.
	pub fn struct_by_id(&self, id: u32) -> Option<&StructDefinition> {
		self.struct_index.get(&id).map(|index| &self.structs[*index])
	}

	/// Look up a struct by name.
	pub fn struct_by_name(&self, name: &str) -> Option<&StructDefinition> {
		self.structs.iter().find(|item| item.name == name)
	}

	/// Look up an enum by id.
	pub fn enum_by_id(&self, id: u32) -> Option<&EnumDefinition> {
		self.enums.iter().find(|item| item.id == id)
	}

	/// First struct in the manifest.
	pub fn first_struct(&self) -> Option<&StructDefinition> {
		self.structs.first()
	}

	/// Flattened fields of struct `id`: base fields first (recursively), then own fields.
	pub fn layout(&self, id: u32) -> impl Iterator<Item = &FieldDefinition> + '_ {
		self.struct_index
			.get(&id)
			.and_then(|index| self.layouts.get(*index))
			.into_iter()
			.flatten()
			.map(|item| &self.structs[item.owner].fields[item.field])
	}
}

fn flatten(structs: &[StructDefinition], index: &HashMap<u32, usize>, at: usize, stack: &mut Vec<usize>, out: &mut Vec<FieldRef>) -> Result<()> {
	if stack.contains(&at) {
		return Err(malformed(0, format!("base struct cycle through {}", structs[at].name)));
	}
	stack.push(at);

	let item = &structs[at];
	if let Some(base_id) = item.base_struct_id {
		let base = *index
			.get(&base_id)
			.ok_or_else(|| malformed(0, format!("{} names missing base struct 0x{base_id:08x}", item.name)))?;
		flatten(structs, index, base, stack, out)?;
	}
	out.extend((0..item.fields.len()).map(|field| FieldRef { owner: at, field }));

	stack.pop();
	Ok(())
}

fn parse_tables(bytes: &[u8], start: usize) -> Result<Manifest> {
	let mut cursor = Cursor::at(bytes, start);
	let introspection_version = cursor.read_u32_le()?;
	let (structs_at, struct_count) = cursor.read_table()?;

	let enum_table = start.checked_add(ENUM_TABLE_POS).ok_or_else(|| malformed(start, "enum table position overflows"))?;
	cursor.seek(enum_table)?;
	let (enums_at, enum_count) = cursor.read_table()?;

	let mut structs = Vec::with_capacity(struct_count.min(1024));
	if struct_count > 0 {
		cursor.check_span(structs_at, struct_count, STRUCT_RECORD_SIZE)?;
		for index in 0..struct_count {
			structs.push(read_struct(bytes, structs_at + index * STRUCT_RECORD_SIZE)?);
		}
	}

	let mut enums = Vec::with_capacity(enum_count.min(1024));
	if enum_count > 0 {
		cursor.check_span(enums_at, enum_count, ENUM_RECORD_SIZE)?;
		for index in 0..enum_count {
			enums.push(read_enum(bytes, enums_at + index * ENUM_RECORD_SIZE)?);
		}
	}

	Manifest::from_definitions(introspection_version, structs, enums)
}

fn read_struct(bytes: &[u8], at: usize) -> Result<StructDefinition> {
	let mut cursor = Cursor::at(bytes, at);
	let introspection_version = cursor.read_u32_le()?;
	let id = cursor.read_u32_le()?;
	let name = cursor.read_offset_string()?.unwrap_or_default();
	let disk_crc = cursor.read_u32_le()?;
	let user_version = cursor.read_i32_le()?;
	let disk_size = cursor.read_u16_le()?;
	let alignment = cursor.read_u16_le()?;
	let base_struct_id = cursor.read_u32_le()?;
	let (fields_at, field_count) = cursor.read_table()?;
	let flags = cursor.read_u8()?;

	let mut fields = Vec::with_capacity(field_count.min(1024));
	if field_count > 0 {
		cursor.check_span(fields_at, field_count, FIELD_RECORD_SIZE)?;
		for index in 0..field_count {
			fields.push(read_field(bytes, fields_at + index * FIELD_RECORD_SIZE)?);
		}
	}

	tracing::trace!(id, name = %name, fields = fields.len(), "manifest struct");
	Ok(StructDefinition {
		introspection_version,
		id,
		name,
		disk_crc,
		user_version,
		disk_size,
		alignment,
		base_struct_id: (base_struct_id != 0).then_some(base_struct_id),
		flags,
		fields,
	})
}

fn read_field(bytes: &[u8], at: usize) -> Result<FieldDefinition> {
	let mut cursor = Cursor::at(bytes, at);
	let name = cursor.read_offset_string()?.unwrap_or_default();
	let count = cursor.read_i16_le()?;
	let on_disk_offset = cursor.read_i16_le()?;
	let (indirections_at, indirection_count) = cursor.read_table()?;
	let type_data = cursor.read_u32_le()?;
	let type_code = cursor.read_i16_le()?;

	let count = u16::try_from(count).map_err(|_| malformed(at, format!("field {name} has negative count {count}")))?;
	let on_disk_offset =
		usize::try_from(on_disk_offset).map_err(|_| malformed(at, format!("field {name} has negative offset {on_disk_offset}")))?;

	let mut indirections = Vec::new();
	if indirection_count > 0 {
		cursor.check_span(indirections_at, indirection_count, 1)?;
		cursor.seek(indirections_at)?;
		indirections.extend_from_slice(cursor.read_exact(indirection_count)?);
	}

	Ok(FieldDefinition {
		name,
		count,
		on_disk_offset,
		indirections,
		type_data,
		type_code,
	})
}

fn read_enum(bytes: &[u8], at: usize) -> Result<EnumDefinition> {
	let mut cursor = Cursor::at(bytes, at);
	let introspection_version = cursor.read_u32_le()?;
	let id = cursor.read_u32_le()?;
	let name = cursor.read_offset_string()?.unwrap_or_default();
	let disk_crc = cursor.read_u32_le()?;
	let user_version = cursor.read_i32_le()?;
	let (values_at, value_count) = cursor.read_table()?;

	let mut values = Vec::with_capacity(value_count.min(1024));
	if value_count > 0 {
		cursor.check_span(values_at, value_count, ENUM_VALUE_RECORD_SIZE)?;
		cursor.seek(values_at)?;
		for _ in 0..value_count {
			let name = cursor.read_offset_string()?.unwrap_or_default();
			let value = cursor.read_i32_le()?;
			values.push(EnumValue { name, value });
		}
	}

	Ok(EnumDefinition {
		introspection_version,
		id,
		name,
		disk_crc,
		user_version,
		values,
	})
}

fn malformed(at: usize, reason: impl Into<String>) -> ResourceError {
	ResourceError::MalformedManifest { at, reason: reason.into() }
}

fn into_malformed(err: ResourceError) -> ResourceError {
	match err {
		ResourceError::TruncatedData { at, need, available } => {
			malformed(at, format!("reference needs {need} bytes, {available} available"))
		}
		other => other,
	}
}

#[cfg(test)]
mod tests;
