use crate::writer::{ByteWriter, StringPool};

const INTROSPECTION_VERSION: u32 = 4;

/// One field record of a synthetic manifest struct.
#[derive(Debug, Clone)]
pub struct FieldSpec {
	/// Field name.
	pub name: String,
	/// Inline element count (`0` for a plain scalar).
	pub count: i16,
	/// Offset from struct start.
	pub offset: i16,
	/// Raw indirection tags, outermost first.
	pub indirections: Vec<u8>,
	/// Struct or enum id for struct/enum typed fields.
	pub type_data: u32,
	/// Raw field type code.
	pub type_code: i16,
}

impl FieldSpec {
	/// Scalar field with no indirection.
	pub fn new(name: &str, type_code: i16, offset: i16) -> Self {
		Self {
			name: name.to_owned(),
			count: 0,
			offset,
			indirections: Vec::new(),
			type_data: 0,
			type_code,
		}
	}

	/// Set the inline element count.
	pub fn count(mut self, count: i16) -> Self {
		self.count = count;
		self
	}

	/// Set the indirection chain.
	pub fn indirections(mut self, tags: &[u8]) -> Self {
		self.indirections = tags.to_vec();
		self
	}

	/// Set the referenced struct/enum id.
	pub fn type_data(mut self, id: u32) -> Self {
		self.type_data = id;
		self
	}
}

/// One synthetic struct definition.
#[derive(Debug, Clone)]
pub struct StructSpec {
	/// Struct id.
	pub id: u32,
	/// Struct name.
	pub name: String,
	/// Size on disk.
	pub disk_size: u16,
	/// Alignment.
	pub alignment: u16,
	/// Base struct id, `0` for none.
	pub base_id: u32,
	/// Struct flags byte.
	pub flags: u8,
	/// Fields in schema order.
	pub fields: Vec<FieldSpec>,
}

impl StructSpec {
	/// Struct without fields.
	pub fn new(id: u32, name: &str, disk_size: u16) -> Self {
		Self {
			id,
			name: name.to_owned(),
			disk_size,
			alignment: 4,
			base_id: 0,
			flags: 0,
			fields: Vec::new(),
		}
	}

	/// Set the base struct id.
	pub fn base(mut self, base_id: u32) -> Self {
		self.base_id = base_id;
		self
	}

	/// Append a field.
	pub fn field(mut self, field: FieldSpec) -> Self {
		self.fields.push(field);
		self
	}
}

/// One synthetic enum definition.
#[derive(Debug, Clone)]
pub struct EnumSpec {
	/// Enum id.
	pub id: u32,
	/// Enum name.
	pub name: String,
	/// Named values.
	pub values: Vec<(String, i32)>,
}

impl EnumSpec {
	/// Enum without values.
	pub fn new(id: u32, name: &str) -> Self {
		Self {
			id,
			name: name.to_owned(),
			values: Vec::new(),
		}
	}

	/// Append a named value.
	pub fn value(mut self, name: &str, value: i32) -> Self {
		self.values.push((name.to_owned(), value));
		self
	}
}

/// Builder for `NTRO` block bodies.
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
	structs: Vec<StructSpec>,
	enums: Vec<EnumSpec>,
}

impl ManifestBuilder {
	/// Empty manifest.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a struct definition.
	pub fn structure(mut self, item: StructSpec) -> Self {
		self.structs.push(item);
		self
	}

	/// Append an enum definition.
	pub fn enumeration(mut self, item: EnumSpec) -> Self {
		self.enums.push(item);
		self
	}

	/// Lay out the block body.
	///
	/// Layout: version, struct table pair at +4, enum table pair at +12,
	/// 40-byte struct records, 24-byte field records, indirection bytes,
	/// 24-byte enum records, 8-byte enum values, then the string pool.
	pub fn build(&self) -> Vec<u8> {
		let mut w = ByteWriter::new();
		let mut strings = StringPool::default();

		w.u32(INTROSPECTION_VERSION);
		let struct_slot = w.rel_slot();
		w.u32(self.structs.len() as u32);
		let enum_slot = w.rel_slot();
		w.u32(self.enums.len() as u32);

		let mut field_slots = Vec::with_capacity(self.structs.len());
		if !self.structs.is_empty() {
			let here = w.pos();
			w.patch_rel(struct_slot, here);
		}
		for item in &self.structs {
			w.u32(INTROSPECTION_VERSION).u32(item.id);
			let name_slot = w.rel_slot();
			strings.push(name_slot, &item.name);
			w.u32(0).i32(0).u16(item.disk_size).u16(item.alignment).u32(item.base_id);
			let fields_slot = w.rel_slot();
			w.u32(item.fields.len() as u32);
			w.u8(item.flags).bytes(&[0; 3]);
			field_slots.push(fields_slot);
		}

		let mut indirection_slots = Vec::new();
		for (item, fields_slot) in self.structs.iter().zip(field_slots) {
			if item.fields.is_empty() {
				continue;
			}
			let here = w.pos();
			w.patch_rel(fields_slot, here);
			for field in &item.fields {
				let name_slot = w.rel_slot();
				strings.push(name_slot, &field.name);
				w.i16(field.count).i16(field.offset);
				let ind_slot = w.rel_slot();
				w.u32(field.indirections.len() as u32);
				w.u32(field.type_data).i16(field.type_code).bytes(&[0; 2]);
				if !field.indirections.is_empty() {
					indirection_slots.push((ind_slot, field.indirections.clone()));
				}
			}
		}

		for (slot, tags) in indirection_slots {
			let here = w.pos();
			w.patch_rel(slot, here);
			w.bytes(&tags);
		}
		w.align(4);

		let mut value_slots = Vec::with_capacity(self.enums.len());
		if !self.enums.is_empty() {
			let here = w.pos();
			w.patch_rel(enum_slot, here);
		}
		for item in &self.enums {
			w.u32(INTROSPECTION_VERSION).u32(item.id);
			let name_slot = w.rel_slot();
			strings.push(name_slot, &item.name);
			w.u32(0).i32(0);
			let values_slot = w.rel_slot();
			w.u32(item.values.len() as u32);
			value_slots.push(values_slot);
		}
		for (item, values_slot) in self.enums.iter().zip(value_slots) {
			if item.values.is_empty() {
				continue;
			}
			let here = w.pos();
			w.patch_rel(values_slot, here);
			for (name, value) in &item.values {
				let name_slot = w.rel_slot();
				strings.push(name_slot, name);
				w.i32(*value);
			}
		}

		strings.flush(&mut w);
		w.align(4);
		w.into_bytes()
	}
}
