use crate::resource::bytes::Cursor;
use crate::resource::value::{FieldValue, StructValue, Value};
use crate::resource::{
	Block, ExternalRefs, FieldDefinition, FieldType, Indirection, IndirectionKind, Manifest, ResourceError, Result,
	StructDefinition,
};

/// Limits applied while walking the payload graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
	/// Maximum nesting of structs and followed pointers.
	pub max_depth: u32,
	/// Maximum element count accepted for a single array.
	pub max_array_elems: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_array_elems: 1 << 20,
		}
	}
}

/// Decode the payload block starting at its first byte as an instance of `root`.
pub fn decode_data(
	bytes: &[u8],
	data: &Block,
	manifest: &Manifest,
	refs: Option<&ExternalRefs>,
	root: &StructDefinition,
	options: &DecodeOptions,
) -> Result<Value> {
	tracing::debug!(root = %root.name, offset = data.offset, size = data.size, "decoding payload");
	let ctx = DecodeContext::new(data.bounded(bytes), manifest, refs, *options);
	ctx.decode_struct_at(root, data.offset).map(Value::Struct)
}

/// Read-only view used to decode manifest-described values.
///
/// Positions are absolute in the resource buffer; `bytes` ends at the payload
/// block end, so every read past it surfaces as `TruncatedData`.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
	bytes: &'a [u8],
	manifest: &'a Manifest,
	refs: Option<&'a ExternalRefs>,
	options: DecodeOptions,
}

impl<'a> DecodeContext<'a> {
	/// Build a context over an already bounded buffer.
	pub fn new(bytes: &'a [u8], manifest: &'a Manifest, refs: Option<&'a ExternalRefs>, options: DecodeOptions) -> Self {
		Self {
			bytes,
			manifest,
			refs,
			options,
		}
	}

	/// Decode one struct whose first byte is at `offset`.
	pub fn decode_struct_at(&self, def: &StructDefinition, offset: usize) -> Result<StructValue> {
		self.decode_struct(def, offset, 0)
	}

	/// Decode one field of a struct that starts at `struct_offset`.
	pub fn decode_field(&self, field: &FieldDefinition, struct_offset: usize) -> Result<Value> {
		self.field_value(field, struct_offset, 0)
	}

	fn decode_struct(&self, def: &StructDefinition, offset: usize, depth: u32) -> Result<StructValue> {
		let depth = self.enter(depth)?;
		tracing::trace!(name = %def.name, offset, depth, "struct");

		let mut fields = Vec::with_capacity(def.fields.len());
		for field in self.manifest.layout(def.id) {
			fields.push(FieldValue {
				name: field.name.clone(),
				value: self.field_value(field, offset, depth)?,
			});
		}

		Ok(StructValue {
			type_name: def.name.clone(),
			fields,
		})
	}

	fn field_value(&self, field: &FieldDefinition, struct_offset: usize, depth: u32) -> Result<Value> {
		let at = struct_offset.checked_add(field.on_disk_offset).ok_or(ResourceError::TruncatedData {
			at: struct_offset,
			need: field.on_disk_offset,
			available: 0,
		})?;

		let chain = field
			.indirections
			.iter()
			.map(|code| {
				Indirection::from_code(*code).ok_or_else(|| ResourceError::UnsupportedIndirection {
					code: *code,
					field: field.name.clone(),
				})
			})
			.collect::<Result<Vec<_>>>()?;

		if field.count > 1 {
			return self.elements(&chain, field, at, usize::from(field.count), depth);
		}
		self.chained(&chain, field, at, depth)
	}

	fn chained(&self, chain: &[Indirection], field: &FieldDefinition, at: usize, depth: u32) -> Result<Value> {
		let Some((step, rest)) = chain.split_first() else {
			return self.scalar(field, at, depth);
		};

		let mut cursor = Cursor::at(self.bytes, at);
		match step.kind() {
			IndirectionKind::Skip => Ok(Value::Opaque),
			IndirectionKind::Pointer => {
				let (raw, target) = cursor.read_rel_offset()?;
				if raw == 0 {
					return Ok(Value::Null);
				}
				let depth = self.enter(depth)?;
				self.chained(rest, field, target, depth)
			}
			IndirectionKind::Array => {
				let (start, count) = cursor.read_table()?;
				self.elements(rest, field, start, count, depth)
			}
		}
	}

	fn elements(&self, chain: &[Indirection], field: &FieldDefinition, start: usize, count: usize, depth: u32) -> Result<Value> {
		if count > self.options.max_array_elems {
			return Err(ResourceError::DecodeArrayTooLarge {
				count,
				max: self.options.max_array_elems,
			});
		}

		let bytes_only = chain.is_empty() && field.field_type() == Some(FieldType::Byte);
		if count == 0 {
			return Ok(if bytes_only { Value::Bytes(Vec::new()) } else { Value::Array(Vec::new()) });
		}

		let mut cursor = Cursor::at(self.bytes, start);
		if bytes_only {
			return Ok(Value::Bytes(cursor.read_exact(count)?.to_vec()));
		}

		let stride = match chain.first() {
			Some(step) => step.storage_size(),
			None => self.scalar_width(field)?,
		};
		if stride == 0 {
			return Err(ResourceError::MalformedManifest {
				at: start,
				reason: format!("array field {} has zero-width elements", field.name),
			});
		}
		cursor.check_span(start, count, stride)?;

		let mut items = Vec::with_capacity(count);
		for index in 0..count {
			items.push(self.chained(chain, field, start + index * stride, depth)?);
		}
		Ok(Value::Array(items))
	}

	fn enter(&self, depth: u32) -> Result<u32> {
		if depth >= self.options.max_depth {
			return Err(ResourceError::DecodeDepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		Ok(depth + 1)
	}

	fn field_type(&self, field: &FieldDefinition) -> Result<FieldType> {
		field.field_type().ok_or_else(|| ResourceError::UnsupportedType {
			code: field.type_code,
			field: field.name.clone(),
		})
	}

	fn struct_for(&self, field: &FieldDefinition) -> Result<&'a StructDefinition> {
		self.manifest
			.struct_by_id(field.type_data)
			.ok_or_else(|| ResourceError::MissingStruct {
				name: format!("0x{:08x} (field {})", field.type_data, field.name),
			})
	}

	fn scalar_width(&self, field: &FieldDefinition) -> Result<usize> {
		let ty = self.field_type(field)?;
		match ty.fixed_size() {
			Some(size) => Ok(size),
			None => Ok(usize::from(self.struct_for(field)?.disk_size)),
		}
	}

	fn scalar(&self, field: &FieldDefinition, at: usize, depth: u32) -> Result<Value> {
		let ty = self.field_type(field)?;
		let mut cursor = Cursor::at(self.bytes, at);

		Ok(match ty {
			FieldType::Struct => {
				let def = self.struct_for(field)?;
				Value::Struct(self.decode_struct(def, at, depth)?)
			}
			FieldType::Enum => {
				let raw = cursor.read_u32_le()?;
				let name = self
					.manifest
					.enum_by_id(field.type_data)
					.and_then(|def| def.name_of(raw))
					.map(str::to_owned);
				Value::Enum { raw, name }
			}
			FieldType::ExternalReference => {
				let id = cursor.read_u64_le()?;
				if id == 0 {
					Value::Null
				} else {
					let name = self.refs.and_then(|refs| refs.name_of(id)).map(str::to_owned);
					Value::ExternalRef { id, name }
				}
			}
			FieldType::Char | FieldType::ResourceString => Value::String(cursor.read_offset_string()?.unwrap_or_default()),
			FieldType::SByte => Value::I64(i64::from(cursor.read_i8()?)),
			FieldType::Byte => Value::U64(u64::from(cursor.read_u8()?)),
			FieldType::Int16 => Value::I64(i64::from(cursor.read_i16_le()?)),
			FieldType::UInt16 => Value::U64(u64::from(cursor.read_u16_le()?)),
			FieldType::Int32 => Value::I64(i64::from(cursor.read_i32_le()?)),
			FieldType::UInt32 => Value::U64(u64::from(cursor.read_u32_le()?)),
			FieldType::Int64 => Value::I64(cursor.read_i64_le()?),
			FieldType::UInt64 => Value::U64(cursor.read_u64_le()?),
			FieldType::Float => Value::F32(cursor.read_f32_le()?),
			FieldType::Float64 => Value::F64(cursor.read_f64_le()?),
			FieldType::Vector2D => Value::Vector2(cursor.read_f32s()?),
			FieldType::Vector3D | FieldType::QAngle => Value::Vector3(cursor.read_f32s()?),
			FieldType::Vector4D | FieldType::Fltx4 | FieldType::FourVectors => Value::Vector4(cursor.read_f32s()?),
			FieldType::Quaternion => Value::Quaternion(cursor.read_f32s()?),
			FieldType::Color => Value::Color(cursor.read_code4()?),
			FieldType::Boolean => Value::Bool(cursor.read_u8()? != 0),
			FieldType::Matrix3x4 | FieldType::Matrix3x4a => Value::Matrix3x4(cursor.read_f32s()?),
			FieldType::Transform => Value::Transform(cursor.read_f32s()?),
		})
	}
}
