use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Decoded payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Null pointer or unresolved reference.
	Null,
	/// Storage that was intentionally not followed.
	Opaque,
	/// Boolean.
	Bool(bool),
	/// Any signed integer.
	I64(i64),
	/// Any unsigned integer.
	U64(u64),
	/// `f32`.
	F32(f32),
	/// `f64`.
	F64(f64),
	/// Text from a string offset.
	String(String),
	/// RGBA color.
	Color([u8; 4]),
	/// Two floats.
	Vector2([f32; 2]),
	/// Three floats, also used for angles.
	Vector3([f32; 3]),
	/// Four floats.
	Vector4([f32; 4]),
	/// Quaternion `x, y, z, w`.
	Quaternion([f32; 4]),
	/// Row-major 3x4 matrix.
	Matrix3x4([f32; 12]),
	/// Position, scale and orientation packed as eight floats.
	Transform([f32; 8]),
	/// External reference id with its resolved name, if any.
	ExternalRef {
		/// Referenced resource id.
		id: u64,
		/// Resource name from the reference list.
		name: Option<String>,
	},
	/// Enum value with its resolved name, if any.
	Enum {
		/// Raw stored value.
		raw: u32,
		/// Matching value name from the manifest.
		name: Option<String>,
	},
	/// Byte array.
	Bytes(Vec<u8>),
	/// Homogeneous sequence.
	Array(Vec<Value>),
	/// Struct instance.
	Struct(StructValue),
}

/// Decoded struct with fields in layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Manifest struct name.
	pub type_name: String,
	/// Field values, base fields first.
	pub fields: Vec<FieldValue>,
}

/// One named field of a [`StructValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: String,
	/// Decoded value.
	pub value: Value,
}

impl StructValue {
	/// Look up a field by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name == name).map(|field| &field.value)
	}
}

impl Value {
	/// Struct payload, if this is a struct.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Field of a struct value.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.as_struct().and_then(|item| item.get(name))
	}

	/// Integer view of numeric values.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(value) => Some(*value),
			Self::U64(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// String payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Array payload.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Short kind label used in listings.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Opaque => "opaque",
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Color(_) => "color",
			Self::Vector2(_) => "vector2",
			Self::Vector3(_) => "vector3",
			Self::Vector4(_) => "vector4",
			Self::Quaternion(_) => "quaternion",
			Self::Matrix3x4(_) => "matrix3x4",
			Self::Transform(_) => "transform",
			Self::ExternalRef { .. } => "external_ref",
			Self::Enum { .. } => "enum",
			Self::Bytes(_) => "bytes",
			Self::Array(_) => "array",
			Self::Struct(_) => "struct",
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_none(),
			Self::Opaque => serializer.serialize_str("<opaque>"),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::I64(value) => serializer.serialize_i64(*value),
			Self::U64(value) => serializer.serialize_u64(*value),
			Self::F32(value) => serializer.serialize_f32(*value),
			Self::F64(value) => serializer.serialize_f64(*value),
			Self::String(value) => serializer.serialize_str(value),
			Self::Color(rgba) => rgba.serialize(serializer),
			Self::Vector2(items) => items.serialize(serializer),
			Self::Vector3(items) => items.serialize(serializer),
			Self::Vector4(items) | Self::Quaternion(items) => items.serialize(serializer),
			Self::Matrix3x4(items) => items.as_slice().serialize(serializer),
			Self::Transform(items) => items.serialize(serializer),
			Self::ExternalRef { id, name } => {
				let mut out = serializer.serialize_struct("ExternalRef", 2)?;
				out.serialize_field("id", id)?;
				out.serialize_field("name", name)?;
				out.end()
			}
			Self::Enum { raw, name } => match name {
				Some(name) => serializer.serialize_str(name),
				None => serializer.serialize_u32(*raw),
			},
			Self::Bytes(bytes) => bytes.serialize(serializer),
			Self::Array(items) => items.serialize(serializer),
			Self::Struct(item) => item.serialize(serializer),
		}
	}
}

impl Serialize for StructValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut out = serializer.serialize_map(Some(self.fields.len()))?;
		for field in &self.fields {
			out.serialize_entry(&field.name, &field.value)?;
		}
		out.end()
	}
}
