use serde::Serialize;

/// Addressing step applied before a field's scalar values are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Indirection {
	/// Raw pointer.
	Pointer,
	/// Reference, stored like a pointer.
	Reference,
	/// Relative pointer inside the resource.
	ResourcePointer,
	/// Relative `(offset, count)` array inside the resource.
	ResourceArray,
	/// Growable vector, stored like a resource array.
	UtlVector,
	/// Reference handle that cannot be followed on disk.
	UtlReference,
	/// Storage the compiler marked as skippable.
	Ignorable,
	/// Storage whose type is only known at runtime.
	Opaque,
}

/// How an indirection step is unwound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndirectionKind {
	/// Four-byte relative offset, `0` is null.
	Pointer,
	/// Four-byte relative offset followed by a four-byte count.
	Array,
	/// Not followed; decodes to a sentinel.
	Skip,
}

impl Indirection {
	/// Decode a raw manifest tag.
	pub fn from_code(code: u8) -> Option<Self> {
		Some(match code {
			1 => Self::Pointer,
			2 => Self::Reference,
			3 => Self::ResourcePointer,
			4 => Self::ResourceArray,
			5 => Self::UtlVector,
			6 => Self::UtlReference,
			7 => Self::Ignorable,
			8 => Self::Opaque,
			_ => return None,
		})
	}

	/// Raw manifest tag.
	pub fn code(self) -> u8 {
		match self {
			Self::Pointer => 1,
			Self::Reference => 2,
			Self::ResourcePointer => 3,
			Self::ResourceArray => 4,
			Self::UtlVector => 5,
			Self::UtlReference => 6,
			Self::Ignorable => 7,
			Self::Opaque => 8,
		}
	}

	/// Unwinding behavior.
	pub fn kind(self) -> IndirectionKind {
		match self {
			Self::Pointer | Self::Reference | Self::ResourcePointer => IndirectionKind::Pointer,
			Self::ResourceArray | Self::UtlVector => IndirectionKind::Array,
			Self::UtlReference | Self::Ignorable | Self::Opaque => IndirectionKind::Skip,
		}
	}

	/// Bytes one step of this indirection occupies in its parent.
	pub fn storage_size(self) -> usize {
		match self.kind() {
			IndirectionKind::Pointer | IndirectionKind::Skip => 4,
			IndirectionKind::Array => 8,
		}
	}
}

/// Scalar type of a manifest field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
	/// Nested struct, id in type data.
	Struct,
	/// Enum value, id in type data.
	Enum,
	/// `u64` id into the external reference list.
	ExternalReference,
	/// Relative string offset.
	Char,
	/// `i8`.
	SByte,
	/// `u8`.
	Byte,
	/// `i16`.
	Int16,
	/// `u16`.
	UInt16,
	/// `i32`.
	Int32,
	/// `u32`.
	UInt32,
	/// `i64`.
	Int64,
	/// `u64`.
	UInt64,
	/// `f32`.
	Float,
	/// `f64`.
	Float64,
	/// Two `f32`.
	Vector2D,
	/// Three `f32`.
	Vector3D,
	/// Four `f32`.
	Vector4D,
	/// Three `f32` euler angles.
	QAngle,
	/// Four `f32`.
	Quaternion,
	/// Four packed `f32`.
	Fltx4,
	/// RGBA bytes.
	Color,
	/// One byte, non-zero is true.
	Boolean,
	/// Relative string offset naming a resource.
	ResourceString,
	/// Twelve `f32`, row-major 3x4.
	Matrix3x4,
	/// Aligned [`FieldType::Matrix3x4`].
	Matrix3x4a,
	/// Eight `f32`: position, scale, orientation.
	Transform,
	/// Four `f32`.
	FourVectors,
}

impl FieldType {
	/// Decode a raw manifest type code.
	pub fn from_code(code: i16) -> Option<Self> {
		Some(match code {
			1 => Self::Struct,
			2 => Self::Enum,
			3 => Self::ExternalReference,
			4 => Self::Char,
			10 => Self::SByte,
			11 => Self::Byte,
			12 => Self::Int16,
			13 => Self::UInt16,
			14 => Self::Int32,
			15 => Self::UInt32,
			16 => Self::Int64,
			17 => Self::UInt64,
			18 => Self::Float,
			19 => Self::Float64,
			21 => Self::Vector2D,
			22 => Self::Vector3D,
			23 => Self::Vector4D,
			24 => Self::QAngle,
			25 => Self::Quaternion,
			27 => Self::Fltx4,
			28 => Self::Color,
			30 => Self::Boolean,
			31 => Self::ResourceString,
			33 => Self::Matrix3x4,
			36 => Self::Matrix3x4a,
			40 => Self::Transform,
			44 => Self::FourVectors,
			_ => return None,
		})
	}

	/// Raw manifest type code.
	pub fn code(self) -> i16 {
		match self {
			Self::Struct => 1,
			Self::Enum => 2,
			Self::ExternalReference => 3,
			Self::Char => 4,
			Self::SByte => 10,
			Self::Byte => 11,
			Self::Int16 => 12,
			Self::UInt16 => 13,
			Self::Int32 => 14,
			Self::UInt32 => 15,
			Self::Int64 => 16,
			Self::UInt64 => 17,
			Self::Float => 18,
			Self::Float64 => 19,
			Self::Vector2D => 21,
			Self::Vector3D => 22,
			Self::Vector4D => 23,
			Self::QAngle => 24,
			Self::Quaternion => 25,
			Self::Fltx4 => 27,
			Self::Color => 28,
			Self::Boolean => 30,
			Self::ResourceString => 31,
			Self::Matrix3x4 => 33,
			Self::Matrix3x4a => 36,
			Self::Transform => 40,
			Self::FourVectors => 44,
		}
	}

	/// Inline width in bytes. `None` for structs, whose width is their disk size.
	pub fn fixed_size(self) -> Option<usize> {
		Some(match self {
			Self::Struct => return None,
			Self::SByte | Self::Byte | Self::Boolean => 1,
			Self::Int16 | Self::UInt16 => 2,
			Self::Enum | Self::Char | Self::ResourceString | Self::Int32 | Self::UInt32 | Self::Float | Self::Color => 4,
			Self::ExternalReference | Self::Int64 | Self::UInt64 | Self::Float64 | Self::Vector2D => 8,
			Self::Vector3D | Self::QAngle => 12,
			Self::Vector4D | Self::Quaternion | Self::Fltx4 | Self::FourVectors => 16,
			Self::Transform => 32,
			Self::Matrix3x4 | Self::Matrix3x4a => 48,
		})
	}
}
