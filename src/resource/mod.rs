mod block;
mod bytes;
mod classify;
mod decode;
mod edit_info;
mod error;
mod file;
mod header;
mod manifest;
mod refs;
mod schema;
mod vbib;
mod value;

/// Block directory types and the table reader.
pub use block::{Block, BlockType, read_block_table};
/// Bounded little-endian cursor with relative-offset helpers.
pub use bytes::Cursor;
/// Resource type inference.
pub use classify::{ResourceType, classify, classify_parts, type_from_compiler};
/// Manifest-driven decoding entry points and options.
pub use decode::{DecodeContext, DecodeOptions, decode_data};
/// Legacy edit info records.
pub use edit_info::{
	AdditionalRelatedFile, ArgumentDependency, ChildResource, EditInfo, ExtraFloat, ExtraInt, ExtraString, InputDependency,
	SpecialDependency,
};
/// Error and result aliases.
pub use error::{ResourceError, Result};
/// Opened resource container.
pub use file::{Resource, ResourceSummary};
/// Container header and foreign magic numbers.
pub use header::{ARCHIVE_MAGIC, ResourceHeader, SHADER_MAGIC};
/// Introspection manifest schema.
pub use manifest::{EnumDefinition, EnumValue, FieldDefinition, Manifest, StructDefinition};
/// External reference list.
pub use refs::{ExternalReference, ExternalRefs};
/// Indirection and scalar type codes.
pub use schema::{FieldType, Indirection, IndirectionKind};
/// Vertex and index buffer metadata.
pub use vbib::{BufferView, VertexAttribute, VertexBuffers};
/// Decoded value tree.
pub use value::{FieldValue, StructValue, Value};
