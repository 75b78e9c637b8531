use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Errors produced while reading, classifying, and decoding compiled resources.
#[derive(Debug, Error)]
pub enum ResourceError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input is a different file kind that shares no layout with resources.
	#[error("not a compiled resource: looks like {kind} (magic=0x{magic:08x})")]
	WrongFileKind {
		/// Human-readable file kind.
		kind: &'static str,
		/// Leading `u32` of the input.
		magic: u32,
	},
	/// A header field did not hold its single accepted value.
	#[error("unexpected {field}: got {value}, expected {expected}")]
	UnexpectedMagic {
		/// Header field name.
		field: &'static str,
		/// Offending value.
		value: u32,
		/// Accepted value.
		expected: u32,
	},
	/// Block tag outside the fixed tag set.
	#[error("unrecognized block type {tag:?}")]
	UnrecognizedBlockType {
		/// Raw four-byte tag.
		tag: [u8; 4],
	},
	/// The same block tag appeared twice in the block table.
	#[error("duplicate block {tag}")]
	DuplicateBlock {
		/// Block tag label.
		tag: &'static str,
	},
	/// Manifest offset, count, or reference points outside the buffer.
	#[error("malformed manifest at {at}: {reason}")]
	MalformedManifest {
		/// Absolute offset where the problem was detected.
		at: usize,
		/// Short description.
		reason: String,
	},
	/// A read ran past the block end or buffer end.
	#[error("truncated data at offset {at}, need {need} bytes, available {available}")]
	TruncatedData {
		/// Absolute offset of the attempted read.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes available before the bound.
		available: usize,
	},
	/// Indirection tag outside the known set.
	#[error("unsupported indirection {code} on field {field}")]
	UnsupportedIndirection {
		/// Raw indirection tag.
		code: u8,
		/// Field name.
		field: String,
	},
	/// Field type code outside the decodable set.
	#[error("unsupported field type {code} on field {field}")]
	UnsupportedType {
		/// Raw type code.
		code: i16,
		/// Field name.
		field: String,
	},
	/// A struct id referenced by a field or request is not in the manifest.
	#[error("struct not found in manifest: {name}")]
	MissingStruct {
		/// Struct id or name being looked up.
		name: String,
	},
	/// A block the operation needs is absent.
	#[error("block not found: {tag}")]
	MissingBlock {
		/// Block tag label.
		tag: &'static str,
	},
	/// Edit info content that this reader cannot represent.
	#[error("invalid edit info: {reason}")]
	InvalidEditInfo {
		/// Short description.
		reason: String,
	},
	/// String bytes were not valid UTF-8.
	#[error("invalid utf-8 string at offset {at}")]
	InvalidString {
		/// Absolute offset of the string start.
		at: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Requested decode array length exceeded configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	DecodeArrayTooLarge {
		/// Requested array length.
		count: usize,
		/// Maximum permitted array length.
		max: usize,
	},
	/// CLI block tag argument was invalid.
	#[error("invalid block code: {code}")]
	InvalidBlockCode {
		/// User-provided code string.
		code: String,
	},
}
