use serde::Serialize;

use crate::resource::bytes::Cursor;
use crate::resource::{ResourceError, Result};

/// Leading magic of archive directory files (`.vpk`).
pub const ARCHIVE_MAGIC: u32 = 0x55AA_1234;
/// Leading magic of compiled shader containers (`vcs2`).
pub const SHADER_MAGIC: u32 = 0x3273_6376;

/// Parsed resource container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceHeader {
	/// File size recorded by the compiler. Can disagree with the real length.
	pub file_size: u32,
	/// Container header version, always [`ResourceHeader::KNOWN_VERSION`].
	pub header_version: u16,
	/// Payload version, passed through uninterpreted.
	pub payload_version: u16,
	/// Absolute position of the first block table entry.
	pub block_table_offset: usize,
	/// Number of block table entries.
	pub block_count: u32,
}

impl ResourceHeader {
	/// The only header version this reader understands.
	pub const KNOWN_VERSION: u16 = 12;
	/// Fixed header size in bytes.
	pub const SIZE: usize = 16;

	/// Parse a header from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);

		let file_size = cursor.read_u32_le()?;
		match file_size {
			ARCHIVE_MAGIC => {
				return Err(ResourceError::WrongFileKind {
					kind: "archive directory",
					magic: file_size,
				});
			}
			SHADER_MAGIC => {
				return Err(ResourceError::WrongFileKind {
					kind: "compiled shader",
					magic: file_size,
				});
			}
			_ => {}
		}

		let header_version = cursor.read_u16_le()?;
		if header_version != Self::KNOWN_VERSION {
			return Err(ResourceError::UnexpectedMagic {
				field: "header_version",
				value: u32::from(header_version),
				expected: u32::from(Self::KNOWN_VERSION),
			});
		}

		let payload_version = cursor.read_u16_le()?;
		let (_, block_table_offset) = cursor.read_rel_offset()?;
		let block_count = cursor.read_u32_le()?;

		Ok(Self {
			file_size,
			header_version,
			payload_version,
			block_table_offset,
			block_count,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{ARCHIVE_MAGIC, ResourceHeader, SHADER_MAGIC};
	use crate::resource::ResourceError;

	fn header_bytes(file_size: u32, header_version: u16) -> Vec<u8> {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&file_size.to_le_bytes());
		bytes.extend_from_slice(&header_version.to_le_bytes());
		bytes.extend_from_slice(&3_u16.to_le_bytes());
		bytes.extend_from_slice(&8_u32.to_le_bytes());
		bytes.extend_from_slice(&2_u32.to_le_bytes());
		bytes
	}

	#[test]
	fn parses_known_header() {
		let header = ResourceHeader::parse(&header_bytes(64, 12)).expect("header parses");
		assert_eq!(header.file_size, 64);
		assert_eq!(header.header_version, 12);
		assert_eq!(header.payload_version, 3);
		assert_eq!(header.block_table_offset, 20);
		assert_eq!(header.block_count, 2);
	}

	#[test]
	fn rejects_every_other_header_version() {
		for version in [0_u16, 1, 11, 13, 255, 0x0c00, u16::MAX] {
			let err = ResourceHeader::parse(&header_bytes(64, version)).expect_err("version should fail");
			match err {
				ResourceError::UnexpectedMagic { field, value, expected } => {
					assert_eq!(field, "header_version");
					assert_eq!(value, u32::from(version));
					assert_eq!(expected, 12);
				}
				other => panic!("unexpected error for version {version}: {other}"),
			}
		}
	}

	#[test]
	fn rejects_archive_and_shader_files_by_magic() {
		let err = ResourceHeader::parse(&header_bytes(ARCHIVE_MAGIC, 12)).expect_err("archive rejected");
		assert!(matches!(err, ResourceError::WrongFileKind { kind: "archive directory", .. }));

		let err = ResourceHeader::parse(b"vcs2\x40\x00\x00\x00").expect_err("shader rejected");
		assert!(matches!(err, ResourceError::WrongFileKind { magic: SHADER_MAGIC, .. }));
	}

	#[test]
	fn short_header_is_truncated() {
		let err = ResourceHeader::parse(&header_bytes(64, 12)[..10]).expect_err("short header");
		assert!(matches!(err, ResourceError::TruncatedData { .. }));
	}
}
