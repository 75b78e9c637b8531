use std::fmt;

use serde::{Serialize, Serializer};

use crate::resource::bytes::Cursor;
use crate::resource::{ResourceError, ResourceHeader, Result};

macro_rules! block_types {
	($($variant:ident => $tag:literal, $doc:literal;)+) => {
		/// Closed set of block tags a resource can carry.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum BlockType {
			$(
				#[doc = $doc]
				$variant,
			)+
		}

		impl BlockType {
			/// Every known block type, in declaration order.
			pub const ALL: &'static [BlockType] = &[$(BlockType::$variant),+];

			/// Map a raw four-byte tag to its block type.
			pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
				match &tag {
					$($tag => Some(Self::$variant),)+
					_ => None,
				}
			}

			/// Raw four-byte tag.
			pub fn tag(self) -> [u8; 4] {
				match self {
					$(Self::$variant => *$tag,)+
				}
			}

			/// Tag as a static label.
			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => stringify!($variant),)+
				}
			}
		}
	};
}

block_types! {
	RERL => b"RERL", "External resource reference list.";
	REDI => b"REDI", "Legacy edit info: compiler provenance and dependencies.";
	RED2 => b"RED2", "Edit info stored as KV3.";
	NTRO => b"NTRO", "Introspection manifest: struct and enum schema.";
	DATA => b"DATA", "Primary payload.";
	VBIB => b"VBIB", "Vertex and index buffer metadata.";
	VXVS => b"VXVS", "Voxel visibility.";
	SNAP => b"SNAP", "Particle snapshot.";
	CTRL => b"CTRL", "Control data (KV3).";
	MDAT => b"MDAT", "Mesh data.";
	MRPH => b"MRPH", "Morph data.";
	MBUF => b"MBUF", "Mesh buffers.";
	ANIM => b"ANIM", "Animation data.";
	ASEQ => b"ASEQ", "Animation sequence group.";
	AGRP => b"AGRP", "Animation group.";
	PHYS => b"PHYS", "Physics aggregate data.";
	INSG => b"INSG", "Input signature.";
	SrMa => b"SrMa", "Source map.";
	LaCo => b"LaCo", "Layout content.";
	STAT => b"STAT", "Script statistics.";
	SPRV => b"SPRV", "SPIR-V shader.";
	FLCI => b"FLCI", "File/line/column information.";
	DSTF => b"DSTF", "Distance field.";
	TBUF => b"TBUF", "Tools vertex buffer.";
	MVTX => b"MVTX", "Mesh vertex buffer.";
	MIDX => b"MIDX", "Mesh index buffer.";
}

impl BlockType {
	/// Tags a resource may carry at most once. Mesh and morph blocks repeat and are
	/// addressed by table position instead.
	pub fn is_single_instance(self) -> bool {
		matches!(self, Self::RERL | Self::REDI | Self::RED2 | Self::NTRO | Self::DATA)
	}
}

impl fmt::Display for BlockType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for BlockType {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// One block table entry: a typed view into the shared resource buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Block {
	/// Block type from the tag.
	pub block_type: BlockType,
	/// Absolute start of the block body.
	pub offset: usize,
	/// Declared body size.
	pub size: usize,
}

impl Block {
	/// Absolute end of the declared body.
	pub fn end(&self) -> usize {
		self.offset.saturating_add(self.size)
	}

	/// Body bytes, or `TruncatedData` when the declared range exceeds the buffer.
	pub fn payload<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8]> {
		bytes.get(self.offset..self.end()).ok_or(ResourceError::TruncatedData {
			at: self.offset,
			need: self.size,
			available: bytes.len().saturating_sub(self.offset),
		})
	}

	/// Buffer prefix ending at the block end, keeping absolute positions valid.
	pub fn bounded<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
		&bytes[..self.end().min(bytes.len())]
	}
}

/// Read the block table described by `header`.
///
/// Entries with a zero size are skipped and unknown tags fail. Repeated tags are
/// kept in table order, except single-instance tags which fail with `DuplicateBlock`.
pub fn read_block_table(bytes: &[u8], header: &ResourceHeader) -> Result<Vec<Block>> {
	const ENTRY_SIZE: usize = 12;

	let count = header.block_count as usize;
	let mut cursor = Cursor::new(bytes);
	cursor.check_span(header.block_table_offset, count, ENTRY_SIZE)?;
	cursor.seek(header.block_table_offset)?;

	let mut blocks: Vec<Block> = Vec::with_capacity(count);
	for _ in 0..count {
		let tag = cursor.read_code4()?;
		let block_type = BlockType::from_tag(tag).ok_or(ResourceError::UnrecognizedBlockType { tag })?;
		let (_, offset) = cursor.read_rel_offset()?;
		let size = cursor.read_u32_le()? as usize;

		if size == 0 {
			tracing::trace!(tag = %block_type, "skipping empty block");
			continue;
		}
		if block_type.is_single_instance() && blocks.iter().any(|block| block.block_type == block_type) {
			return Err(ResourceError::DuplicateBlock { tag: block_type.as_str() });
		}

		tracing::debug!(tag = %block_type, offset, size, "block");
		blocks.push(Block { block_type, offset, size });
	}

	Ok(blocks)
}

#[cfg(test)]
mod tests;
