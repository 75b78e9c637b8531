use crate::writer::ByteWriter;

/// Absolute position of the first block table entry written by [`ResourceBuilder`].
pub const BLOCK_TABLE_START: usize = 16;
/// Size of one block table entry.
pub const BLOCK_ENTRY_SIZE: usize = 12;

#[derive(Debug, Clone)]
struct BlockSpec {
	tag: [u8; 4],
	body: Vec<u8>,
	declared_size: Option<u32>,
}

/// Builder for whole resource files: header, block table, block bodies.
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
	file_size: Option<u32>,
	header_version: u16,
	payload_version: u16,
	blocks: Vec<BlockSpec>,
}

impl Default for ResourceBuilder {
	fn default() -> Self {
		Self {
			file_size: None,
			header_version: 12,
			payload_version: 0,
			blocks: Vec::new(),
		}
	}
}

impl ResourceBuilder {
	/// Header version 12, payload version 0, no blocks.
	pub fn new() -> Self {
		Self::default()
	}

	/// Override the declared file size (defaults to the real length).
	pub fn file_size(mut self, size: u32) -> Self {
		self.file_size = Some(size);
		self
	}

	/// Override the header version.
	pub fn header_version(mut self, version: u16) -> Self {
		self.header_version = version;
		self
	}

	/// Override the payload version.
	pub fn payload_version(mut self, version: u16) -> Self {
		self.payload_version = version;
		self
	}

	/// Append a block whose declared size is its body length.
	pub fn block(mut self, tag: &[u8; 4], body: Vec<u8>) -> Self {
		self.blocks.push(BlockSpec {
			tag: *tag,
			body,
			declared_size: None,
		});
		self
	}

	/// Append a block with an explicit declared size.
	pub fn block_with_size(mut self, tag: &[u8; 4], body: Vec<u8>, size: u32) -> Self {
		self.blocks.push(BlockSpec {
			tag: *tag,
			body,
			declared_size: Some(size),
		});
		self
	}

	/// Lay out the file.
	pub fn build(&self) -> Vec<u8> {
		let mut w = ByteWriter::new();
		w.u32(0).u16(self.header_version).u16(self.payload_version);
		let table_slot = w.rel_slot();
		w.u32(self.blocks.len() as u32);
		let here = w.pos();
		w.patch_rel(table_slot, here);

		let mut slots = Vec::with_capacity(self.blocks.len());
		for block in &self.blocks {
			w.bytes(&block.tag);
			slots.push(w.rel_slot());
			w.u32(block.declared_size.unwrap_or(block.body.len() as u32));
		}

		for (block, slot) in self.blocks.iter().zip(slots) {
			w.align(4);
			let here = w.pos();
			w.patch_rel(slot, here);
			w.bytes(&block.body);
		}

		let len = w.pos() as u32;
		w.patch_u32(0, self.file_size.unwrap_or(len));
		w.into_bytes()
	}
}
