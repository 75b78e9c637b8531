use serde::Serialize;

use crate::resource::bytes::Cursor;
use crate::resource::{Block, ResourceError, Result};

const BUFFER_HEADER_SIZE: usize = 24;
const ATTRIBUTE_SIZE: usize = 56;
const SEMANTIC_NAME_SIZE: usize = 32;

/// One vertex attribute of a vertex buffer layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexAttribute {
	/// Semantic name such as `POSITION` or `TEXCOORD`.
	pub semantic_name: String,
	/// Semantic index.
	pub semantic_index: i32,
	/// Raw DXGI format code.
	pub format: u32,
	/// Byte offset inside one vertex.
	pub offset: u32,
	/// Input slot.
	pub slot: i32,
	/// Input slot class.
	pub slot_type: u32,
	/// Instance step rate.
	pub instance_step_rate: i32,
}

/// Buffer header plus a view of its (possibly compressed) data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferView {
	/// Number of elements.
	pub element_count: u32,
	/// Size of one element.
	pub element_size: u32,
	/// Vertex layout; empty for index buffers.
	pub attributes: Vec<VertexAttribute>,
	/// Absolute start of the buffer data.
	pub data_offset: usize,
	/// Stored data size.
	pub data_size: usize,
}

impl BufferView {
	/// Stored data bytes, not decompressed.
	pub fn data<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8]> {
		let mut cursor = Cursor::at(bytes, self.data_offset);
		cursor.read_exact(self.data_size)
	}

	/// Whether the stored size differs from `element_count * element_size`.
	pub fn is_compressed(&self) -> bool {
		u64::from(self.element_count) * u64::from(self.element_size) != self.data_size as u64
	}
}

/// Vertex and index buffer metadata (`VBIB` block).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VertexBuffers {
	/// Vertex buffers in block order.
	pub vertex_buffers: Vec<BufferView>,
	/// Index buffers in block order.
	pub index_buffers: Vec<BufferView>,
}

impl VertexBuffers {
	/// Parse the buffer metadata block.
	pub fn parse(bytes: &[u8], block: &Block) -> Result<Self> {
		let mut cursor = Cursor::at(bytes, block.offset);
		let vertex = cursor.read_table()?;
		let index = cursor.read_table()?;

		let buffers = Self {
			vertex_buffers: read_buffers(bytes, vertex)?,
			index_buffers: read_buffers(bytes, index)?,
		};
		tracing::debug!(
			vertex = buffers.vertex_buffers.len(),
			index = buffers.index_buffers.len(),
			"buffer metadata parsed"
		);
		Ok(buffers)
	}
}

fn read_buffers(bytes: &[u8], (start, count): (usize, usize)) -> Result<Vec<BufferView>> {
	if count == 0 {
		return Ok(Vec::new());
	}

	let mut cursor = Cursor::at(bytes, start);
	cursor.check_span(start, count, BUFFER_HEADER_SIZE)?;
	let mut out = Vec::with_capacity(count);
	for _ in 0..count {
		let element_count = cursor.read_u32_le()?;
		let element_size = cursor.read_u32_le()?;
		let attributes = read_attributes(bytes, cursor.read_table()?)?;
		let (data_offset, data_size) = cursor.read_table()?;
		out.push(BufferView {
			element_count,
			element_size,
			attributes,
			data_offset,
			data_size,
		});
	}
	Ok(out)
}

fn read_attributes(bytes: &[u8], (start, count): (usize, usize)) -> Result<Vec<VertexAttribute>> {
	if count == 0 {
		return Ok(Vec::new());
	}

	let mut cursor = Cursor::at(bytes, start);
	cursor.check_span(start, count, ATTRIBUTE_SIZE)?;
	let mut out = Vec::with_capacity(count);
	for _ in 0..count {
		let name_at = cursor.pos();
		let raw = cursor.read_exact(SEMANTIC_NAME_SIZE)?;
		let end = raw.iter().position(|byte| *byte == 0).unwrap_or(raw.len());
		let semantic_name = std::str::from_utf8(&raw[..end])
			.map_err(|_| ResourceError::InvalidString { at: name_at })?
			.to_owned();

		out.push(VertexAttribute {
			semantic_name,
			semantic_index: cursor.read_i32_le()?,
			format: cursor.read_u32_le()?,
			offset: cursor.read_u32_le()?,
			slot: cursor.read_i32_le()?,
			slot_type: cursor.read_u32_le()?,
			instance_step_rate: cursor.read_i32_le()?,
		});
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use resdoc_testkit::{ByteWriter, ResourceBuilder};

	use super::VertexBuffers;
	use crate::resource::{ResourceError, ResourceHeader, Result, read_block_table};

	fn semantic(name: &str) -> [u8; 32] {
		let mut out = [0_u8; 32];
		out[..name.len()].copy_from_slice(name.as_bytes());
		out
	}

	fn sample_body() -> Vec<u8> {
		let mut w = ByteWriter::new();
		let vertex = w.rel_slot();
		w.u32(1);
		let index = w.rel_slot();
		w.u32(1);

		let here = w.pos();
		w.patch_rel(vertex, here);
		w.u32(3).u32(12);
		let attributes = w.rel_slot();
		w.u32(1);
		let vertex_data = w.rel_slot();
		w.u32(36);

		let here = w.pos();
		w.patch_rel(index, here);
		w.u32(3).u32(2);
		w.u32(0).u32(0);
		let index_data = w.rel_slot();
		w.u32(6);

		let here = w.pos();
		w.patch_rel(attributes, here);
		w.bytes(&semantic("POSITION")).i32(0).u32(6).u32(0).i32(0).u32(0).i32(0);

		let here = w.pos();
		w.patch_rel(vertex_data, here);
		for value in 0..9 {
			w.f32(value as f32);
		}
		let here = w.pos();
		w.patch_rel(index_data, here);
		w.u16(0).u16(1).u16(2);
		w.into_bytes()
	}

	fn parse(body: Vec<u8>) -> Result<(Vec<u8>, VertexBuffers)> {
		let bytes = ResourceBuilder::new().block(b"VBIB", body).build();
		let header = ResourceHeader::parse(&bytes)?;
		let blocks = read_block_table(&bytes, &header)?;
		let buffers = VertexBuffers::parse(&bytes, &blocks[0])?;
		Ok((bytes, buffers))
	}

	#[test]
	fn reads_vertex_and_index_headers() {
		let (bytes, buffers) = parse(sample_body()).expect("buffers parse");

		assert_eq!(buffers.vertex_buffers.len(), 1);
		let vertex = &buffers.vertex_buffers[0];
		assert_eq!(vertex.element_count, 3);
		assert_eq!(vertex.element_size, 12);
		assert_eq!(vertex.attributes.len(), 1);
		assert_eq!(vertex.attributes[0].semantic_name, "POSITION");
		assert_eq!(vertex.attributes[0].format, 6);
		assert!(!vertex.is_compressed());
		assert_eq!(vertex.data(&bytes).expect("vertex data").len(), 36);

		let index = &buffers.index_buffers[0];
		assert!(index.attributes.is_empty());
		assert_eq!(index.data(&bytes).expect("index data"), &[0, 0, 1, 0, 2, 0]);
	}

	#[test]
	fn oversized_attribute_table_is_truncated() {
		let mut body = sample_body();
		// Attribute count of the first vertex buffer header.
		body[28..32].copy_from_slice(&5000_u32.to_le_bytes());
		let err = parse(body).expect_err("attributes do not fit");
		assert!(matches!(err, ResourceError::TruncatedData { .. }));
	}
}
