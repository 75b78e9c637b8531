use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::resource::classify::classify_parts;
use crate::resource::decode::decode_data;
use crate::resource::{
	Block, BlockType, DecodeOptions, EditInfo, ExternalRefs, Manifest, ResourceError, ResourceHeader, ResourceType, Result,
	StructDefinition, Value, VertexBuffers, read_block_table,
};

/// An opened resource: owned bytes plus the block directory and eagerly parsed metadata.
#[derive(Debug, Clone)]
pub struct Resource {
	pub header: ResourceHeader,
	bytes: Vec<u8>,
	blocks: Vec<Block>,
	edit_info: Option<EditInfo>,
	manifest: Option<Manifest>,
	resource_type: ResourceType,
}

impl Resource {
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "opening resource");
		Self::from_bytes(fs::read(path)?)
	}

	/// Parse the header and block table, then edit info and manifest if present.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let header = ResourceHeader::parse(&bytes)?;
		let blocks = read_block_table(&bytes, &header)?;

		if header.file_size as usize != bytes.len() {
			tracing::warn!(declared = header.file_size, actual = bytes.len(), "declared file size does not match length");
		}

		let find = |ty: BlockType| blocks.iter().find(|block| block.block_type == ty);
		let edit_info = find(BlockType::REDI).map(|block| EditInfo::parse(&bytes, block)).transpose()?;
		let manifest = find(BlockType::NTRO).map(|block| Manifest::parse(&bytes, block)).transpose()?;
		let resource_type = classify_parts(edit_info.as_ref(), manifest.as_ref());
		tracing::debug!(blocks = blocks.len(), resource_type = %resource_type, "resource opened");

		Ok(Self {
			header,
			bytes,
			blocks,
			edit_info,
			manifest,
			resource_type,
		})
	}

	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	/// First block of `block_type` in table order.
	pub fn block(&self, block_type: BlockType) -> Option<&Block> {
		self.blocks.iter().find(|block| block.block_type == block_type)
	}

	/// Block at table position `index`, counting only non-empty entries.
	pub fn block_by_index(&self, index: usize) -> Option<&Block> {
		self.blocks.get(index)
	}

	/// Every block of `block_type`, in table order.
	pub fn blocks_of(&self, block_type: BlockType) -> impl Iterator<Item = &Block> + '_ {
		self.blocks.iter().filter(move |block| block.block_type == block_type)
	}

	/// Block of `block_type`, or `MissingBlock`.
	pub fn require_block(&self, block_type: BlockType) -> Result<&Block> {
		self.block(block_type).ok_or(ResourceError::MissingBlock {
			tag: block_type.as_str(),
		})
	}

	/// Raw body of a block, e.g. for KV3 blocks this crate leaves undecoded.
	pub fn block_payload(&self, block_type: BlockType) -> Result<&[u8]> {
		self.require_block(block_type)?.payload(&self.bytes)
	}

	/// Whether the declared file size equals the buffer length.
	pub fn file_size_matches(&self) -> bool {
		self.header.file_size as usize == self.bytes.len()
	}

	pub fn edit_info(&self) -> Option<&EditInfo> {
		self.edit_info.as_ref()
	}

	pub fn manifest(&self) -> Option<&Manifest> {
		self.manifest.as_ref()
	}

	pub fn resource_type(&self) -> ResourceType {
		self.resource_type
	}

	/// Parse the external reference list, if the resource has one.
	pub fn external_refs(&self) -> Result<Option<ExternalRefs>> {
		self.block(BlockType::RERL)
			.map(|block| ExternalRefs::parse(&self.bytes, block))
			.transpose()
	}

	/// Parse vertex/index buffer metadata, if the resource has any.
	pub fn vertex_buffers(&self) -> Result<Option<VertexBuffers>> {
		self.block(BlockType::VBIB)
			.map(|block| VertexBuffers::parse(&self.bytes, block))
			.transpose()
	}

	/// Decode the payload as the manifest's first struct.
	pub fn decode_data(&self, options: &DecodeOptions) -> Result<Value> {
		let manifest = self.require_manifest()?;
		let root = manifest.first_struct().ok_or_else(|| ResourceError::MissingStruct {
			name: "<first manifest struct>".to_owned(),
		})?;
		self.decode_root(manifest, root, options)
	}

	/// Decode the payload as the struct named `name`.
	pub fn decode_data_as(&self, name: &str, options: &DecodeOptions) -> Result<Value> {
		let manifest = self.require_manifest()?;
		let root = manifest
			.struct_by_name(name)
			.ok_or_else(|| ResourceError::MissingStruct { name: name.to_owned() })?;
		self.decode_root(manifest, root, options)
	}

	fn require_manifest(&self) -> Result<&Manifest> {
		self.manifest.as_ref().ok_or(ResourceError::MissingBlock {
			tag: BlockType::NTRO.as_str(),
		})
	}

	fn decode_root(&self, manifest: &Manifest, root: &StructDefinition, options: &DecodeOptions) -> Result<Value> {
		let data = self.require_block(BlockType::DATA)?;
		let refs = self.external_refs()?;
		decode_data(&self.bytes, data, manifest, refs.as_ref(), root, options)
	}

	/// Serializable overview of the container.
	pub fn summary(&self) -> ResourceSummary {
		ResourceSummary {
			file_size: self.header.file_size,
			actual_size: self.bytes.len(),
			header_version: self.header.header_version,
			payload_version: self.header.payload_version,
			resource_type: self.resource_type,
			blocks: self.blocks.clone(),
		}
	}
}

/// Header fields, inferred type and block directory of one resource.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSummary {
	pub file_size: u32,
	pub actual_size: usize,
	pub header_version: u16,
	pub payload_version: u16,
	pub resource_type: ResourceType,
	pub blocks: Vec<Block>,
}

#[cfg(test)]
mod tests;
