use resdoc_testkit::{BLOCK_ENTRY_SIZE, BLOCK_TABLE_START, ResourceBuilder};

use crate::resource::{BlockType, ResourceError, ResourceHeader, read_block_table};

fn read_u32(bytes: &[u8], at: usize) -> u32 {
	u32::from_le_bytes(bytes[at..at + 4].try_into().expect("four bytes"))
}

#[test]
fn resolves_every_entry_from_its_offset_field() {
	let bytes = ResourceBuilder::new()
		.block(b"RERL", vec![0; 8])
		.block(b"NTRO", vec![1; 20])
		.block(b"DATA", vec![2; 6])
		.block(b"VBIB", vec![3; 16])
		.build();
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let blocks = read_block_table(&bytes, &header).expect("table parses");

	assert_eq!(blocks.len(), 4);
	for (index, block) in blocks.iter().enumerate() {
		let field = BLOCK_TABLE_START + index * BLOCK_ENTRY_SIZE + 4;
		let raw = read_u32(&bytes, field) as usize;
		assert_eq!(block.offset, field + 4 + raw, "entry {index}");
		assert_eq!(block.size as u32, read_u32(&bytes, field + 4));
	}

	assert_eq!(blocks[2].block_type, BlockType::DATA);
	assert_eq!(blocks[2].payload(&bytes).expect("payload in range"), &[2; 6]);
}

#[test]
fn unknown_tag_is_fatal() {
	let bytes = ResourceBuilder::new().block(b"NTRO", vec![0; 4]).block(b"ZZZZ", vec![0; 4]).build();
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let err = read_block_table(&bytes, &header).expect_err("unknown tag fails");
	assert!(matches!(err, ResourceError::UnrecognizedBlockType { tag } if &tag == b"ZZZZ"));
}

#[test]
fn empty_blocks_are_skipped() {
	let bytes = ResourceBuilder::new().block(b"REDI", Vec::new()).block(b"DATA", vec![9; 4]).build();
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let blocks = read_block_table(&bytes, &header).expect("table parses");
	assert_eq!(blocks.len(), 1);
	assert_eq!(blocks[0].block_type, BlockType::DATA);
}

#[test]
fn repeated_tag_is_rejected() {
	let bytes = ResourceBuilder::new().block(b"DATA", vec![0; 4]).block(b"DATA", vec![0; 4]).build();
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let err = read_block_table(&bytes, &header).expect_err("duplicate fails");
	assert!(matches!(err, ResourceError::DuplicateBlock { tag: "DATA" }));
}

#[test]
fn repeatable_tags_keep_table_order() {
	let bytes = ResourceBuilder::new()
		.block(b"DATA", vec![0; 4])
		.block(b"VBIB", vec![1; 16])
		.block(b"MDAT", vec![2; 4])
		.block(b"VBIB", vec![3; 16])
		.build();
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let blocks = read_block_table(&bytes, &header).expect("repeated VBIB is allowed");

	let order: Vec<BlockType> = blocks.iter().map(|block| block.block_type).collect();
	assert_eq!(order, vec![BlockType::DATA, BlockType::VBIB, BlockType::MDAT, BlockType::VBIB]);
	assert_eq!(blocks[1].payload(&bytes).expect("first vbib"), &[1; 16]);
	assert_eq!(blocks[3].payload(&bytes).expect("second vbib"), &[3; 16]);
}

#[test]
fn single_instance_tags() {
	for block_type in [BlockType::RERL, BlockType::REDI, BlockType::NTRO, BlockType::DATA] {
		assert!(block_type.is_single_instance(), "{block_type}");
	}
	for block_type in [BlockType::VBIB, BlockType::MDAT, BlockType::MRPH] {
		assert!(!block_type.is_single_instance(), "{block_type}");
	}
}

#[test]
fn oversized_table_is_truncated() {
	let mut bytes = ResourceBuilder::new().block(b"DATA", vec![0; 4]).build();
	bytes[12..16].copy_from_slice(&1000_u32.to_le_bytes());
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let err = read_block_table(&bytes, &header).expect_err("table does not fit");
	assert!(matches!(err, ResourceError::TruncatedData { .. }));
}

#[test]
fn tags_map_back_to_types() {
	for block_type in BlockType::ALL {
		assert_eq!(BlockType::from_tag(block_type.tag()), Some(*block_type));
	}
	assert_eq!(BlockType::from_tag(*b"SrMa"), Some(BlockType::SrMa));
	assert_eq!(BlockType::from_tag(*b"srma"), None);
}
