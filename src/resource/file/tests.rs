use resdoc_testkit::{EditInfoBuilder, FieldSpec, ManifestBuilder, ResourceBuilder, StructSpec};

use crate::resource::{BlockType, DecodeOptions, Resource, ResourceError, ResourceType, Value, classify};

fn two_struct_manifest() -> ManifestBuilder {
	ManifestBuilder::new()
		.structure(StructSpec::new(1, "CWorldVisibility", 4).field(FieldSpec::new("m_count", 14, 0)))
		.structure(StructSpec::new(2, "Alt", 4).field(FieldSpec::new("m_raw", 15, 0)))
}

#[test]
fn parses_metadata_eagerly_and_classifies() {
	let bytes = ResourceBuilder::new()
		.payload_version(2)
		.block(b"REDI", EditInfoBuilder::new().special("", "CompileRenderMesh", 0, 0).build())
		.block(b"NTRO", two_struct_manifest().build())
		.block(b"DATA", vec![7, 0, 0, 0])
		.build();
	let resource = Resource::from_bytes(bytes).expect("resource opens");

	assert_eq!(resource.header.payload_version, 2);
	assert!(resource.file_size_matches());
	assert_eq!(resource.blocks().len(), 3);
	assert!(resource.edit_info().is_some());
	assert_eq!(resource.manifest().map(|item| item.structs.len()), Some(2));
	assert_eq!(resource.resource_type(), ResourceType::Mesh);
	assert_eq!(classify(&resource), ResourceType::Mesh);
	assert_eq!(classify(&resource), classify(&resource));
}

#[test]
fn manifest_root_classifies_without_edit_info() {
	let bytes = ResourceBuilder::new().block(b"NTRO", two_struct_manifest().build()).build();
	let resource = Resource::from_bytes(bytes).expect("resource opens");
	assert_eq!(resource.resource_type(), ResourceType::WorldVisibility);
}

#[test]
fn decodes_named_root() {
	let bytes = ResourceBuilder::new()
		.block(b"NTRO", two_struct_manifest().build())
		.block(b"DATA", vec![0xFF, 0xFF, 0xFF, 0xFF])
		.build();
	let resource = Resource::from_bytes(bytes).expect("resource opens");
	let options = DecodeOptions::default();

	let first = resource.decode_data(&options).expect("first struct decodes");
	assert_eq!(first.get("m_count"), Some(&Value::I64(-1)));

	let alt = resource.decode_data_as("Alt", &options).expect("named struct decodes");
	assert_eq!(alt.get("m_raw"), Some(&Value::U64(u64::from(u32::MAX))));

	let err = resource.decode_data_as("Nope", &options).expect_err("unknown struct");
	assert!(matches!(err, ResourceError::MissingStruct { ref name } if name == "Nope"));
}

#[test]
fn decode_needs_manifest_and_payload() {
	let resource = Resource::from_bytes(ResourceBuilder::new().block(b"DATA", vec![0; 4]).build()).expect("resource opens");
	let err = resource.decode_data(&DecodeOptions::default()).expect_err("no manifest");
	assert!(matches!(err, ResourceError::MissingBlock { tag: "NTRO" }));

	let resource = Resource::from_bytes(ResourceBuilder::new().block(b"NTRO", two_struct_manifest().build()).build())
		.expect("resource opens");
	let err = resource.decode_data(&DecodeOptions::default()).expect_err("no payload");
	assert!(matches!(err, ResourceError::MissingBlock { tag: "DATA" }));
}

#[test]
fn size_mismatch_is_tolerated() {
	let bytes = ResourceBuilder::new().file_size(9999).block(b"DATA", vec![1; 4]).build();
	let resource = Resource::from_bytes(bytes).expect("mismatch tolerated");
	assert!(!resource.file_size_matches());
	assert_eq!(resource.summary().file_size, 9999);
	assert_eq!(resource.block_payload(BlockType::DATA).expect("payload"), &[1; 4]);
	assert!(resource.external_refs().expect("no refs block").is_none());
	assert!(resource.vertex_buffers().expect("no buffer block").is_none());
}

#[test]
fn opens_from_disk() {
	let bytes = ResourceBuilder::new().block(b"DATA", vec![1; 4]).build();
	let path = resdoc_testkit::write_temp("file_opens_from_disk.res", &bytes);
	let resource = Resource::open(&path).expect("opens from path");
	assert_eq!(resource.bytes(), bytes.as_slice());

	let err = Resource::open(path.with_extension("missing")).expect_err("missing file");
	assert!(matches!(err, ResourceError::Io(_)));
}

#[test]
fn repeated_buffer_blocks_are_reachable_by_position() {
	let bytes = ResourceBuilder::new()
		.block(b"DATA", vec![5; 4])
		.block(b"VBIB", vec![0; 16])
		.block(b"VBIB", vec![0; 16])
		.build();
	let resource = Resource::from_bytes(bytes).expect("repeated VBIB opens");

	assert_eq!(resource.blocks().len(), 3);
	assert_eq!(resource.blocks_of(BlockType::VBIB).count(), 2);
	let first = resource.block(BlockType::VBIB).expect("first vbib");
	assert_eq!(resource.block_by_index(1), Some(first));
	let second = resource.block_by_index(2).expect("second vbib");
	assert_eq!(second.block_type, BlockType::VBIB);
	assert!(second.offset > first.offset);
	assert!(resource.block_by_index(3).is_none());

	let buffers = resource.vertex_buffers().expect("buffers parse").expect("vbib present");
	assert!(buffers.vertex_buffers.is_empty() && buffers.index_buffers.is_empty());
}

#[test]
fn repeated_payload_block_is_rejected() {
	let bytes = ResourceBuilder::new().block(b"DATA", vec![0; 4]).block(b"DATA", vec![1; 4]).build();
	let err = Resource::from_bytes(bytes).expect_err("two payloads");
	assert!(matches!(err, ResourceError::DuplicateBlock { tag: "DATA" }));
}
