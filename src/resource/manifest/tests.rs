use resdoc_testkit::{EnumSpec, FieldSpec, ManifestBuilder, ResourceBuilder, StructSpec};

use crate::resource::{FieldType, Indirection, Manifest, ResourceError, ResourceHeader, Result, read_block_table};

fn manifest_file(manifest: &ManifestBuilder) -> Vec<u8> {
	ResourceBuilder::new().block(b"NTRO", manifest.build()).build()
}

fn parse_file(bytes: &[u8]) -> Result<Manifest> {
	let header = ResourceHeader::parse(bytes)?;
	let blocks = read_block_table(bytes, &header)?;
	Manifest::parse(bytes, &blocks[0])
}

fn layout_names(manifest: &Manifest, id: u32) -> Vec<&str> {
	manifest.layout(id).map(|field| field.name.as_str()).collect()
}

#[test]
fn parses_structs_fields_and_enums() {
	let manifest = ManifestBuilder::new()
		.structure(
			StructSpec::new(7, "Foo", 12)
				.field(FieldSpec::new("m_value", 14, 0))
				.field(FieldSpec::new("m_children", 1, 4).indirections(&[4]).type_data(8)),
		)
		.structure(StructSpec::new(8, "Bar", 4).field(FieldSpec::new("m_kind", 2, 0).type_data(30)))
		.enumeration(EnumSpec::new(30, "Kind").value("KIND_A", 0).value("KIND_B", 5));
	let parsed = parse_file(&manifest_file(&manifest)).expect("manifest parses");

	assert_eq!(parsed.introspection_version, 4);
	assert_eq!(parsed.structs.len(), 2);
	assert_eq!(parsed.first_struct().map(|item| item.name.as_str()), Some("Foo"));

	let foo = parsed.struct_by_id(7).expect("Foo by id");
	assert_eq!(foo.disk_size, 12);
	assert_eq!(foo.base_struct_id, None);
	assert_eq!(foo.fields[0].field_type(), Some(FieldType::Int32));
	assert_eq!(foo.fields[1].on_disk_offset, 4);
	assert_eq!(foo.fields[1].indirections, vec![4]);
	assert_eq!(
		foo.fields[1].indirection_chain().collect::<Vec<_>>(),
		vec![Ok(Indirection::ResourceArray)]
	);
	assert_eq!(foo.fields[1].type_data, 8);

	assert_eq!(parsed.struct_by_name("Bar").map(|item| item.id), Some(8));
	let kind = parsed.enum_by_id(30).expect("enum by id");
	assert_eq!(kind.name, "Kind");
	assert_eq!(kind.name_of(5), Some("KIND_B"));
	assert_eq!(kind.name_of(6), None);
}

#[test]
fn unknown_codes_are_kept_raw() {
	let manifest = ManifestBuilder::new().structure(StructSpec::new(1, "Odd", 4).field(FieldSpec::new("m_x", 99, 0).indirections(&[42])));
	let parsed = parse_file(&manifest_file(&manifest)).expect("unknown codes parse");
	let field = &parsed.structs[0].fields[0];
	assert_eq!(field.type_code, 99);
	assert_eq!(field.field_type(), None);
	assert_eq!(field.indirection_chain().collect::<Vec<_>>(), vec![Err(42)]);
}

#[test]
fn base_fields_come_first_at_every_level() {
	let manifest = ManifestBuilder::new()
		.structure(StructSpec::new(3, "Leaf", 12).base(2).field(FieldSpec::new("c", 14, 8)))
		.structure(StructSpec::new(2, "Middle", 8).base(1).field(FieldSpec::new("b", 14, 4)))
		.structure(StructSpec::new(1, "Root", 4).field(FieldSpec::new("a", 14, 0)));
	let parsed = parse_file(&manifest_file(&manifest)).expect("manifest parses");

	assert_eq!(layout_names(&parsed, 3), vec!["a", "b", "c"]);
	assert_eq!(layout_names(&parsed, 2), vec!["a", "b"]);
	assert_eq!(layout_names(&parsed, 1), vec!["a"]);
	assert_eq!(parsed.struct_by_id(3).and_then(|item| item.base_struct_id), Some(2));
	assert!(layout_names(&parsed, 77).is_empty());
}

#[test]
fn missing_base_is_malformed() {
	let manifest = ManifestBuilder::new().structure(StructSpec::new(1, "Orphan", 4).base(99));
	let err = parse_file(&manifest_file(&manifest)).expect_err("missing base fails");
	assert!(matches!(err, ResourceError::MalformedManifest { .. }), "{err}");
}

#[test]
fn base_cycle_is_malformed() {
	let manifest = ManifestBuilder::new()
		.structure(StructSpec::new(1, "A", 4).base(2))
		.structure(StructSpec::new(2, "B", 4).base(1));
	let err = parse_file(&manifest_file(&manifest)).expect_err("cycle fails");
	assert!(matches!(err, ResourceError::MalformedManifest { .. }), "{err}");
}

#[test]
fn oversized_struct_count_is_malformed() {
	let manifest = ManifestBuilder::new().structure(StructSpec::new(1, "Foo", 4).field(FieldSpec::new("a", 14, 0)));
	let mut bytes = manifest_file(&manifest);
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let block = read_block_table(&bytes, &header).expect("table parses")[0];
	bytes[block.offset + 8..block.offset + 12].copy_from_slice(&5000_u32.to_le_bytes());

	let err = parse_file(&bytes).expect_err("struct table does not fit");
	assert!(matches!(err, ResourceError::MalformedManifest { .. }), "{err}");
}

#[test]
fn field_table_past_end_is_malformed() {
	let manifest = ManifestBuilder::new().structure(StructSpec::new(1, "Foo", 4).field(FieldSpec::new("a", 14, 0)));
	let mut bytes = manifest_file(&manifest);
	let header = ResourceHeader::parse(&bytes).expect("header parses");
	let block = read_block_table(&bytes, &header).expect("table parses")[0];
	// First struct record follows the 20-byte block header; its field table sits at +28.
	let field_offset = block.offset + 20 + 28;
	bytes[field_offset..field_offset + 4].copy_from_slice(&0x00FF_0000_u32.to_le_bytes());

	let err = parse_file(&bytes).expect_err("field table does not fit");
	assert!(matches!(err, ResourceError::MalformedManifest { .. }), "{err}");
}

#[test]
fn negative_field_count_is_malformed() {
	let manifest = ManifestBuilder::new().structure(StructSpec::new(1, "Foo", 4).field(FieldSpec::new("a", 14, 0).count(-2)));
	let err = parse_file(&manifest_file(&manifest)).expect_err("negative count fails");
	assert!(matches!(err, ResourceError::MalformedManifest { .. }), "{err}");
}

#[test]
fn empty_manifest_has_no_root() {
	let parsed = parse_file(&manifest_file(&ManifestBuilder::new())).expect("empty manifest parses");
	assert!(parsed.first_struct().is_none());
	assert!(parsed.enums.is_empty());
}
