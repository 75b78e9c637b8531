use std::path::PathBuf;

use resdoc::resource::{FieldDefinition, FieldType, Manifest, Resource, ResourceError, Result, StructDefinition};

use crate::cmd::util::print_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Show the flattened layout of one struct.
	#[arg(long = "struct")]
	pub struct_name: Option<String>,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

pub fn run(args: Args) -> Result<()> {
	let Args { path, struct_name, json } = args;

	let resource = Resource::open(&path)?;
	let manifest = resource.manifest().ok_or(ResourceError::MissingBlock { tag: "NTRO" })?;

	let Some(name) = struct_name else {
		if json {
			return print_json(manifest);
		}
		print_summary(&path, manifest);
		return Ok(());
	};

	let item = manifest
		.struct_by_name(&name)
		.ok_or(ResourceError::MissingStruct { name })?;
	if json {
		return print_json(item);
	}

	println!("struct: {}", item.name);
	println!("id: 0x{:08x}", item.id);
	println!("disk_size: {}", item.disk_size);
	println!("alignment: {}", item.alignment);
	if let Some(base) = item.base_struct_id.and_then(|id| manifest.struct_by_id(id)) {
		println!("base: {}", base.name);
	}
	println!("fields:");
	for field in manifest.layout(item.id) {
		println!("  +{:<4} {} {}", field.on_disk_offset, describe_type(manifest, field), field.name);
	}

	Ok(())
}

fn print_summary(path: &std::path::Path, manifest: &Manifest) {
	println!("path: {}", path.display());
	println!("introspection_version: {}", manifest.introspection_version);
	println!("structs: {}", manifest.structs.len());
	for item in &manifest.structs {
		println!("  {} size={} fields={}{}", item.name, item.disk_size, item.fields.len(), base_suffix(manifest, item));
	}
	println!("enums: {}", manifest.enums.len());
	for item in &manifest.enums {
		println!("  {} values={}", item.name, item.values.len());
	}
}

fn base_suffix(manifest: &Manifest, item: &StructDefinition) -> String {
	match item.base_struct_id {
		Some(id) => {
			let name = manifest.struct_by_id(id).map_or("?", |base| base.name.as_str());
			format!(" base={name}")
		}
		None => String::new(),
	}
}

fn describe_type(manifest: &Manifest, field: &FieldDefinition) -> String {
	let mut out = match field.field_type() {
		Some(ty) => match ty {
			FieldType::Struct => manifest
				.struct_by_id(field.type_data)
				.map_or_else(|| format!("struct#{:08x}", field.type_data), |item| item.name.clone()),
			FieldType::Enum => manifest
				.enum_by_id(field.type_data)
				.map_or_else(|| format!("enum#{:08x}", field.type_data), |item| item.name.clone()),
			other => format!("{other:?}"),
		},
		None => format!("type#{}", field.type_code),
	};

	for step in field.indirection_chain() {
		match step {
			Ok(step) => out.push_str(&format!("<{step:?}>")),
			Err(code) => out.push_str(&format!("<#{code}>")),
		}
	}
	if field.count > 1 {
		out.push_str(&format!("[{}]", field.count));
	}
	out
}
