use std::path::PathBuf;

use resdoc::resource::{Resource, ResourceError, Result};

use crate::cmd::util::print_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let resource = Resource::open(&path)?;
	let info = resource.edit_info().ok_or(ResourceError::MissingBlock { tag: "REDI" })?;
	if json {
		return print_json(info);
	}

	println!("path: {}", path.display());
	println!("resource_type: {}", resource.resource_type());
	println!("input_dependencies:");
	for dep in &info.input_dependencies {
		println!("  {} ({}) crc=0x{:08x}", dep.content_relative_filename, dep.content_search_path, dep.file_crc);
	}
	println!("additional_input_dependencies:");
	for dep in &info.additional_input_dependencies {
		println!("  {} ({}) crc=0x{:08x}", dep.content_relative_filename, dep.content_search_path, dep.file_crc);
	}
	println!("argument_dependencies:");
	for dep in &info.argument_dependencies {
		println!("  {}: {}", dep.parameter_name, dep.parameter_type);
	}
	println!("special_dependencies:");
	for dep in &info.special_dependencies {
		println!("  {} \"{}\"", dep.compiler_identifier, dep.string);
	}
	println!("child_resources:");
	for child in &info.child_resources {
		println!("  0x{:016x} {}", child.id, child.resource_name);
	}
	if !info.additional_related_files.is_empty() {
		println!("additional_related_files:");
		for file in &info.additional_related_files {
			println!("  {} ({})", file.content_relative_filename, file.content_search_path);
		}
	}
	for item in &info.extra_ints {
		println!("extra_int {} = {}", item.name, item.value);
	}
	for item in &info.extra_floats {
		println!("extra_float {} = {}", item.name, item.value);
	}
	for item in &info.extra_strings {
		println!("extra_string {} = \"{}\"", item.name, item.value);
	}

	Ok(())
}
