use std::path::PathBuf;

use resdoc::resource::{DecodeOptions, Resource, Result};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::print_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Decode the payload as this struct instead of the manifest's first one.
	#[arg(long = "struct")]
	pub struct_name: Option<String>,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
	/// Print arrays and nested structs without truncation.
	#[arg(long)]
	pub full: bool,
	/// Maximum struct and pointer nesting.
	#[arg(long, default_value_t = DecodeOptions::default().max_depth)]
	pub max_depth: u32,
}

/// Decode the payload block and print the value tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		struct_name,
		json,
		full,
		max_depth,
	} = args;

	let resource = Resource::open(&path)?;
	let options = DecodeOptions {
		max_depth,
		..DecodeOptions::default()
	};
	let value = match &struct_name {
		Some(name) => resource.decode_data_as(name, &options)?,
		None => resource.decode_data(&options)?,
	};

	if json {
		return print_json(&value);
	}

	let print_options = if full { PrintOptions::unlimited() } else { PrintOptions::default() };
	println!("path: {}", path.display());
	println!("resource_type: {}", resource.resource_type());
	println!("decoded:");
	print_value(&value, 0, 0, print_options);

	Ok(())
}
