use std::path::PathBuf;

use resdoc::resource::{Resource, Result};

use crate::cmd::util::print_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Print header fields, inferred type and the block directory.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let resource = Resource::open(&path)?;
	let summary = resource.summary();
	if json {
		return print_json(&summary);
	}

	println!("path: {}", path.display());
	println!("file_size: {}", summary.file_size);
	if !resource.file_size_matches() {
		println!("actual_size: {} (mismatch)", summary.actual_size);
	}
	println!("header_version: {}", summary.header_version);
	println!("payload_version: {}", summary.payload_version);
	println!("resource_type: {}", summary.resource_type);
	println!("block_count: {}", summary.blocks.len());
	println!("blocks:");
	for block in &summary.blocks {
		println!("  {} offset={} size={}", block.block_type, block.offset, block.size);
	}
	if let Some(manifest) = resource.manifest() {
		let root = manifest.first_struct().map_or("-", |item| item.name.as_str());
		println!("manifest_root: {root}");
	}

	Ok(())
}
