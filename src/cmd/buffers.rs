use std::path::PathBuf;

use resdoc::resource::{BufferView, Resource, ResourceError, Result};

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
	let buffers = resource.vertex_buffers()?.ok_or(ResourceError::MissingBlock { tag: "VBIB" })?;
	if json {
		return print_json(&buffers);
	}

	println!("path: {}", path.display());
	println!("vertex_buffers: {}", buffers.vertex_buffers.len());
	for (index, buffer) in buffers.vertex_buffers.iter().enumerate() {
		print_buffer(index, buffer);
		for attribute in &buffer.attributes {
			println!(
				"    {}{} format={} offset={} slot={}",
				attribute.semantic_name, attribute.semantic_index, attribute.format, attribute.offset, attribute.slot
			);
		}
	}
	println!("index_buffers: {}", buffers.index_buffers.len());
	for (index, buffer) in buffers.index_buffers.iter().enumerate() {
		print_buffer(index, buffer);
	}

	Ok(())
}

fn print_buffer(index: usize, buffer: &BufferView) {
	println!(
		"  [{index}] elements={} element_size={} data_size={}{}",
		buffer.element_count,
		buffer.element_size,
		buffer.data_size,
		if buffer.is_compressed() { " (compressed)" } else { "" }
	);
}
