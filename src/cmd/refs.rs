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
	let refs = resource.external_refs()?.ok_or(ResourceError::MissingBlock { tag: "RERL" })?;
	if json {
		return print_json(refs.entries());
	}

	println!("path: {}", path.display());
	println!("count: {}", refs.len());
	for entry in refs.entries() {
		println!("  0x{:016x} {}", entry.id, entry.name);
	}

	Ok(())
}
