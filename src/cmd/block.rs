use std::path::PathBuf;

use resdoc::resource::{Resource, Result};

use crate::cmd::util::{parse_block_code, render_code};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Four-character block tag, e.g. `DATA`.
	pub code: String,
	/// Maximum number of bytes to dump.
	#[arg(long, default_value_t = 256)]
	pub limit: usize,
}

/// Hex-dump the body of one block.
pub fn run(args: Args) -> Result<()> {
	let Args { path, code, limit } = args;
	let block_type = parse_block_code(&code)?;

	let resource = Resource::open(&path)?;
	let block = resource.require_block(block_type)?;
	let payload = block.payload(resource.bytes())?;

	println!("path: {}", path.display());
	println!("block: {}", block_type);
	println!("offset: {}", block.offset);
	println!("size: {}", block.size);
	let shown = &payload[..payload.len().min(limit)];
	for (row, chunk) in shown.chunks(16).enumerate() {
		let hex: Vec<String> = chunk.iter().map(|byte| format!("{byte:02x}")).collect();
		let text: String = chunk.chunks(4).map(|word| render_code(pad_word(word))).collect();
		println!("  {:08x}  {:<47}  {}", row * 16, hex.join(" "), text);
	}
	if payload.len() > limit {
		println!("  ... {} more bytes", payload.len() - limit);
	}

	Ok(())
}

fn pad_word(word: &[u8]) -> [u8; 4] {
	let mut out = [b' '; 4];
	out[..word.len()].copy_from_slice(word);
	out
}
