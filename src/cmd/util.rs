use std::io::Write;

use resdoc::resource::{BlockType, ResourceError, Result};
use serde::Serialize;

/// Parse a four-character block tag such as `DATA` into its block type.
pub(crate) fn parse_block_code(code: &str) -> Result<BlockType> {
	let bytes: [u8; 4] = code
		.as_bytes()
		.try_into()
		.map_err(|_| ResourceError::InvalidBlockCode { code: code.to_owned() })?;
	BlockType::from_tag(bytes).ok_or_else(|| ResourceError::InvalidBlockCode { code: code.to_owned() })
}

/// Render tag bytes as a printable label.
pub(crate) fn render_code(code: [u8; 4]) -> String {
	code.into_iter()
		.map(|byte| if byte.is_ascii_graphic() { char::from(byte) } else { '.' })
		.collect()
}

/// Pretty-print `value` as JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	let mut out = std::io::stdout().lock();
	serde_json::to_writer_pretty(&mut out, value).map_err(std::io::Error::from)?;
	writeln!(out)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use resdoc::resource::{BlockType, ResourceError};

	use super::{parse_block_code, render_code};

	#[test]
	fn block_codes_parse_exactly() {
		assert_eq!(parse_block_code("DATA").expect("known tag"), BlockType::DATA);
		assert_eq!(parse_block_code("SrMa").expect("mixed case tag"), BlockType::SrMa);
		for bad in ["", "DAT", "DATAX", "data", "ZZZZ"] {
			let err = parse_block_code(bad).expect_err("invalid tag");
			assert!(matches!(err, ResourceError::InvalidBlockCode { .. }), "{bad}");
		}
	}

	#[test]
	fn render_code_masks_unprintable_bytes() {
		assert_eq!(render_code(*b"NTRO"), "NTRO");
		assert_eq!(render_code([b'A', 0, 0xFF, b'B']), "A..B");
	}
}
