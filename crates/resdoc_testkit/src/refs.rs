use crate::writer::{ByteWriter, StringPool};

/// Builder for `RERL` block bodies.
#[derive(Debug, Clone, Default)]
pub struct ExternalRefsBuilder {
	entries: Vec<(u64, String)>,
}

impl ExternalRefsBuilder {
	/// Empty reference list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a reference.
	pub fn entry(mut self, id: u64, name: &str) -> Self {
		self.entries.push((id, name.to_owned()));
		self
	}

	/// Lay out the block body: `(offset, count)` then 16-byte entries of
	/// `u64 id` and a 64-bit relative name offset.
	pub fn build(&self) -> Vec<u8> {
		let mut w = ByteWriter::new();
		let mut strings = StringPool::default();

		let slot = w.rel_slot();
		w.u32(self.entries.len() as u32);
		if !self.entries.is_empty() {
			let here = w.pos();
			w.patch_rel(slot, here);
		}
		for (id, name) in &self.entries {
			w.u64(*id);
			let name_slot = w.rel_slot64();
			strings.push64(name_slot, name);
		}

		strings.flush(&mut w);
		w.align(4);
		w.into_bytes()
	}
}
