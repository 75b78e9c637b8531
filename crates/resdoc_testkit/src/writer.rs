/// Growable little-endian byte sink with relative-offset patching.
///
/// Relative offsets are measured from the byte right after the offset field,
/// so a body built here can be placed anywhere in a file unchanged.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
	buf: Vec<u8>,
}

impl ByteWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current write position.
	pub fn pos(&self) -> usize {
		self.buf.len()
	}

	/// Append raw bytes.
	pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(data);
		self
	}

	/// Append one byte.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.buf.push(value);
		self
	}

	/// Append a little-endian `u16`.
	pub fn u16(&mut self, value: u16) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `i16`.
	pub fn i16(&mut self, value: i16) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `u64`.
	pub fn u64(&mut self, value: u64) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a little-endian `f32`.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a null-terminated string and return its start position.
	pub fn cstr(&mut self, value: &str) -> usize {
		let start = self.pos();
		self.buf.extend_from_slice(value.as_bytes());
		self.buf.push(0);
		start
	}

	/// Pad with zero bytes up to a multiple of `align`.
	pub fn align(&mut self, align: usize) -> &mut Self {
		while self.buf.len() % align != 0 {
			self.buf.push(0);
		}
		self
	}

	/// Reserve a 32-bit relative offset field, returning its position.
	pub fn rel_slot(&mut self) -> usize {
		let slot = self.pos();
		self.u32(0);
		slot
	}

	/// Reserve a 64-bit relative offset field, returning its position.
	pub fn rel_slot64(&mut self) -> usize {
		let slot = self.pos();
		self.u64(0);
		slot
	}

	/// Point a 32-bit slot at `target`.
	pub fn patch_rel(&mut self, slot: usize, target: usize) {
		let base = slot + 4;
		assert!(target >= base, "relative offsets only point forward (slot={slot}, target={target})");
		self.patch_u32(slot, (target - base) as u32);
	}

	/// Point a 64-bit slot at `target`.
	pub fn patch_rel64(&mut self, slot: usize, target: usize) {
		let base = slot + 8;
		assert!(target >= base, "relative offsets only point forward (slot={slot}, target={target})");
		self.buf[slot..slot + 8].copy_from_slice(&((target - base) as u64).to_le_bytes());
	}

	/// Overwrite a `u32` at `slot`.
	pub fn patch_u32(&mut self, slot: usize, value: u32) {
		self.buf[slot..slot + 4].copy_from_slice(&value.to_le_bytes());
	}

	/// Borrow the written bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Finish and return the written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}
}

/// Queue of string slots written once the fixed-size records are laid out.
#[derive(Debug, Default)]
pub(crate) struct StringPool {
	pending: Vec<(usize, String, bool)>,
}

impl StringPool {
	pub(crate) fn push(&mut self, slot: usize, value: &str) {
		self.pending.push((slot, value.to_owned(), false));
	}

	pub(crate) fn push64(&mut self, slot: usize, value: &str) {
		self.pending.push((slot, value.to_owned(), true));
	}

	pub(crate) fn flush(self, w: &mut ByteWriter) {
		for (slot, value, wide) in self.pending {
			let here = w.pos();
			if wide {
				w.patch_rel64(slot, here);
			} else {
				w.patch_rel(slot, here);
			}
			w.cstr(&value);
		}
	}
}
