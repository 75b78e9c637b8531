use crate::resource::{ResourceError, Result};

/// Bounded cursor over an immutable byte slice using absolute positions.
///
/// Every relative offset in the format is measured from the position right
/// after the field that stores it; [`Cursor::read_rel_offset`] applies that
/// rule so parsers never do the arithmetic themselves.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Create a cursor at an absolute position. The position is checked on first read.
	pub fn at(bytes: &'a [u8], pos: usize) -> Self {
		Self { bytes, pos }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Total length of the underlying slice.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether the underlying slice is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Move to an absolute position inside the slice.
	pub fn seek(&mut self, pos: usize) -> Result<()> {
		if pos > self.bytes.len() {
			return Err(ResourceError::TruncatedData {
				at: pos,
				need: 0,
				available: 0,
			});
		}
		self.pos = pos;
		Ok(())
	}

	/// Advance by `n` bytes.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		let _ = self.read_exact(n)?;
		Ok(())
	}

	/// Check that `count` records of `size` bytes fit at absolute `start`.
	pub fn check_span(&self, start: usize, count: usize, size: usize) -> Result<()> {
		let need = count.checked_mul(size).ok_or(ResourceError::TruncatedData {
			at: start,
			need: usize::MAX,
			available: self.bytes.len().saturating_sub(start),
		})?;
		let fits = start.checked_add(need).is_some_and(|end| end <= self.bytes.len());
		if !fits {
			return Err(ResourceError::TruncatedData {
				at: start,
				need,
				available: self.bytes.len().saturating_sub(start),
			});
		}
		Ok(())
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(ResourceError::TruncatedData {
				at: self.pos,
				need: n,
				available: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a four-byte tag.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		self.read_array()
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i64`.
	pub fn read_i64_le(&mut self) -> Result<i64> {
		Ok(i64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read `N` consecutive little-endian `f32` values.
	pub fn read_f32s<const N: usize>(&mut self) -> Result<[f32; N]> {
		let mut out = [0.0_f32; N];
		for item in &mut out {
			*item = self.read_f32_le()?;
		}
		Ok(out)
	}

	/// Read a 32-bit relative offset and resolve it to an absolute position.
	///
	/// Returns the raw value alongside the resolved position; callers that
	/// treat `0` as null check the raw value.
	pub fn read_rel_offset(&mut self) -> Result<(u32, usize)> {
		let raw = self.read_u32_le()?;
		Ok((raw, resolve(self.pos, u64::from(raw))?))
	}

	/// Read a 64-bit relative offset and resolve it to an absolute position.
	pub fn read_rel_offset64(&mut self) -> Result<(u64, usize)> {
		let raw = self.read_u64_le()?;
		Ok((raw, resolve(self.pos, raw)?))
	}

	/// Read a `(relative offset, count)` table header.
	pub fn read_table(&mut self) -> Result<(usize, usize)> {
		let (_, start) = self.read_rel_offset()?;
		let count = self.read_u32_le()? as usize;
		Ok((start, count))
	}

	/// Read a string reached through a 32-bit relative offset.
	///
	/// The cursor ends right after the offset field. A zero offset yields `None`.
	pub fn read_offset_string(&mut self) -> Result<Option<String>> {
		let (raw, target) = self.read_rel_offset()?;
		if raw == 0 {
			return Ok(None);
		}
		self.cstring_at(target).map(Some)
	}

	/// Read a string reached through a 64-bit relative offset.
	pub fn read_offset_string64(&mut self) -> Result<Option<String>> {
		let (raw, target) = self.read_rel_offset64()?;
		if raw == 0 {
			return Ok(None);
		}
		self.cstring_at(target).map(Some)
	}

	/// Read a null-terminated UTF-8 string at an absolute position without moving.
	pub fn cstring_at(&self, at: usize) -> Result<String> {
		let bytes = self.cstring_bytes_at(at)?;
		std::str::from_utf8(bytes)
			.map(str::to_owned)
			.map_err(|_| ResourceError::InvalidString { at })
	}

	/// Read a zero-terminated byte string at `at`, without the terminator.
	pub fn cstring_bytes_at(&self, at: usize) -> Result<&'a [u8]> {
		let rem = self.bytes.get(at..).ok_or(ResourceError::TruncatedData {
			at,
			need: 1,
			available: 0,
		})?;
		let Some(end) = rem.iter().position(|byte| *byte == 0) else {
			return Err(ResourceError::TruncatedData {
				at,
				need: rem.len() + 1,
				available: rem.len(),
			});
		};
		Ok(&rem[..end])
	}
}

fn resolve(base: usize, raw: u64) -> Result<usize> {
	usize::try_from(raw)
		.ok()
		.and_then(|delta| base.checked_add(delta))
		.ok_or(ResourceError::TruncatedData {
			at: base,
			need: usize::MAX,
			available: 0,
		})
}
