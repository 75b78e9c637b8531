use crate::writer::{ByteWriter, StringPool};

type DependencyRecord = (String, String, u32, u32);

/// Builder for legacy `REDI` block bodies.
///
/// The body starts with ten `(offset, count)` pairs in fixed order followed by
/// the record tables and a string pool.
#[derive(Debug, Clone, Default)]
pub struct EditInfoBuilder {
	input: Vec<DependencyRecord>,
	additional_input: Vec<DependencyRecord>,
	argument: Vec<DependencyRecord>,
	special: Vec<DependencyRecord>,
	custom_count: u32,
	related_files: Vec<(String, String)>,
	children: Vec<(u64, String)>,
	extra_ints: Vec<(String, i32)>,
	extra_floats: Vec<(String, f32)>,
	extra_strings: Vec<(String, String)>,
}

impl EditInfoBuilder {
	/// Empty edit info.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an input dependency.
	pub fn input(mut self, filename: &str, search_path: &str, crc: u32, flags: u32) -> Self {
		self.input.push((filename.to_owned(), search_path.to_owned(), crc, flags));
		self
	}

	/// Append an additional input dependency.
	pub fn additional_input(mut self, filename: &str, search_path: &str, crc: u32, flags: u32) -> Self {
		self.additional_input.push((filename.to_owned(), search_path.to_owned(), crc, flags));
		self
	}

	/// Append an argument dependency.
	pub fn argument(mut self, name: &str, kind: &str, fingerprint: u32, fingerprint_default: u32) -> Self {
		self.argument.push((name.to_owned(), kind.to_owned(), fingerprint, fingerprint_default));
		self
	}

	/// Append a special dependency.
	pub fn special(mut self, content: &str, compiler: &str, fingerprint: u32, user_data: u32) -> Self {
		self.special.push((content.to_owned(), compiler.to_owned(), fingerprint, user_data));
		self
	}

	/// Declare a non-empty custom dependency table.
	pub fn custom_count(mut self, count: u32) -> Self {
		self.custom_count = count;
		self
	}

	/// Append an additional related file.
	pub fn related_file(mut self, filename: &str, search_path: &str) -> Self {
		self.related_files.push((filename.to_owned(), search_path.to_owned()));
		self
	}

	/// Append a child resource.
	pub fn child(mut self, id: u64, name: &str) -> Self {
		self.children.push((id, name.to_owned()));
		self
	}

	/// Append an extra integer.
	pub fn extra_int(mut self, name: &str, value: i32) -> Self {
		self.extra_ints.push((name.to_owned(), value));
		self
	}

	/// Append an extra float.
	pub fn extra_float(mut self, name: &str, value: f32) -> Self {
		self.extra_floats.push((name.to_owned(), value));
		self
	}

	/// Append an extra string.
	pub fn extra_string(mut self, name: &str, value: &str) -> Self {
		self.extra_strings.push((name.to_owned(), value.to_owned()));
		self
	}

	/// Lay out the block body.
	pub fn build(&self) -> Vec<u8> {
		let mut w = ByteWriter::new();
		let mut strings = StringPool::default();

		let counts = [
			self.input.len() as u32,
			self.additional_input.len() as u32,
			self.argument.len() as u32,
			self.special.len() as u32,
			self.custom_count,
			self.related_files.len() as u32,
			self.children.len() as u32,
			self.extra_ints.len() as u32,
			self.extra_floats.len() as u32,
			self.extra_strings.len() as u32,
		];
		let mut slots = [0_usize; 10];
		for (slot, count) in slots.iter_mut().zip(counts) {
			*slot = w.rel_slot();
			w.u32(count);
		}

		let dependency_tables = [&self.input, &self.additional_input, &self.argument, &self.special];
		for (index, table) in dependency_tables.into_iter().enumerate() {
			mark(&mut w, slots[index], table.len());
			for (first, second, a, b) in table {
				let slot = w.rel_slot();
				strings.push(slot, first);
				let slot = w.rel_slot();
				strings.push(slot, second);
				w.u32(*a).u32(*b);
			}
		}

		mark(&mut w, slots[4], self.custom_count as usize);

		mark(&mut w, slots[5], self.related_files.len());
		for (filename, search_path) in &self.related_files {
			let slot = w.rel_slot();
			strings.push(slot, filename);
			let slot = w.rel_slot();
			strings.push(slot, search_path);
		}

		mark(&mut w, slots[6], self.children.len());
		for (id, name) in &self.children {
			w.u64(*id);
			let slot = w.rel_slot();
			strings.push(slot, name);
			w.u32(0);
		}

		mark(&mut w, slots[7], self.extra_ints.len());
		for (name, value) in &self.extra_ints {
			let slot = w.rel_slot();
			strings.push(slot, name);
			w.i32(*value);
		}

		mark(&mut w, slots[8], self.extra_floats.len());
		for (name, value) in &self.extra_floats {
			let slot = w.rel_slot();
			strings.push(slot, name);
			w.f32(*value);
		}

		mark(&mut w, slots[9], self.extra_strings.len());
		for (name, value) in &self.extra_strings {
			let slot = w.rel_slot();
			strings.push(slot, name);
			let slot = w.rel_slot();
			strings.push(slot, value);
		}

		strings.flush(&mut w);
		w.align(4);
		w.into_bytes()
	}
}

fn mark(w: &mut ByteWriter, slot: usize, count: usize) {
	if count > 0 {
		let here = w.pos();
		w.patch_rel(slot, here);
	}
}
