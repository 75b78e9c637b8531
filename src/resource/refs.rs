use std::collections::HashMap;

use serde::Serialize;

use crate::resource::bytes::Cursor;
use crate::resource::{Block, Result};

const ENTRY_SIZE: usize = 16;

/// One entry of the external reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalReference {
	/// Resource id stored by referencing fields.
	pub id: u64,
	/// Referenced resource name.
	pub name: String,
}

/// External reference list (`RERL` block): resource ids mapped to names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExternalRefs {
	entries: Vec<ExternalReference>,
	#[serde(skip)]
	by_id: HashMap<u64, usize>,
}

impl ExternalRefs {
	/// Parse the reference list block.
	pub fn parse(bytes: &[u8], block: &Block) -> Result<Self> {
		let mut cursor = Cursor::at(bytes, block.offset);
		let (start, count) = cursor.read_table()?;

		let mut refs = Self::default();
		if count == 0 {
			return Ok(refs);
		}

		cursor.check_span(start, count, ENTRY_SIZE)?;
		cursor.seek(start)?;
		refs.entries.reserve(count);
		for _ in 0..count {
			let id = cursor.read_u64_le()?;
			let name = cursor.read_offset_string64()?.unwrap_or_default();
			refs.push(ExternalReference { id, name });
		}

		tracing::debug!(count = refs.entries.len(), "external references");
		Ok(refs)
	}

	fn push(&mut self, entry: ExternalReference) {
		self.by_id.entry(entry.id).or_insert(self.entries.len());
		self.entries.push(entry);
	}

	/// Entry for `id`; the first one wins when ids repeat.
	pub fn get(&self, id: u64) -> Option<&ExternalReference> {
		self.by_id.get(&id).map(|index| &self.entries[*index])
	}

	/// Name for `id`.
	pub fn name_of(&self, id: u64) -> Option<&str> {
		self.get(id).map(|entry| entry.name.as_str())
	}

	/// Entries in block order.
	pub fn entries(&self) -> &[ExternalReference] {
		&self.entries
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
