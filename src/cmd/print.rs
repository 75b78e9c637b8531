use resdoc::resource::Value;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/structs.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

impl PrintOptions {
	/// Preset that prints whole arrays and deep trees.
	pub fn unlimited() -> Self {
		Self {
			max_fields_per_struct: usize::MAX,
			max_string_len: usize::MAX,
			max_array_items: usize::MAX,
			max_print_depth: u32::MAX,
		}
	}
}

/// Print one decoded value tree.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{}[... {} items]", pad, items.len());
				return;
			}
			println!("{}[", pad);
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{}  ... {} more", pad, items.len() - options.max_array_items);
			}
			println!("{}]", pad);
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				println!("{}{} {{ ... }}", pad, item.type_name);
				return;
			}
			println!("{}{} {{", pad, item.type_name);
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				print!("{}  {} = ", pad, field.name);
				if matches!(field.value, Value::Struct(_) | Value::Array(_)) {
					println!();
					print_value(&field.value, indent + 4, depth + 1, options);
				} else {
					print_value(&field.value, 0, depth + 1, options);
				}
			}
			if item.fields.len() > options.max_fields_per_struct {
				println!("{}  ... {} more fields", pad, item.fields.len() - options.max_fields_per_struct);
			}
			println!("{}}}", pad);
		}
		scalar => println!("{}{}", pad, format_scalar(scalar, options)),
	}
}

/// Render a non-container value on one line.
pub fn format_scalar(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Opaque => "<opaque>".to_owned(),
		Value::Bool(v) => v.to_string(),
		Value::I64(v) => v.to_string(),
		Value::U64(v) => v.to_string(),
		Value::F32(v) => v.to_string(),
		Value::F64(v) => v.to_string(),
		Value::String(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		Value::Color([r, g, b, a]) => format!("rgba({r}, {g}, {b}, {a})"),
		Value::Vector2(items) => floats(items),
		Value::Vector3(items) => floats(items),
		Value::Vector4(items) | Value::Quaternion(items) => floats(items),
		Value::Matrix3x4(items) => floats(items),
		Value::Transform(items) => floats(items),
		Value::ExternalRef { id, name: Some(name) } => format!("ref 0x{id:016x} \"{name}\""),
		Value::ExternalRef { id, name: None } => format!("ref 0x{id:016x}"),
		Value::Enum { raw, name: Some(name) } => format!("{name} ({raw})"),
		Value::Enum { raw, name: None } => raw.to_string(),
		Value::Bytes(v) => format!("bytes[{}]", v.len()),
		Value::Array(items) => format!("[{} items]", items.len()),
		Value::Struct(item) => format!("{} {{ ... }}", item.type_name),
	}
}

fn floats(items: &[f32]) -> String {
	let parts: Vec<String> = items.iter().map(f32::to_string).collect();
	format!("[{}]", parts.join(", "))
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
