#![allow(missing_docs)]

use std::path::PathBuf;
use std::process::{Command, Output};

use resdoc_testkit::{EditInfoBuilder, ExternalRefsBuilder, FieldSpec, ManifestBuilder, ResourceBuilder, StructSpec};
use serde_json::{Value, json};

fn sample_file(name: &str) -> PathBuf {
	let manifest = ManifestBuilder::new()
		.structure(
			StructSpec::new(1, "Foo", 8)
				.field(FieldSpec::new("m_value", 14, 0))
				.field(FieldSpec::new("m_flag", 30, 4)),
		)
		.structure(StructSpec::new(2, "Bar", 4).field(FieldSpec::new("m_raw", 15, 0)));
	let bytes = ResourceBuilder::new()
		.block(b"RERL", ExternalRefsBuilder::new().entry(3, "models/crate.vmdl").build())
		.block(
			b"REDI",
			EditInfoBuilder::new()
				.input("models/crate.vmdl", "GAME", 1, 0)
				.special("", "CompileModel", 0, 0)
				.build(),
		)
		.block(b"NTRO", manifest.build())
		.block(b"DATA", vec![0x2A, 0, 0, 0, 1, 0, 0, 0])
		.build();
	resdoc_testkit::write_temp(name, &bytes)
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_resdoc")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(output.status.success(), "command should succeed: {}", String::from_utf8_lossy(&output.stderr));
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

#[test]
fn decode_json_is_the_field_map() {
	let path = sample_file("cli_decode.res");
	let path = path.to_string_lossy().into_owned();

	assert_eq!(run_json(&["decode", &path, "--json"]), json!({"m_value": 42, "m_flag": true}));
	assert_eq!(run_json(&["decode", &path, "--struct", "Bar", "--json"]), json!({"m_raw": 42}));
}

#[test]
fn info_json_reports_blocks_and_type() {
	let path = sample_file("cli_info.res");
	let path = path.to_string_lossy().into_owned();
	let json = run_json(&["info", &path, "--json"]);

	assert_eq!(json["header_version"], 12);
	assert_eq!(json["resource_type"], "Model");
	let tags: Vec<&str> = json["blocks"]
		.as_array()
		.expect("blocks array")
		.iter()
		.filter_map(|block| block["block_type"].as_str())
		.collect();
	assert_eq!(tags, vec!["RERL", "REDI", "NTRO", "DATA"]);
}

#[test]
fn manifest_refs_and_deps_emit_json() {
	let path = sample_file("cli_metadata.res");
	let path = path.to_string_lossy().into_owned();

	let manifest = run_json(&["manifest", &path, "--json"]);
	assert_eq!(manifest["structs"][0]["name"], "Foo");
	assert_eq!(manifest["structs"][0]["fields"][1]["name"], "m_flag");

	let one = run_json(&["manifest", &path, "--struct", "Bar", "--json"]);
	assert_eq!(one["disk_size"], 4);

	let refs = run_json(&["refs", &path, "--json"]);
	assert_eq!(refs, json!([{"id": 3, "name": "models/crate.vmdl"}]));

	let deps = run_json(&["deps", &path, "--json"]);
	assert_eq!(deps["special_dependencies"][0]["compiler_identifier"], "CompileModel");
}

#[test]
fn failures_exit_nonzero_with_message() {
	let path = sample_file("cli_failures.res");
	let path = path.to_string_lossy().into_owned();

	let output = run(&["block", &path, "NOPE"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("invalid block code"));

	let output = run(&["buffers", &path]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("block not found: VBIB"));

	let output = run(&["block", &path, "DATA"]);
	assert!(output.status.success());
	assert!(String::from_utf8_lossy(&output.stdout).contains("2a 00 00 00 01"));
}
