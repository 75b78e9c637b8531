use crate::resource::{
	EditInfo, InputDependency, Manifest, ResourceType, SpecialDependency, StructDefinition, classify_parts, type_from_compiler,
};

fn special(compiler: &str, content: &str) -> SpecialDependency {
	SpecialDependency {
		string: content.to_owned(),
		compiler_identifier: compiler.to_owned(),
		fingerprint: 0,
		user_data: 0,
	}
}

fn input(path: &str) -> InputDependency {
	InputDependency {
		content_relative_filename: path.to_owned(),
		content_search_path: "GAME".to_owned(),
		file_crc: 0,
		flags: 0,
	}
}

fn manifest_rooted_at(name: &str) -> Manifest {
	let root = StructDefinition {
		introspection_version: 4,
		id: 1,
		name: name.to_owned(),
		disk_crc: 0,
		user_version: 0,
		disk_size: 0,
		alignment: 4,
		base_struct_id: None,
		flags: 0,
		fields: Vec::new(),
	};
	Manifest::from_definitions(4, vec![root], Vec::new()).expect("manifest builds")
}

#[test]
fn compiler_identifiers_map_through_the_table() {
	let cases = [
		("CompileRenderMesh", "", ResourceType::Mesh),
		("CompilePsf", "", ResourceType::ParticleSnapshot),
		("CompileVPhysXData", "", ResourceType::PhysicsCollisionMesh),
		("CompileFont", "", ResourceType::BitmapFont),
		("CompileAnimGroup", "", ResourceType::AnimationGroup),
		("DotaItem", "", ResourceType::ArtifactItem),
		("CompileManagedResourceCompiler", "", ResourceType::SboxManagedResource),
		("CompileTexture", "", ResourceType::Texture),
		("CompileModel", "", ResourceType::Model),
		("CompileShader", "", ResourceType::Shader),
		("CompileSomethingNew", "", ResourceType::Unknown),
		("Compile", "", ResourceType::Unknown),
	];
	for (compiler, content, expected) in cases {
		assert_eq!(type_from_compiler(&special(compiler, content)), expected, "{compiler}");
	}
}

#[test]
fn panorama_variant_comes_from_the_content_string() {
	let cases = [
		("Panorama Style Compiler Version", ResourceType::PanoramaStyle),
		("Panorama Script Compiler Version", ResourceType::PanoramaScript),
		("Panorama Layout Compiler Version", ResourceType::PanoramaLayout),
		("Panorama Dynamic Images Compiler Version", ResourceType::PanoramaDynamicImages),
		("Panorama Something Else", ResourceType::Panorama),
	];
	for (content, expected) in cases {
		assert_eq!(type_from_compiler(&special("CompilePanorama", content)), expected, "{content}");
	}
}

#[test]
fn first_known_special_dependency_wins() {
	let info = EditInfo {
		special_dependencies: vec![
			special("CompileMystery", ""),
			special("CompileMaterial", ""),
			special("CompileTexture", ""),
		],
		input_dependencies: vec![input("models/crate.vmdl")],
		..EditInfo::default()
	};
	assert_eq!(classify_parts(Some(&info), None), ResourceType::Material);
}

#[test]
fn single_input_extension_is_the_fallback() {
	let info = EditInfo {
		input_dependencies: vec![input("sounds/ui/click.vsnd")],
		..EditInfo::default()
	};
	assert_eq!(classify_parts(Some(&info), None), ResourceType::Sound);

	let two = EditInfo {
		input_dependencies: vec![input("a.vmdl"), input("b.vmdl")],
		..EditInfo::default()
	};
	assert_eq!(classify_parts(Some(&two), None), ResourceType::Unknown);
}

#[test]
fn manifest_root_is_consulted_last() {
	assert_eq!(
		classify_parts(None, Some(&manifest_rooted_at("CWorldVisibility"))),
		ResourceType::WorldVisibility
	);
	assert_eq!(
		classify_parts(None, Some(&manifest_rooted_at("VSoundEventScript_t"))),
		ResourceType::SoundEventScript
	);
	assert_eq!(classify_parts(None, Some(&manifest_rooted_at("Foo"))), ResourceType::Unknown);
	assert_eq!(classify_parts(None, None), ResourceType::Unknown);
}

#[test]
fn edit_info_beats_manifest() {
	let info = EditInfo {
		special_dependencies: vec![special("CompileRenderMesh", "")],
		..EditInfo::default()
	};
	let manifest = manifest_rooted_at("CWorldVisibility");
	assert_eq!(classify_parts(Some(&info), Some(&manifest)), ResourceType::Mesh);

	let unhelpful = EditInfo::default();
	assert_eq!(classify_parts(Some(&unhelpful), Some(&manifest)), ResourceType::WorldVisibility);
}

#[test]
fn extensions_tolerate_dots_and_compiled_suffix() {
	assert_eq!(ResourceType::from_extension("vmdl"), ResourceType::Model);
	assert_eq!(ResourceType::from_extension(".vtex"), ResourceType::Texture);
	assert_eq!(ResourceType::from_extension("vmat_c"), ResourceType::Material);
	assert_eq!(ResourceType::from_extension("shader_c"), ResourceType::Shader);
	assert_eq!(ResourceType::from_extension("txt"), ResourceType::Unknown);
	for ty in ResourceType::ALL {
		if let Some(ext) = ty.extension() {
			assert_eq!(ResourceType::from_extension(ext), *ty, "{ext}");
		}
		assert_eq!(ResourceType::from_name(ty.as_str()), Some(*ty));
	}
}
