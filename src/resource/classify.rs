use std::fmt;

use serde::{Serialize, Serializer};

use crate::resource::{EditInfo, Manifest, Resource, SpecialDependency};

macro_rules! resource_types {
	($($variant:ident => $ext:expr;)+) => {
		/// Kind of asset a resource holds, inferred from its metadata.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
		pub enum ResourceType {
			/// Not inferable.
			#[default]
			Unknown,
			$(
				#[allow(missing_docs)]
				$variant,
			)+
		}

		impl ResourceType {
			/// Every inferable type, in declaration order.
			pub const ALL: &'static [ResourceType] = &[$(ResourceType::$variant),+];

			/// Parse an exact type name, e.g. `Texture`.
			pub fn from_name(name: &str) -> Option<Self> {
				match name {
					"Unknown" => Some(Self::Unknown),
					$(stringify!($variant) => Some(Self::$variant),)+
					_ => None,
				}
			}

			/// Type name.
			pub fn as_str(self) -> &'static str {
				match self {
					Self::Unknown => "Unknown",
					$(Self::$variant => stringify!($variant),)+
				}
			}

			/// Source file extension without the dot, if the type has one.
			pub fn extension(self) -> Option<&'static str> {
				match self {
					Self::Unknown => None,
					$(Self::$variant => $ext,)+
				}
			}

			/// Map a source file extension (`vmdl`, `.vmdl`, `vmdl_c`) to a type.
			pub fn from_extension(extension: &str) -> Self {
				let extension = extension.trim_start_matches('.');
				let extension = extension.strip_suffix("_c").unwrap_or(extension);
				Self::ALL
					.iter()
					.copied()
					.find(|ty| ty.extension() == Some(extension))
					.unwrap_or_default()
			}
		}
	};
}

resource_types! {
	Animation => Some("vanim");
	AnimationGraph => Some("vanmgrph");
	AnimationGroup => Some("vagrp");
	ArtifactItem => Some("vart");
	BitmapFont => Some("vfont");
	ChoreoSceneFileData => Some("vcdlist");
	CompositeMaterial => Some("vcompmat");
	CSGOEconItem => None;
	CSGOItem => None;
	DotaHeroList => None;
	DotaPatchNotes => None;
	DotaVisualNovels => None;
	EntityLump => Some("vents");
	Map => Some("vmap");
	Material => Some("vmat");
	Mesh => Some("vmesh");
	Model => Some("vmdl");
	Morph => Some("vmorf");
	NmClip => Some("vnmclip");
	NmGraph => Some("vnmgraph");
	NmGraphVariation => None;
	NmSkeleton => Some("vnmskel");
	Panorama => None;
	PanoramaDynamicImages => Some("vpdi");
	PanoramaLayout => Some("vxml");
	PanoramaScript => Some("vjs");
	PanoramaStyle => Some("vcss");
	PanoramaTypescript => Some("vts");
	PanoramaVectorGraphic => Some("vsvg");
	Particle => Some("vpcf");
	ParticleSnapshot => Some("vsnap");
	PhysicsCollisionMesh => Some("vphys");
	PostProcessing => Some("vpost");
	ProcessingGraphInstance => None;
	PulseGraphDef => Some("vpulse");
	ResourceManifest => Some("vrman");
	ResponseRules => Some("vrr");
	SboxManagedResource => None;
	Sequence => Some("vseq");
	Shader => Some("shader");
	SmartProp => Some("vsmart");
	Sound => Some("vsnd");
	SoundEventScript => Some("vsndevts");
	SoundStackScript => Some("vsndstck");
	Texture => Some("vtex");
	VData => Some("vdata");
	World => Some("vwrld");
	WorldNode => Some("vwnod");
	WorldVisibility => Some("vvis");
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for ResourceType {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// Infer the type of an opened resource.
pub fn classify(resource: &Resource) -> ResourceType {
	classify_parts(resource.edit_info(), resource.manifest())
}

/// Infer a type from edit info and manifest. Edit info always wins.
pub fn classify_parts(edit_info: Option<&EditInfo>, manifest: Option<&Manifest>) -> ResourceType {
	if let Some(info) = edit_info {
		let from_compiler = info
			.special_dependencies
			.iter()
			.map(type_from_compiler)
			.find(|ty| *ty != ResourceType::Unknown);
		if let Some(ty) = from_compiler {
			return ty;
		}

		if let [input] = info.input_dependencies.as_slice() {
			let ty = file_extension(&input.content_relative_filename).map_or(ResourceType::Unknown, ResourceType::from_extension);
			if ty != ResourceType::Unknown {
				return ty;
			}
		}
	}

	match manifest.and_then(Manifest::first_struct).map(|item| item.name.as_str()) {
		Some("CWorldVisibility") => ResourceType::WorldVisibility,
		Some("VSoundEventScript_t") => ResourceType::SoundEventScript,
		_ => ResourceType::Unknown,
	}
}

/// Map one special dependency's compiler identifier to a type.
pub fn type_from_compiler(dependency: &SpecialDependency) -> ResourceType {
	let identifier = dependency.compiler_identifier.as_str();
	let identifier = identifier.strip_prefix("Compile").unwrap_or(identifier);

	let mapped = match identifier {
		"Animgraph" => ResourceType::AnimationGraph,
		"AnimGroup" => ResourceType::AnimationGroup,
		"ChoreoSceneFileData" => ResourceType::ChoreoSceneFileData,
		"CSGOEconItem" => ResourceType::CSGOEconItem,
		"CSGOItem" => ResourceType::CSGOItem,
		"DotaHeroList" => ResourceType::DotaHeroList,
		"DotaItem" => ResourceType::ArtifactItem,
		"DotaPatchNotes" => ResourceType::DotaPatchNotes,
		"DotaVisualNovels" => ResourceType::DotaVisualNovels,
		"Font" => ResourceType::BitmapFont,
		"GraphInstance" => ResourceType::ProcessingGraphInstance,
		"NmClip" => ResourceType::NmClip,
		"NmGraph" => ResourceType::NmGraph,
		"NmGraphVariation" => ResourceType::NmGraphVariation,
		"NmSkeleton" => ResourceType::NmSkeleton,
		"Panorama" => match dependency.string.as_str() {
			"Panorama Style Compiler Version" => ResourceType::PanoramaStyle,
			"Panorama Script Compiler Version" => ResourceType::PanoramaScript,
			"Panorama Layout Compiler Version" => ResourceType::PanoramaLayout,
			"Panorama Dynamic Images Compiler Version" => ResourceType::PanoramaDynamicImages,
			_ => ResourceType::Panorama,
		},
		"Psf" => ResourceType::ParticleSnapshot,
		"PulseGraphDef" => ResourceType::PulseGraphDef,
		"RenderMesh" => ResourceType::Mesh,
		"ResponseRules" => ResourceType::ResponseRules,
		"SBData" | "ManagedResourceCompiler" => ResourceType::SboxManagedResource,
		"SmartProp" => ResourceType::SmartProp,
		"TypeScript" => ResourceType::PanoramaTypescript,
		"VCompMat" => ResourceType::CompositeMaterial,
		"VData" => ResourceType::VData,
		"VectorGraphic" => ResourceType::PanoramaVectorGraphic,
		"VPhysXData" => ResourceType::PhysicsCollisionMesh,
		_ => ResourceType::Unknown,
	};

	if mapped != ResourceType::Unknown {
		return mapped;
	}
	ResourceType::from_name(identifier).unwrap_or_default()
}

fn file_extension(path: &str) -> Option<&str> {
	let name = path.rsplit(['/', '\\']).next()?;
	name.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests;
