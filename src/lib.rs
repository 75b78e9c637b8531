//! Public library API for inspecting compiled game resource files.

/// Resource container parsing, introspection manifests, and schema-driven decoding.
pub mod resource;
