/// Raw block dump command.
pub mod block;
/// Vertex/index buffer metadata command.
pub mod buffers;
/// Payload decode command.
pub mod decode;
/// Edit info dependency command.
pub mod deps;
/// File-level information command.
pub mod info;
/// Introspection manifest command.
pub mod manifest;
/// Decoded value printer.
pub mod print;
/// External reference command.
pub mod refs;
/// Shared CLI helpers.
pub mod util;
