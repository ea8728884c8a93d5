//! Code generator for the Language Server Protocol meta-model.
//!
//! Reads Microsoft's machine-readable `metaModel.json` and emits Go source
//! for a protocol package: every data type (`types_gen.go`), the server
//! interface with method constants and dispatch (`server_gen.go`), and a
//! client stub dispatcher (`client_gen.go`).
//!
//! The pipeline is single-pass and synchronous:
//! - deserialize the document into [`model::Model`] (the polymorphic
//!   `Type` node decodes by its `kind` discriminant),
//! - index every named item in a [`generator::Generator`],
//! - emit the three buffers in fixed order (anonymous literal promotion
//!   threads mutable state through the resolver, so order matters).
pub mod assets;
pub mod cli;
pub mod emit;
pub mod error;
pub mod generator;
pub mod methods;
pub mod model;
pub mod names;

pub use emit::GeneratedOutput;
pub use error::Error;
pub use generator::Generator;
pub use model::Model;
