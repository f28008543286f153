//! Storage boundary: file primitives and the JSON codec.
//!
//! Everything below this module is byte- and text-level: checking whether the
//! backing file exists, reading and writing it, making sure its parent
//! directory exists, and turning the in-memory Root into JSON text and back.
//! The engine never touches `std::fs` or `serde_json` directly; it goes
//! through this boundary, and nothing here knows what a collection is.

mod file_store;

pub use file_store::*;
