//! Collections and documents.
//!
//! This module provides the core storage abstraction of jotdb. A
//! [JotCollection] keeps an ordered sequence of schemaless documents in one
//! JSON file and supports create, find, update, delete, and upsert operations
//! driven by [queries](crate::query).
//!
//! # Documents
//!
//! A [Document] is a key-value map where keys are strings and values are
//! [Value](crate::common::Value) objects, with insertion order preserved.
//! Nested fields are addressed with a `.` separator.
//!
//! ```rust,ignore
//! use jotdb::doc;
//!
//! let doc = doc! {
//!     "name": "Alice",
//!     "address": { "city": "New York" },
//!     "tags": ["admin"]
//! };
//! ```
//!
//! # Collections
//!
//! ```rust,ignore
//! use jotdb::doc;
//! use jotdb::query::matching;
//!
//! let users = jotdb::collection("users")?;
//!
//! // Create - the engine assigns the id
//! let created = users.create(doc! { "name": "Alice" })?;
//!
//! // Query
//! let results = users.find(&matching(doc! { "name": "Alice" }))?;
//! ```
//!
//! # Document IDs
//!
//! Every document created in collection mode receives an `id` field taken
//! from the collection's auto-increment counter (`settings.ai`). Ids are
//! strictly increasing and never reused, even after deletions.

#[allow(clippy::module_inception)]
mod collection;
mod document;
mod update_options;

pub(crate) mod operation;

pub use collection::*;
pub use document::*;
pub use update_options::*;
