//! # jotdb - Single-File JSON Document Database
//!
//! jotdb is a lightweight, embedded document database that persists an entire
//! collection as one JSON file on disk. It targets small tools, prototypes,
//! and configuration storage: everything lives in memory, every mutation is
//! flushed back to the file, and the file stays human-readable (optionally
//! tab-indented).
//!
//! ## Key Features
//!
//! - **Embedded**: no server process, no background threads - just a file
//! - **Schemaless**: documents are open-ended JSON objects
//! - **Partial-match queries**: query by id, by example document (with
//!   order-independent array containment), by predicate, or any combination
//! - **Auto-increment ids**: strictly increasing, never reused
//! - **Upsert**: heterogeneous batches mixing new and existing records
//! - **Single-object mode**: store one keyed configuration tree and access it
//!   with dot paths
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jotdb::doc;
//! use jotdb::query::{by_id, matching};
//!
//! # fn main() -> jotdb::errors::JotResult<()> {
//! // Create or open a collection (writes people.json)
//! let people = jotdb::collection("people")?;
//!
//! // Create documents - ids are assigned automatically
//! people.create(vec![
//!     doc! { "name": "Pikachu", "types": ["electric"] },
//!     doc! { "name": "Bulbasaur", "types": ["grass", "poison"] },
//! ])?;
//!
//! // Partial-match query: array fields match by containment
//! let grass = people.find(&matching(doc! { "types": ["grass"] }))?;
//! assert_eq!(grass.len(), 1);
//!
//! // Update by id, merging the patch into the document
//! people.update(&by_id(1), &doc! { "level": 25 })?;
//!
//! // Delete and upsert
//! people.delete(&by_id(2))?;
//! people.save(doc! { "id": 1, "level": 26 })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Single-Object Mode
//!
//! ```rust,ignore
//! let settings = jotdb::single("settings")?;
//! settings.set_prop("config.site.name", "SiteName")?;
//! assert!(settings.get_prop("config.site.name").is_some());
//! ```
//!
//! ## Consistency Model
//!
//! One handle owns one in-memory Root. Mutating operations follow a
//! read-modify-write cycle: mutate the Root, serialize it in full, write the
//! file, reload. Nothing coordinates multiple handles or processes on the
//! same path - the last writer wins. jotdb is a single-writer embedding
//! library, not a database server.
//!
//! ## Module Organization
//!
//! - [`collection`] - Collections, documents, and update options
//! - [`common`] - Common types, constants, and the value model
//! - [`config`] - Collection configuration
//! - [`errors`] - Error types and result definitions
//! - [`query`] - Query values and matching rules
//! - [`store`] - File primitives and the JSON codec

use crate::collection::JotCollection;
use crate::config::JotConfig;
use crate::errors::JotResult;
use std::path::Path;

pub mod collection;
pub mod common;
pub mod config;
pub mod errors;
pub mod query;
pub mod store;

/// Opens a collection with default configuration.
///
/// # Examples
///
/// ```rust,ignore
/// let people = jotdb::collection("people")?;
/// ```
pub fn collection(path: impl AsRef<Path>) -> JotResult<JotCollection> {
    JotCollection::open(path, JotConfig::new())
}

/// Opens a collection that serializes its backing file with tab indentation.
pub fn pretty(path: impl AsRef<Path>) -> JotResult<JotCollection> {
    JotCollection::open(path, JotConfig::new().pretty(true))
}

/// Opens a collection in single-object mode.
///
/// The Root is an arbitrary keyed object accessed through
/// [get_prop](crate::collection::JotCollection::get_prop) /
/// [set_prop](crate::collection::JotCollection::set_prop).
pub fn single(path: impl AsRef<Path>) -> JotResult<JotCollection> {
    JotCollection::open(path, JotConfig::new().single(true))
}

/// Opens a collection in single-object mode with tab-indented serialization.
pub fn single_pretty(path: impl AsRef<Path>) -> JotResult<JotCollection> {
    JotCollection::open(path, JotConfig::new().single(true).pretty(true))
}
