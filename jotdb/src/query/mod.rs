//! Queries for selecting documents from a collection.
//!
//! This module provides the query surface of jotdb. A [Query] is an explicit
//! tagged value describing which documents an operation targets; the same
//! query value drives `find`, `update`, and `delete`, and all three evaluate
//! it through one shared matcher.
//!
//! # Creating Queries
//!
//! Queries are created using the free constructors:
//! - `by_id(3)` - match the document whose `id` equals 3
//! - `matching(doc!{ "types": ["grass"] })` - partial match against fields
//! - `predicate(|doc| ...)` - match through an arbitrary predicate
//! - `any_of(vec![...])` - evaluate several sub-queries, concatenating results
//! - `all()` - match every document
//!
//! # Matching Rules
//!
//! A document matches a field specification when every queried field exists on
//! the document with an equal value. Array-valued query fields use
//! order-independent containment instead of equality: the query array must be
//! a subset of the document's array, so `{types: ["grass"]}` matches a
//! document whose `types` is `["grass", "poison"]`. A field absent from the
//! document never matches. An empty specification matches everything.
//!
//! # Examples
//!
//! ```rust,ignore
//! use jotdb::doc;
//! use jotdb::query::{by_id, matching, predicate};
//!
//! let grass = collection.find(&matching(doc!{ "types": ["grass"] }))?;
//! let first = collection.find_one(&by_id(1))?;
//! let adults = collection.find(&predicate(|doc| {
//!     doc.get("age").and_then(|v| v.as_f64()).is_some_and(|age| age >= 18.0)
//! }))?;
//! ```

#[allow(clippy::module_inception)]
mod query;

pub use query::*;
