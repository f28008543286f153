use crate::collection::Document;
use crate::common::Value;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// A predicate over documents, usable as a query.
///
/// Stored behind an [Arc] so queries stay cheaply clonable.
pub type Predicate = Arc<dyn Fn(&Document) -> bool + Send + Sync>;

/// A query describing which documents an operation targets.
///
/// Instead of inspecting argument shapes at runtime, every operation takes an
/// explicit `Query` value; the caller states up front whether a number is an
/// id, a document is a field specification, and so on.
///
/// # Variants
///
/// * `All` - matches every document; the "absent query" form
/// * `ById` - matches the single document whose `id` field equals the value
/// * `ByFields` - partial match: every field of the specification must exist
///   on the document with an equal value, arrays by containment
/// * `ByPredicate` - matches documents for which the predicate returns `true`
/// * `AnyOf` - evaluates each sub-query in order; `find` concatenates the
///   per-query results without deduplication, `update`/`delete` process each
///   sub-query in turn
#[derive(Clone, Default)]
pub enum Query {
    /// Matches every document.
    #[default]
    All,
    /// Matches the document whose `id` field equals the given value.
    ById(u64),
    /// Matches documents containing every field of the specification.
    ByFields(Document),
    /// Matches documents satisfying the predicate.
    ByPredicate(Predicate),
    /// Evaluates each sub-query against the full document set.
    AnyOf(Vec<Query>),
}

impl Query {
    /// Applies this query to a document and returns whether it matches.
    ///
    /// This is the single evaluation routine shared by every operation; the
    /// containment rule for array-valued fields lives here and nowhere else.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to evaluate
    ///
    /// # Returns
    ///
    /// `true` if the document matches this query, `false` otherwise.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Query::All => true,
            Query::ById(id) => document.id() == Some(*id),
            Query::ByFields(spec) => fields_match(spec, document),
            Query::ByPredicate(predicate) => predicate(document),
            Query::AnyOf(queries) => queries.iter().any(|query| query.matches(document)),
        }
    }
}

/// Evaluates a partial-match specification against a document.
///
/// Every field present in the specification must exist on the document and
/// match; fields the specification does not mention are ignored. An empty
/// specification therefore matches every document.
fn fields_match(spec: &Document, document: &Document) -> bool {
    spec.iter().all(|(field, expected)| match document.get(field) {
        Some(actual) => values_match(expected, &actual),
        None => false,
    })
}

/// Compares a single queried value against the document's value.
///
/// Two arrays match by order-independent containment: every element of the
/// query array must occur somewhere in the document array. Anything else
/// matches by structural equality.
fn values_match(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Array(query_items), Value::Array(doc_items)) => query_items
            .iter()
            .all(|item| doc_items.contains(item)),
        _ => expected == actual,
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::All => write!(f, "(all)"),
            Query::ById(id) => write!(f, "(id == {})", id),
            Query::ByFields(spec) => write!(f, "(matches {})", spec),
            Query::ByPredicate(_) => write!(f, "(predicate)"),
            Query::AnyOf(queries) => {
                write!(f, "(any of [")?;
                for (i, query) in queries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", query)?;
                }
                write!(f, "])")
            }
        }
    }
}

impl Debug for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<u64> for Query {
    fn from(id: u64) -> Self {
        Query::ById(id)
    }
}

impl From<Document> for Query {
    fn from(spec: Document) -> Self {
        Query::ByFields(spec)
    }
}

impl From<Vec<Query>> for Query {
    fn from(queries: Vec<Query>) -> Self {
        Query::AnyOf(queries)
    }
}

/// Creates a query that matches all documents.
pub fn all() -> Query {
    Query::All
}

/// Creates a query that matches the document with the given id.
pub fn by_id(id: u64) -> Query {
    Query::ById(id)
}

/// Creates a partial-match query from a field specification.
///
/// # Examples
///
/// ```rust,ignore
/// let query = matching(doc!{ "types": ["grass"] });
/// ```
pub fn matching(spec: Document) -> Query {
    Query::ByFields(spec)
}

/// Creates a query from a predicate function.
pub fn predicate<F>(predicate: F) -> Query
where
    F: Fn(&Document) -> bool + Send + Sync + 'static,
{
    Query::ByPredicate(Arc::new(predicate))
}

/// Creates a query that evaluates each of the given sub-queries.
pub fn any_of<I>(queries: I) -> Query
where
    I: IntoIterator<Item = Query>,
{
    Query::AnyOf(queries.into_iter().collect())
}
