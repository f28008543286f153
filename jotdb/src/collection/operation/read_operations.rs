use super::CollectionState;
use crate::collection::Document;
use crate::common::{ReadExecutor, Value, AUTO_INCREMENT_PATH, DATA_FIELD};
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::query::Query;
use std::sync::Arc;

/// Read-side operations of the engine: the find family, the auto-increment
/// accessor, and dot-path property reads.
///
/// Read operations work directly against the in-memory Root and never touch
/// storage.
#[derive(Clone)]
pub(crate) struct ReadOperations {
    state: Arc<CollectionState>,
}

impl ReadOperations {
    pub(crate) fn new(state: Arc<CollectionState>) -> Self {
        Self { state }
    }

    /// Returns all documents matching the query.
    ///
    /// An `AnyOf` query evaluates each sub-query against the full document
    /// set and concatenates the results in sub-query order; later duplicates
    /// are kept. Every other query shape is a single linear scan in insertion
    /// order. No match is an empty vector, never an error.
    pub(crate) fn find(&self, query: &Query) -> JotResult<Vec<Document>> {
        match query {
            Query::AnyOf(queries) => {
                let mut results = Vec::new();
                for sub_query in queries {
                    results.extend(self.find(sub_query)?);
                }
                Ok(results)
            }
            _ => Ok(self.scan(query)),
        }
    }

    /// Returns the first document matching the query, or `None`.
    pub(crate) fn find_one(&self, query: &Query) -> JotResult<Option<Document>> {
        Ok(self.find(query)?.into_iter().next())
    }

    /// Returns the last document matching the query, or `None`.
    pub(crate) fn find_last(&self, query: &Query) -> JotResult<Option<Document>> {
        Ok(self.find(query)?.pop())
    }

    /// Returns the highest id ever assigned, i.e. the auto-increment counter
    /// minus one. Deleted documents do not lower it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when the Root carries no auto-increment
    /// counter, as in single-object mode.
    pub(crate) fn last_insert_id(&self) -> JotResult<u64> {
        self.state
            .root()
            .read_with(|root| root.get(AUTO_INCREMENT_PATH))
            .and_then(|value| value.as_u64())
            .map(|ai| ai.saturating_sub(1))
            .ok_or_else(|| {
                log::error!("Collection has no auto-increment counter");
                JotError::new(
                    "Collection has no auto-increment counter",
                    ErrorKind::InvalidOperation,
                )
            })
    }

    /// Reads a dot-path property from the Root.
    pub(crate) fn get_prop(&self, path: &str) -> Option<Value> {
        self.state.root().read_with(|root| root.get(path))
    }

    /// Returns a clone of the whole in-memory Root.
    pub(crate) fn root_snapshot(&self) -> Document {
        self.state.root().read_with(|root| root.clone())
    }

    /// Linear scan of the `data` sequence with the shared matcher.
    ///
    /// A Root without a `data` array (single-object mode) simply has nothing
    /// to scan; non-document entries in a hand-edited file are skipped.
    fn scan(&self, query: &Query) -> Vec<Document> {
        self.state.root().read_with(|root| {
            let Some(Value::Array(items)) = root.get_ref(DATA_FIELD) else {
                return Vec::new();
            };

            items
                .iter()
                .filter_map(Value::as_document)
                .filter(|document| query.matches(document))
                .cloned()
                .collect()
        })
    }
}
