use super::{CollectionState, ReadOperations};
use crate::collection::{CreateInput, Document, UpdateMode, UpdateOptions};
use crate::common::{
    Value, WriteExecutor, AUTO_INCREMENT_FIELD, DATA_FIELD, DOC_ID, SETTINGS_FIELD,
};
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::query::Query;
use std::sync::Arc;

/// Write-side operations of the engine: create, update, delete, save, and
/// dot-path property writes.
///
/// Every public write mutates the in-memory Root first and then - unless the
/// caller deferred it - flushes the full Root to the backing file and reloads
/// it. Multi-document forms mutate everything in memory and flush exactly
/// once at the end.
#[derive(Clone)]
pub(crate) struct WriteOperations {
    state: Arc<CollectionState>,
    read_operations: ReadOperations,
}

impl WriteOperations {
    pub(crate) fn new(state: Arc<CollectionState>, read_operations: ReadOperations) -> Self {
        Self {
            state,
            read_operations,
        }
    }

    /// Creates the given document(s), assigning each the next auto-increment
    /// id, and returns them in input order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the Root has no `data` array to append to,
    /// which is the case in single-object mode.
    pub(crate) fn create(&self, input: CreateInput) -> JotResult<Vec<Document>> {
        let created = self.state.root().write_with(|root| match input {
            CreateInput::One(document) => Ok(vec![Self::create_one(root, document)?]),
            CreateInput::Many(documents) => documents
                .into_iter()
                .map(|document| Self::create_one(root, document))
                .collect(),
        })?;

        self.state.flush_and_reload()?;
        Ok(created)
    }

    /// Updates every document matching the query with the patch and returns
    /// the matched documents post-mutation.
    ///
    /// A `ById` query targets a single document; an `AnyOf` query processes
    /// each sub-query in turn with the flush held back until the outer call
    /// completes. No match returns an empty vector.
    pub(crate) fn update(
        &self,
        query: &Query,
        patch: &Document,
        options: &UpdateOptions,
    ) -> JotResult<Vec<Document>> {
        let updated = self.update_in_memory(query, patch, options.mode())?;
        if !options.is_flush_deferred() {
            self.state.flush_and_reload()?;
        }
        Ok(updated)
    }

    /// Removes every document matching the query and returns the removed
    /// documents. Removing nothing is still success.
    pub(crate) fn delete(&self, query: &Query) -> JotResult<Vec<Document>> {
        let removed = self.delete_in_memory(query);
        self.state.flush_and_reload()?;
        Ok(removed)
    }

    /// Upserts the given document(s): a document whose `id` is truthy and
    /// present in the collection becomes an update of that document, anything
    /// else becomes a create. Returns the saved documents; the flush happens
    /// once after the whole batch unless deferred.
    pub(crate) fn save(
        &self,
        input: CreateInput,
        options: &UpdateOptions,
    ) -> JotResult<Vec<Document>> {
        let documents = match input {
            CreateInput::One(document) => vec![document],
            CreateInput::Many(documents) => documents,
        };

        let mut saved = Vec::new();
        for document in documents {
            saved.extend(self.save_one(document, options.mode())?);
        }

        if !options.is_flush_deferred() {
            self.state.flush_and_reload()?;
        }
        Ok(saved)
    }

    /// Writes a dot-path property into the Root, auto-creating missing
    /// intermediate objects, and persists immediately.
    pub(crate) fn set_prop(&self, path: &str, value: Value) -> JotResult<()> {
        self.state.root().write_with(|root| root.put(path, value))?;
        self.state.flush_and_reload()
    }

    /// Replaces the whole in-memory Root without persisting.
    ///
    /// The caller persists with [write](crate::collection::JotCollection::write)
    /// when done; this mirrors direct field manipulation in single-object mode.
    pub(crate) fn replace_root(&self, root: Document) {
        self.state.root().write_with(|current| *current = root);
    }

    /// Appends one document to `data`, assigning the next id when the Root
    /// carries an auto-increment counter.
    fn create_one(root: &mut Document, mut document: Document) -> JotResult<Document> {
        if !matches!(root.get_ref(DATA_FIELD), Some(Value::Array(_))) {
            log::error!("Cannot create documents without a data sequence");
            return Err(JotError::new(
                "Cannot create documents in a single-object collection",
                ErrorKind::InvalidInput,
            ));
        }

        // a root without a counter (hand-edited file) still appends, it just
        // assigns no id
        if let Some(id) = Self::take_next_id(root) {
            document.put(DOC_ID, id)?;
        }

        if let Some(Value::Array(items)) = root.get_mut(DATA_FIELD) {
            items.push(Value::Document(document.clone()));
        }
        Ok(document)
    }

    /// Reads the auto-increment counter and advances it by one, returning the
    /// id to assign.
    fn take_next_id(root: &mut Document) -> Option<u64> {
        let Some(Value::Document(settings)) = root.get_mut(SETTINGS_FIELD) else {
            return None;
        };
        let current = settings.get_ref(AUTO_INCREMENT_FIELD)?.as_u64()?;
        settings.insert_raw(AUTO_INCREMENT_FIELD.to_string(), Value::from(current + 1));
        Some(current)
    }

    fn update_in_memory(
        &self,
        query: &Query,
        patch: &Document,
        mode: UpdateMode,
    ) -> JotResult<Vec<Document>> {
        match query {
            Query::AnyOf(queries) => {
                let mut updated = Vec::new();
                for sub_query in queries {
                    updated.extend(self.update_in_memory(sub_query, patch, mode)?);
                }
                Ok(updated)
            }
            _ => self.state.root().write_with(|root| {
                let Some(Value::Array(items)) = root.get_mut(DATA_FIELD) else {
                    return Ok(Vec::new());
                };

                let single_target = matches!(query, Query::ById(_));
                let mut updated = Vec::new();

                for item in items.iter_mut() {
                    let Value::Document(existing) = item else {
                        continue;
                    };
                    if !query.matches(existing) {
                        continue;
                    }

                    match mode {
                        UpdateMode::Merge => {
                            existing.merge(patch);
                            updated.push(existing.clone());
                        }
                        UpdateMode::Replace => {
                            let mut replacement = patch.clone();
                            if let Some(id) = existing.id() {
                                replacement.put(DOC_ID, id)?;
                            }
                            *existing = replacement.clone();
                            updated.push(replacement);
                        }
                    }

                    if single_target {
                        break;
                    }
                }
                Ok(updated)
            }),
        }
    }

    fn delete_in_memory(&self, query: &Query) -> Vec<Document> {
        match query {
            Query::AnyOf(queries) => {
                let mut removed = Vec::new();
                for sub_query in queries {
                    removed.extend(self.delete_in_memory(sub_query));
                }
                removed
            }
            _ => self.state.root().write_with(|root| {
                let Some(Value::Array(items)) = root.get_mut(DATA_FIELD) else {
                    return Vec::new();
                };

                let mut removed = Vec::new();
                items.retain(|item| match item {
                    Value::Document(document) if query.matches(document) => {
                        removed.push(document.clone());
                        false
                    }
                    _ => true,
                });
                removed
            }),
        }
    }

    fn save_one(&self, document: Document, mode: UpdateMode) -> JotResult<Vec<Document>> {
        // only a truthy id addresses an existing document; id 0 or a
        // non-integer id falls through to create
        if let Some(id) = document.id().filter(|id| *id != 0) {
            if self.read_operations.find_one(&Query::ById(id))?.is_some() {
                return self.update_in_memory(&Query::ById(id), &document, mode);
            }
        }

        self.state
            .root()
            .write_with(|root| Self::create_one(root, document))
            .map(|created| vec![created])
    }
}
