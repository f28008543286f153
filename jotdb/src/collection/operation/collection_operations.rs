use super::{ReadOperations, WriteOperations};
use crate::collection::{CreateInput, Document, UpdateOptions};
use crate::common::{atomic, Atomic, ReadExecutor, Value, WriteExecutor};
use crate::config::JotConfig;
use crate::errors::JotResult;
use crate::query::Query;
use crate::store::{decode, encode, FileStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared state of one collection handle: the backing file path, the
/// configuration, and the in-memory Root.
///
/// The Root is the authoritative copy for the handle's lifetime; every
/// write-enabled operation reconciles it with the file through
/// [CollectionState::flush_and_reload]. There is no cross-handle or
/// cross-process coordination - two handles on the same path race, and the
/// last full-file write wins.
pub(crate) struct CollectionState {
    path: PathBuf,
    config: JotConfig,
    root: Atomic<Document>,
}

impl CollectionState {
    pub(crate) fn new(path: PathBuf, config: JotConfig, root: Document) -> Arc<Self> {
        Arc::new(CollectionState {
            path,
            config,
            root: atomic(root),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn config(&self) -> JotConfig {
        self.config
    }

    pub(crate) fn root(&self) -> &Atomic<Document> {
        &self.root
    }

    /// Serializes the Root, writes it to the backing file, and reloads the
    /// Root from what was written.
    ///
    /// After this returns, the on-disk content equals the serialization of
    /// the in-memory Root. Any failure aborts the operation; there is no
    /// retry and no partial-write recovery.
    pub(crate) fn flush_and_reload(&self) -> JotResult<()> {
        let text = self
            .root
            .read_with(|root| encode(root, self.config.is_pretty()))?;
        FileStore::write(&self.path, &text)?;

        let reloaded = decode(&FileStore::read(&self.path)?)?;
        self.root.write_with(|root| *root = reloaded);

        log::debug!("Flushed collection to {}", self.path.display());
        Ok(())
    }
}

/// Facade over the engine internals of one collection.
///
/// Owns the shared [CollectionState] and the read/write operation handlers,
/// and forwards every public operation of
/// [JotCollection](crate::collection::JotCollection) to the handler that
/// implements it.
#[derive(Clone)]
pub(crate) struct CollectionOperations {
    state: Arc<CollectionState>,
    read_operations: ReadOperations,
    write_operations: WriteOperations,
}

impl CollectionOperations {
    pub(crate) fn new(path: PathBuf, config: JotConfig, root: Document) -> Self {
        let state = CollectionState::new(path, config, root);
        let read_operations = ReadOperations::new(state.clone());
        let write_operations = WriteOperations::new(state.clone(), read_operations.clone());

        Self {
            state,
            read_operations,
            write_operations,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        self.state.path()
    }

    pub(crate) fn config(&self) -> JotConfig {
        self.state.config()
    }

    pub(crate) fn find(&self, query: &Query) -> JotResult<Vec<Document>> {
        self.read_operations.find(query)
    }

    pub(crate) fn find_one(&self, query: &Query) -> JotResult<Option<Document>> {
        self.read_operations.find_one(query)
    }

    pub(crate) fn find_last(&self, query: &Query) -> JotResult<Option<Document>> {
        self.read_operations.find_last(query)
    }

    pub(crate) fn last_insert_id(&self) -> JotResult<u64> {
        self.read_operations.last_insert_id()
    }

    pub(crate) fn get_prop(&self, path: &str) -> Option<Value> {
        self.read_operations.get_prop(path)
    }

    pub(crate) fn root_snapshot(&self) -> Document {
        self.read_operations.root_snapshot()
    }

    pub(crate) fn create(&self, input: CreateInput) -> JotResult<Vec<Document>> {
        self.write_operations.create(input)
    }

    pub(crate) fn update(
        &self,
        query: &Query,
        patch: &Document,
        options: &UpdateOptions,
    ) -> JotResult<Vec<Document>> {
        self.write_operations.update(query, patch, options)
    }

    pub(crate) fn delete(&self, query: &Query) -> JotResult<Vec<Document>> {
        self.write_operations.delete(query)
    }

    pub(crate) fn save(
        &self,
        input: CreateInput,
        options: &UpdateOptions,
    ) -> JotResult<Vec<Document>> {
        self.write_operations.save(input, options)
    }

    pub(crate) fn set_prop(&self, path: &str, value: Value) -> JotResult<()> {
        self.write_operations.set_prop(path, value)
    }

    pub(crate) fn replace_root(&self, root: Document) {
        self.write_operations.replace_root(root)
    }

    pub(crate) fn write(&self) -> JotResult<()> {
        self.state.flush_and_reload()
    }
}
