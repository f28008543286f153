use crate::collection::operation::CollectionOperations;
use crate::collection::{Document, UpdateOptions};
use crate::common::{
    Value, AUTO_INCREMENT_FIELD, DATA_FIELD, INITIAL_AUTO_INCREMENT, SETTINGS_FIELD,
};
use crate::config::JotConfig;
use crate::errors::JotResult;
use crate::query::Query;
use crate::store::{decode, encode, json_file_name, FileStore};
use std::path::Path;

/// Input to [create](JotCollection::create) and [save](JotCollection::save):
/// either one document or a batch.
///
/// Callers normally rely on the `From` conversions and pass a [Document] or a
/// `Vec<Document>` directly; the batch form assigns ids sequentially and
/// persists once at the end.
#[derive(Clone, Debug)]
pub enum CreateInput {
    /// A single document.
    One(Document),
    /// A batch of documents, processed in order.
    Many(Vec<Document>),
}

impl From<Document> for CreateInput {
    fn from(document: Document) -> Self {
        CreateInput::One(document)
    }
}

impl From<Vec<Document>> for CreateInput {
    fn from(documents: Vec<Document>) -> Self {
        CreateInput::Many(documents)
    }
}

/// A handle to one JSON-file document collection.
///
/// A `JotCollection` owns an in-memory Root tree loaded from a single JSON
/// file and keeps the two reconciled: reads work against memory only, every
/// mutating operation writes the full Root back to the file before returning
/// (unless explicitly deferred). Handles are cheap to clone and share state.
///
/// Two layouts exist, chosen at construction through
/// [JotConfig](crate::config::JotConfig):
///
/// * **Collection mode** (default): the Root is
///   `{"settings": {"ai": n}, "data": [...]}` and the handle offers full CRUD
///   with auto-increment ids.
/// * **Single-object mode**: the Root is an arbitrary keyed object,
///   manipulated through [get_prop](JotCollection::get_prop) /
///   [set_prop](JotCollection::set_prop) or by replacing the Root and calling
///   [write](JotCollection::write).
///
/// There is no close step; the file reflects the last flush.
///
/// # Concurrency
///
/// Operations on one handle are internally serialized, but nothing
/// coordinates distinct handles (or processes) opened on the same path: each
/// keeps its own Root and the last full-file write wins, silently. The
/// library targets single-writer embedding.
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::doc;
/// use jotdb::query::matching;
///
/// let people = jotdb::collection("people")?;
/// people.create(doc! { "name": "Renato", "age": 20 })?;
///
/// let found = people.find(&matching(doc! { "name": "Renato" }))?;
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Clone)]
pub struct JotCollection {
    operations: CollectionOperations,
}

impl std::fmt::Debug for JotCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JotCollection")
            .field("path", &self.path())
            .finish()
    }
}

impl JotCollection {
    /// Opens the collection backed by the given file, creating it if needed.
    ///
    /// The `.json` suffix is appended to the path when not already present
    /// (case-sensitive check) and the parent directory is created if missing.
    /// A missing file is seeded with the mode's initial Root -
    /// `{"settings": {"ai": 1}, "data": []}` in collection mode, `{}` in
    /// single-object mode - then loaded. An existing file is decoded as-is
    /// regardless of mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The database path; an empty path falls back to `index`
    /// * `config` - Pretty-printing and single-object flags
    ///
    /// # Errors
    ///
    /// Fails when the parent directory cannot be created, the file cannot be
    /// read or written, or its content is not a JSON object.
    pub fn open(path: impl AsRef<Path>, config: JotConfig) -> JotResult<Self> {
        let path = json_file_name(path);
        FileStore::ensure_parent_dir(&path)?;

        if !FileStore::exists(&path) {
            let initial = if config.is_single() {
                Document::new()
            } else {
                initial_collection_root()
            };
            FileStore::write(&path, &encode(&initial, config.is_pretty())?)?;
        }

        let root = decode(&FileStore::read(&path)?)?;
        log::debug!("Opened collection at {}", path.display());

        Ok(JotCollection {
            operations: CollectionOperations::new(path, config, root),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        self.operations.path()
    }

    /// Returns the configuration this collection was opened with.
    pub fn config(&self) -> JotConfig {
        self.operations.config()
    }

    /// Creates the given document(s) and returns them with their assigned ids,
    /// in input order.
    ///
    /// Each created document receives the next value of the `settings.ai`
    /// counter as its `id`; the counter only ever moves forward, so ids are
    /// never reused even after deletions. A batch assigns ids sequentially
    /// and flushes once after the whole batch.
    ///
    /// # Arguments
    ///
    /// * `input` - A [Document], a `Vec<Document>`, or an explicit
    ///   [CreateInput]
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` in single-object mode (no `data` sequence
    /// exists there), and storage faults from the flush.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let created = people.create(doc! { "name": "Henry" })?;
    /// assert_eq!(created[0].id(), Some(1));
    ///
    /// let created = people.create(vec![
    ///     doc! { "name": "Renato" },
    ///     doc! { "name": "Frank" },
    /// ])?;
    /// assert_eq!(created.len(), 2);
    /// ```
    pub fn create(&self, input: impl Into<CreateInput>) -> JotResult<Vec<Document>> {
        self.operations.create(input.into())
    }

    /// Invokes the producer once and creates whatever it returns.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// people.create_with(|| doc! { "name": "Henry" })?;
    /// people.create_with(|| vec![doc! { "a": 1 }, doc! { "a": 2 }])?;
    /// ```
    pub fn create_with<F, I>(&self, producer: F) -> JotResult<Vec<Document>>
    where
        F: FnOnce() -> I,
        I: Into<CreateInput>,
    {
        self.create(producer())
    }

    /// Returns all documents matching the query, in insertion order.
    ///
    /// Matching nothing yields an empty vector, never an error. See
    /// [Query](crate::query::Query) for the matching rules; an `AnyOf` query
    /// concatenates its sub-query results without deduplication.
    pub fn find(&self, query: &Query) -> JotResult<Vec<Document>> {
        self.operations.find(query)
    }

    /// Returns the first document matching the query, or `None`.
    pub fn find_one(&self, query: &Query) -> JotResult<Option<Document>> {
        self.operations.find_one(query)
    }

    /// Returns the first document matching the query, or `None`.
    ///
    /// With [all](crate::query::all) this is simply the oldest document still
    /// in the collection.
    pub fn find_first(&self, query: &Query) -> JotResult<Option<Document>> {
        self.operations.find_one(query)
    }

    /// Returns the last document matching the query, or `None`.
    pub fn find_last(&self, query: &Query) -> JotResult<Option<Document>> {
        self.operations.find_last(query)
    }

    /// Updates every document matching the query by merging the patch into it
    /// and returns the matched documents post-mutation.
    ///
    /// Merge semantics: every patch field overwrites or adds the field on the
    /// existing document, everything else is preserved. Use
    /// [update_with_options](JotCollection::update_with_options) for the
    /// replace discipline or to defer the flush.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // {id: 1, a: "a", b: 1} becomes {id: 1, a: "c", b: 1}
    /// people.update(&by_id(1), &doc! { "a": "c" })?;
    /// ```
    pub fn update(&self, query: &Query, patch: &Document) -> JotResult<Vec<Document>> {
        self.operations
            .update(query, patch, &UpdateOptions::default())
    }

    /// Updates with explicit [UpdateOptions].
    ///
    /// With [UpdateMode::Replace](crate::collection::UpdateMode::Replace) the
    /// matched document is replaced wholesale by the patch, keeping only its
    /// original `id`:
    ///
    /// ```rust,ignore
    /// // {id: 1, a: "a", b: 1} becomes {id: 1, a: "c"} - b is gone
    /// people.update_with_options(&by_id(1), &doc! { "a": "c" }, &replace())?;
    /// ```
    pub fn update_with_options(
        &self,
        query: &Query,
        patch: &Document,
        options: &UpdateOptions,
    ) -> JotResult<Vec<Document>> {
        self.operations.update(query, patch, options)
    }

    /// Removes every document matching the query and returns the removed
    /// documents.
    ///
    /// Removing nothing is still success (an empty vector). An `AnyOf` query
    /// removes the matches of each sub-query, flushing once at the end.
    pub fn delete(&self, query: &Query) -> JotResult<Vec<Document>> {
        self.operations.delete(query)
    }

    /// Upserts the given document(s) and returns them as stored.
    ///
    /// Per document: when it carries a truthy `id` and a document with that id
    /// exists, the save becomes an update of that document (merge by default);
    /// otherwise it becomes a create and the document receives a fresh id.
    /// This allows heterogeneous batches mixing new and existing records.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// people.save(vec![
    ///     doc! { "name": "Renato", "age": 20 },  // no id: created
    ///     doc! { "id": 1, "age": 40 },           // id 1 exists: merged
    /// ])?;
    /// ```
    pub fn save(&self, input: impl Into<CreateInput>) -> JotResult<Vec<Document>> {
        self.operations.save(input.into(), &UpdateOptions::default())
    }

    /// Upserts with explicit [UpdateOptions] controlling the update mode of
    /// the existing-id branch and the flush.
    pub fn save_with_options(
        &self,
        input: impl Into<CreateInput>,
        options: &UpdateOptions,
    ) -> JotResult<Vec<Document>> {
        self.operations.save(input.into(), options)
    }

    /// Returns the highest id ever assigned by this collection.
    ///
    /// Equal to `settings.ai - 1`; deletions do not lower it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when the Root has no counter
    /// (single-object mode).
    pub fn last_insert_id(&self) -> JotResult<u64> {
        self.operations.last_insert_id()
    }

    /// Reads a property from the Root by dot path.
    ///
    /// Returns `None` as soon as any path segment is missing; nothing is
    /// auto-created by reads.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let ai = people.get_prop("settings.ai");
    /// let name = settings.get_prop("config.site.name");
    /// ```
    pub fn get_prop(&self, path: &str) -> Option<Value> {
        self.operations.get_prop(path)
    }

    /// Writes a property into the Root by dot path and persists immediately.
    ///
    /// Missing intermediate objects along the path are created; a scalar in
    /// the way is replaced by a fresh object.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// settings.set_prop("config.site.name", "SiteName")?;
    /// ```
    pub fn set_prop(&self, path: &str, value: impl Into<Value>) -> JotResult<()> {
        self.operations.set_prop(path, value.into())
    }

    /// Returns a clone of the whole in-memory Root.
    ///
    /// Chiefly useful in single-object mode together with
    /// [replace_root](JotCollection::replace_root) and
    /// [write](JotCollection::write) for free-form mutation.
    pub fn root(&self) -> Document {
        self.operations.root_snapshot()
    }

    /// Replaces the whole in-memory Root without persisting.
    ///
    /// Call [write](JotCollection::write) to persist the replacement.
    pub fn replace_root(&self, root: Document) {
        self.operations.replace_root(root)
    }

    /// Explicitly flushes the in-memory Root to the backing file and reloads
    /// it.
    ///
    /// The escape hatch for callers that mutated the Root directly (via
    /// [replace_root](JotCollection::replace_root)) and need to persist
    /// without going through a CRUD method.
    pub fn write(&self) -> JotResult<()> {
        self.operations.write()
    }
}

/// The initial Root of a fresh collection-mode file.
fn initial_collection_root() -> Document {
    let mut settings = Document::new();
    settings.insert_raw(
        AUTO_INCREMENT_FIELD.to_string(),
        Value::from(INITIAL_AUTO_INCREMENT),
    );

    let mut root = Document::new();
    root.insert_raw(SETTINGS_FIELD.to_string(), Value::Document(settings));
    root.insert_raw(DATA_FIELD.to_string(), Value::Array(Vec::new()));
    root
}
