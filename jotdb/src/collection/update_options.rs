/// The two update disciplines of the engine.
///
/// * `Merge` (the default): every field of the patch overwrites or adds the
///   corresponding field on the matched document; fields the patch does not
///   mention are preserved.
/// * `Replace`: the matched document is replaced wholesale by the patch,
///   except its `id` field is re-inserted from the original document; all
///   other original fields are discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// Field-by-field merge of the patch into the matched document.
    #[default]
    Merge,
    /// Wholesale replacement of the matched document, keeping only its id.
    Replace,
}

/// Options for controlling update and save operations.
///
/// `UpdateOptions` selects the [UpdateMode] and whether the operation flushes
/// the Root to disk when it completes. Flushing is on by default; deferring it
/// lets a caller batch several mutations and persist them with one explicit
/// [write](crate::collection::JotCollection::write) call.
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::collection::{merge, replace, UpdateOptions, UpdateMode};
///
/// // Merge the patch into matched documents (the default)
/// let options = merge();
///
/// // Replace matched documents wholesale, keeping only their ids
/// let options = replace();
///
/// // Batch: mutate in memory now, persist later
/// let options = merge().defer_flush();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateOptions {
    mode: UpdateMode,
    defer_flush: bool,
}

impl UpdateOptions {
    /// Creates options with the specified update mode and flushing enabled.
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            defer_flush: false,
        }
    }

    /// Disables the automatic flush after the operation.
    pub fn defer_flush(mut self) -> Self {
        self.defer_flush = true;
        self
    }

    /// Returns the update mode.
    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Returns whether the automatic flush is suppressed.
    pub fn is_flush_deferred(&self) -> bool {
        self.defer_flush
    }
}

/// Creates `UpdateOptions` with merge semantics (the default mode).
pub fn merge() -> UpdateOptions {
    UpdateOptions::new(UpdateMode::Merge)
}

/// Creates `UpdateOptions` with replace semantics.
pub fn replace() -> UpdateOptions {
    UpdateOptions::new(UpdateMode::Replace)
}
