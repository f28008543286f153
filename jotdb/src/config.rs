//! Configuration for jotdb collections.

/// Configuration of a [JotCollection](crate::collection::JotCollection).
///
/// Two flags control a collection's behavior, both defaulting to `false`:
///
/// * `pretty` - serialize the backing file with tab indentation instead of
///   the compact single-line form
/// * `single` - single-object mode: the Root is an arbitrary keyed object
///   manipulated through dot-path access instead of a document collection
///
/// The flags only govern how a *fresh* file is seeded and how the Root is
/// serialized; an existing file is loaded as-is regardless of mode.
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::config::JotConfig;
///
/// let config = JotConfig::new().pretty(true).single(true);
/// assert!(config.is_pretty());
/// assert!(config.is_single());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JotConfig {
    pretty: bool,
    single: bool,
}

impl JotConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        JotConfig::default()
    }

    /// Sets whether the backing file is serialized with tab indentation.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets whether the collection operates in single-object mode.
    pub fn single(mut self, single: bool) -> Self {
        self.single = single;
        self
    }

    /// Returns whether pretty serialization is enabled.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Returns whether single-object mode is enabled.
    pub fn is_single(&self) -> bool {
        self.single
    }
}
