use smallvec::SmallVec;

use crate::common::{Value, DOC_ID, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, JotError, JotResult};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

type FieldVec<'a> = SmallVec<[&'a str; 8]>;

/// Represents a document in a jotdb collection.
///
/// A document is composed of key-value pairs. The key is always a [String] and
/// the value is a [Value]. Insertion order of the fields is preserved, both in
/// memory and in the persisted JSON text.
///
/// Documents support nested documents as well. The key of a nested field is a
/// [String] separated by the field separator `.`.
///
/// For example, if a document has a nested document `{"a": {"b": 1}}`, then the
/// value inside the nested document can be retrieved by calling
/// `document.get("a.b")`.
///
/// In collection mode the engine assigns every stored document an `id` field, a
/// strictly increasing integer taken from the collection's auto-increment
/// counter. Documents carry no schema beyond that; different documents in the
/// same collection may have entirely different field sets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top-level fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// This method inserts a key-value pair into the document. If the key
    /// already exists, its value is updated. The method supports both top-level
    /// and embedded keys (e.g., `"user.name"` or `"config.site.name"`); missing
    /// intermediate documents along an embedded key are created on the fly.
    ///
    /// # Arguments
    ///
    /// * `key` - The key as a string slice. Cannot be empty.
    /// * `value` - The value to associate with the key. Can be any type that
    ///   implements `Into<Value>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or any embedded segment of it is empty.
    ///
    /// # Examples
    ///
    /// Basic insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    ///
    /// Nested insertion:
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("config.site.name", "SiteName")?;
    /// assert_eq!(doc.get("config.site.name"), Some(Value::from("SiteName")));
    /// ```
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> JotResult<()> {
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(JotError::new(
                "Document does not support empty key",
                ErrorKind::ValidationError,
            ));
        }

        let value = value.into();

        // if the key contains the field separator, split the segments and put
        // the value into the embedded document it addresses
        if key.contains(FIELD_SEPARATOR) {
            let splits: FieldVec = key.split(FIELD_SEPARATOR).collect();
            self.deep_put(&splits, value)
        } else {
            self.data.insert(key.to_string(), value);
            Ok(())
        }
    }

    /// Returns the [Value] to which the specified key is associated, or `None`
    /// if this document contains no mapping for the key.
    ///
    /// The method supports both top-level and embedded keys
    /// (e.g., `"settings.ai"`). A top-level field whose name literally contains
    /// the separator takes precedence over embedded traversal. Traversal stops
    /// with `None` the moment an intermediate segment is missing or is not a
    /// document; nothing is auto-created on the read path.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up as a string slice.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ "name": "Alice", "address": { "city": "New York" } };
    /// assert_eq!(doc.get("name"), Some(Value::from("Alice")));
    /// assert_eq!(doc.get("address.city"), Some(Value::from("New York")));
    /// assert_eq!(doc.get("address.zip"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.data.get(key) {
            Some(value) => Some(value.clone()),
            None => {
                // only try embedded traversal when not found at top level
                if key.contains(FIELD_SEPARATOR) {
                    self.deep_get(key)
                } else {
                    None
                }
            }
        }
    }

    /// Borrowing accessor for a top level field.
    ///
    /// Unlike [Document::get] this performs no embedded traversal and no
    /// cloning; the engine uses it on scan paths where copying the value
    /// would be wasted work.
    pub fn get_ref(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Mutable borrowing accessor for a top level field.
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Returns the engine-assigned id of this document, if it has one.
    ///
    /// Only non-negative integer `id` values count; a document a caller built
    /// by hand with `id: "abc"` is treated as having no id.
    pub fn id(&self) -> Option<u64> {
        self.data.get(DOC_ID).and_then(Value::as_u64)
    }

    /// Removes a top level key from the document, returning its value.
    ///
    /// The remaining fields keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Checks if a top level key exists in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Merges another document into this one, field by field.
    ///
    /// Every top-level field of `other` overwrites or adds the corresponding
    /// field on this document; fields not mentioned in `other` are preserved.
    /// The merge is shallow: a nested document in `other` replaces the whole
    /// nested document here, it is not merged recursively.
    ///
    /// This is the primitive behind the default (non-identical) update mode.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = doc!{ "id": 1, "a": "a", "b": 1 };
    /// doc.merge(&doc!{ "a": "c" });
    /// assert_eq!(doc.get("a"), Some(Value::from("c")));
    /// assert_eq!(doc.get("b"), Some(Value::from(1)));
    /// ```
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Gets an iterator over the key-value pairs of this document, in
    /// insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Gets an iterator over the top-level keys of this document.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Inserts a field without separator splitting or validation.
    ///
    /// Decoding must preserve keys exactly as they appear in the file, so the
    /// deserializer bypasses [Document::put] (a literal `"a.b"` key in the file
    /// must stay a literal key).
    pub(crate) fn insert_raw(&mut self, key: String, value: Value) {
        self.data.insert(key, value);
    }

    fn deep_get(&self, key: &str) -> Option<Value> {
        let splits: FieldVec = key.split(FIELD_SEPARATOR).collect();
        let mut current = self;

        let (last, intermediate) = splits.split_last()?;
        for segment in intermediate {
            match current.data.get(*segment) {
                Some(Value::Document(doc)) => current = doc,
                _ => return None,
            }
        }
        current.data.get(*last).cloned()
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> JotResult<()> {
        let Some((key, remaining_splits)) = splits.split_first() else {
            log::error!("Empty embedded key");
            return Err(JotError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        };
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(JotError::new(
                "Document does not support empty key",
                ErrorKind::ValidationError,
            ));
        }

        if remaining_splits.is_empty() {
            // last segment, simply put in the current document
            self.data.insert(key.to_string(), value);
            Ok(())
        } else if let Some(Value::Document(doc)) = self.data.get_mut(*key) {
            // the current level is an embedded document, descend into it
            doc.deep_put(remaining_splits, value)
        } else {
            // the current level is missing or not a document, create a fresh one
            let mut nested_doc = Document::new();
            nested_doc.deep_put(remaining_splits, value)?;
            self.data
                .insert(key.to_string(), Value::Document(nested_doc));
            Ok(())
        }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "{{}}"),
        }
    }
}

impl From<IndexMap<String, Value>> for Document {
    fn from(data: IndexMap<String, Value>) -> Self {
        Document { data }
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (key, value) in self.data.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = Document::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.insert_raw(key, value);
        }
        Ok(doc)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Strips the quotes `stringify!` leaves around string-literal keys in the
/// [doc!](crate::doc) macro.
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] from key-value pairs.
///
/// Keys may be identifiers or string literals; values may be literals, nested
/// `{ ... }` documents, `[ ... ]` arrays, or arbitrary expressions convertible
/// into [Value](crate::common::Value).
///
/// # Examples
///
/// ```ignore
/// let doc = doc! {
///     "name": "Bulbasaur",
///     "types": ["grass", "poison"],
///     "stats": { "hp": 45 }
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (outer braces)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
