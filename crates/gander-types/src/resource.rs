use compact_str::CompactString;

use crate::LiveFunction;

/// A live, possibly-unsafe-to-retain value attached to a tracked activity.
///
/// Owned tree, acyclic by construction. Maps preserve insertion order.
/// Not serializable: [`Resource::Function`] holds a live handle. The bounded
/// cloner reduces a `Resource` to a [`Value`](crate::Value) snapshot.
#[derive(Debug, Clone)]
pub enum Resource {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Seq(Vec<Resource>),
    Map(Vec<(CompactString, Resource)>),
    Function(LiveFunction),
}

impl Resource {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Builds a map from `(key, value)` pairs, preserving their order.
    pub fn map<K: Into<CompactString>>(entries: impl IntoIterator<Item = (K, Resource)>) -> Self {
        Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}
