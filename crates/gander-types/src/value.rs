use compact_str::CompactString;
use facet::Facet;

use crate::FunctionOrigin;

/// A GC-safe snapshot value.
///
/// `Text` and `Bytes` record the original payload length separately from the
/// captured prefix, so truncation is observable rather than silently hidden.
#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text {
        /// Captured prefix of the original string.
        data: String,
        /// Original length in characters.
        len: usize,
    },
    Bytes {
        /// Captured prefix of the original payload.
        data: Vec<u8>,
        /// Original length in bytes.
        len: usize,
    },
    Seq(Vec<Value>),
    Map(Vec<ValueEntry>),
    /// A function reduced to its declaration-site metadata.
    Function(FunctionOrigin),
}

/// One key/value pair of a cloned mapping; order matches the source map.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct ValueEntry {
    pub key: CompactString,
    pub value: Value,
}
