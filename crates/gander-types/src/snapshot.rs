use std::error::Error;
use std::fmt;

use compact_str::CompactString;
use facet::Facet;

use crate::{FunctionDescriptor, Value};

/// The serializable replacement for a processed resource.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct ResourceSnapshot {
    /// Resource-type tag chosen by the extractor (for example "tcp" or
    /// "timer").
    pub kind: CompactString,

    /// Bounded-cloned structural payload.
    pub data: Value,

    /// Functions discovered on the resource, in traversal order.
    pub functions: Vec<FunctionDescriptor>,
}

impl ResourceSnapshot {
    pub fn new(kind: impl Into<CompactString>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
            functions: Vec::new(),
        }
    }

    pub fn with_functions(mut self, functions: Vec<FunctionDescriptor>) -> Self {
        self.functions = functions;
        self
    }

    /// Encodes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotJsonError> {
        facet_json::to_string(self).map_err(|e| SnapshotJsonError {
            message: e.to_string(),
        })
    }
}

/// JSON encoding of a snapshot failed.
#[derive(Debug)]
pub struct SnapshotJsonError {
    message: String,
}

impl fmt::Display for SnapshotJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to encode resource snapshot as JSON: {}", self.message)
    }
}

impl Error for SnapshotJsonError {}
