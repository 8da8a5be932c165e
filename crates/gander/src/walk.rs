use std::error::Error;
use std::fmt;

use compact_str::{CompactString, ToCompactString};
use gander_types::{FunctionOrigin, LiveFunction, Resource};

/// Maximum property-path depth the walker will descend.
///
/// Resource trees are acyclic by construction, so this bound only guards
/// against pathological nesting. Exceeding it is a fatal traversal failure,
/// not a silent cutoff.
pub const MAX_DEPTH: usize = 128;

/// A traversal failure while scouting for functions.
#[derive(Debug, PartialEq, Eq)]
pub enum ScoutError {
    DepthExceeded { depth: usize },
}

impl fmt::Display for ScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthExceeded { depth } => {
                write!(f, "function scout exceeded maximum traversal depth {depth} (limit {MAX_DEPTH})")
            }
        }
    }
}

impl Error for ScoutError {}

/// One function found by the walker, before descriptor finalization.
#[derive(Debug, Clone)]
pub struct FoundFunction {
    /// Property path from the root down to the function.
    pub path: Vec<CompactString>,

    /// Final path segment; empty when the root itself is a function.
    pub key: CompactString,

    /// Nesting depth from the root (number of path segments).
    pub level: usize,

    pub info: FunctionInfo,
}

/// Declaration-site metadata plus, transiently, the live function handle.
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub origin: FunctionOrigin,

    /// Present only when the walk was asked to retain references; consumed
    /// and dropped during descriptor finalization.
    pub function: Option<LiveFunction>,
}

/// Walks the value graph under `root` and returns every reachable function,
/// depth-first, in deterministic order (map entries in stored order,
/// sequence elements by index).
///
/// Discovery is path-based: the same function reachable via two paths is
/// reported twice. When `reference_functions` is set, each record carries a
/// transient handle to the live function.
pub fn find_functions(
    root: &Resource,
    reference_functions: bool,
) -> Result<Vec<FoundFunction>, ScoutError> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    visit(root, &mut path, reference_functions, &mut found)?;
    Ok(found)
}

fn visit(
    value: &Resource,
    path: &mut Vec<CompactString>,
    reference_functions: bool,
    found: &mut Vec<FoundFunction>,
) -> Result<(), ScoutError> {
    if path.len() > MAX_DEPTH {
        return Err(ScoutError::DepthExceeded { depth: path.len() });
    }

    match value {
        Resource::Function(function) => {
            found.push(FoundFunction {
                path: path.clone(),
                key: path.last().cloned().unwrap_or_default(),
                level: path.len(),
                info: FunctionInfo {
                    origin: function.origin().clone(),
                    function: reference_functions.then(|| function.clone()),
                },
            });
        }
        Resource::Seq(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_compact_string());
                visit(item, path, reference_functions, found)?;
                path.pop();
            }
        }
        Resource::Map(entries) => {
            for (key, child) in entries {
                path.push(key.clone());
                visit(child, path, reference_functions, found)?;
                path.pop();
            }
        }
        Resource::Null
        | Resource::Bool(_)
        | Resource::Int(_)
        | Resource::Float(_)
        | Resource::Text(_)
        | Resource::Bytes(_) => {}
    }

    Ok(())
}
