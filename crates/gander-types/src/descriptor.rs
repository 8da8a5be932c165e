use compact_str::CompactString;
use facet::Facet;

use crate::{FunctionOrigin, Uid, Value};

/// Whether and how a discovered function's call arguments were captured.
#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum CapturedArguments {
    /// Argument capture was not requested for this scout pass.
    NotRequested,

    /// Bounded clone of the function's captured call arguments.
    Captured(Value),

    /// The runtime refused reflective access (restricted-mode function).
    Inaccessible,
}

/// One function discovered by the scout.
///
/// Discovery is path-based: the same function reachable via two paths yields
/// two descriptors. The type has no field that could hold a live function
/// handle; converting the walker's record into a descriptor is the
/// unconditional reference strip.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    /// Property path locating the function within the scouted root,
    /// optionally prefixed with a caller-supplied name.
    pub path: Vec<CompactString>,

    /// Final path segment (the property name the function was found under).
    pub key: CompactString,

    /// Nesting depth from the scout root.
    pub level: usize,

    /// Declaration-site metadata.
    pub info: FunctionOrigin,

    /// Activity this descriptor is attributed to.
    pub id: Uid,

    /// Captured call arguments, if any.
    pub arguments: CapturedArguments,

    /// Source text, present only when source capture was requested.
    pub source: Option<String>,
}
