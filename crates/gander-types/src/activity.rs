use std::fmt;

use compact_str::CompactString;
use facet::Facet;
use indexmap::IndexMap;

use crate::{Resource, ResourceSnapshot};

/// Identifier of a tracked runtime activity. Numeric for hook-assigned ids,
/// named for synthetic or external sources.
#[derive(Facet, Debug, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum Uid {
    Num(u64),
    Name(CompactString),
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for Uid {
    fn from(n: u64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for Uid {
    fn from(name: &str) -> Self {
        Self::Name(CompactString::from(name))
    }
}

/// The mutable resource slot of an activity: live before processing, a
/// plain snapshot after.
#[derive(Debug)]
pub enum ResourceSlot {
    Live(Resource),
    Snapshot(ResourceSnapshot),
}

impl ResourceSlot {
    pub fn as_live(&self) -> Option<&Resource> {
        match self {
            Self::Live(resource) => Some(resource),
            Self::Snapshot(_) => None,
        }
    }

    pub fn as_snapshot(&self) -> Option<&ResourceSnapshot> {
        match self {
            Self::Live(_) => None,
            Self::Snapshot(snapshot) => Some(snapshot),
        }
    }
}

/// A tracked unit of asynchronous runtime work.
#[derive(Debug)]
pub struct Activity {
    pub uid: Uid,
    pub resource: ResourceSlot,
}

impl Activity {
    pub fn live(uid: impl Into<Uid>, resource: Resource) -> Self {
        Self {
            uid: uid.into(),
            resource: ResourceSlot::Live(resource),
        }
    }
}

/// Activities keyed by uid, in caller insertion order.
///
/// The map is owned by the external activity tracker; the processor only
/// overwrites `resource` slots of existing entries. A `None` value marks an
/// entry the tracker has nulled ahead of removal.
pub type Activities = IndexMap<Uid, Option<Activity>>;
