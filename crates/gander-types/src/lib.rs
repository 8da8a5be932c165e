//! Core data model for gander.
//!
//! Two sides, deliberately kept apart:
//! - live side: [`Resource`] and [`LiveFunction`] — values still attached to
//!   the runtime, possibly holding handles, closures, or large payloads.
//! - snapshot side: [`Value`], [`FunctionDescriptor`], [`ResourceSnapshot`] —
//!   plain serializable data, safe to retain after the resource is released.
//!
//! The split is the point: no snapshot type has a field that could hold a
//! [`LiveFunction`], so once an activity's resource slot is overwritten with
//! a snapshot, nothing from the runtime is retained.

mod activity;
mod descriptor;
mod function;
mod resource;
mod snapshot;
mod value;

pub use activity::*;
pub use descriptor::*;
pub use function::*;
pub use resource::*;
pub use snapshot::*;
pub use value::*;
