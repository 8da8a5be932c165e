//! Bounded resource-snapshot capture for async runtime diagnostics.
//!
//! Each tracked activity carries an opaque resource that may reference live
//! handles, closures, buffers, or strings. Retaining those past the
//! resource's lifetime would block reclamation and could leak sensitive or
//! enormous data. This crate converts each resource, exactly once, into a
//! plain serializable snapshot:
//!
//! - [`Cloner`]: size-limited deep copy of a resource value; binary and
//!   textual payloads are truncated to configured lengths, with the original
//!   length recorded so truncation stays observable.
//! - [`scout_functions`]: walks the value graph under a root, emits one
//!   [`FunctionDescriptor`] per reachable function with its path, nesting
//!   level, and declaration site, optionally capturing arguments and source
//!   text. Live function references never make it into a descriptor.
//! - [`ResourceProcessor`]: orchestrates per-activity, at-most-once
//!   processing, delegating extraction to a [`ResourceExtractor`] and
//!   overwriting the activity's resource slot with the snapshot so the live
//!   value can be reclaimed.
//!
//! ```rust
//! use gander::{
//!     CleanupOptions, ProcessContext, ProcessError, ProcessorOptions, Resource,
//!     ResourceExtractor, ResourceProcessor, ResourceSnapshot, Uid,
//! };
//!
//! struct TimerExtractor;
//!
//! impl ResourceExtractor for TimerExtractor {
//!     fn process_resource(
//!         &mut self,
//!         uid: &Uid,
//!         resource: &Resource,
//!         cx: &ProcessContext<'_>,
//!     ) -> Result<ResourceSnapshot, ProcessError> {
//!         let functions = cx.scout(resource, uid, Some("timer"))?;
//!         let data = cx.cloner().clone_resource(resource);
//!         Ok(ResourceSnapshot::new("timer", data).with_functions(functions))
//!     }
//! }
//!
//! let mut processor = ResourceProcessor::new(TimerExtractor, ProcessorOptions::default());
//! # let mut activities = gander::Activities::default();
//! processor
//!     .clean_all_resources(&mut activities, CleanupOptions { collect_function_info: true })
//!     .unwrap();
//! ```

mod cloner;
mod processor;
mod scout;
mod walk;

pub use cloner::{Cloner, ClonerOptions};
pub use processor::{
    CleanupOptions, ProcessContext, ProcessError, ProcessorOptions, ResourceExtractor,
    ResourceProcessor,
};
pub use scout::{ScoutOptions, scout_functions};
pub use walk::{FoundFunction, FunctionInfo, MAX_DEPTH, ScoutError, find_functions};

pub use gander_types::*;
