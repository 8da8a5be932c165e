use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use gander_types::{Activities, FunctionDescriptor, Resource, ResourceSlot, ResourceSnapshot, Uid};
use tracing::{debug, trace};

use crate::cloner::{Cloner, ClonerOptions};
use crate::scout::{ScoutOptions, scout_functions};
use crate::walk::ScoutError;

/// Construction-time configuration for a [`ResourceProcessor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorOptions {
    /// Limits applied when cloning resource data and function arguments.
    pub cloner: ClonerOptions,

    /// Capture callback arguments while processing.
    pub capture_arguments: bool,

    /// Capture callback source text while processing.
    pub capture_source: bool,
}

/// Per-call options for [`ResourceProcessor::cleanup_resource`] and
/// [`ResourceProcessor::clean_all_resources`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOptions {
    /// Collect descriptors for every function found on the resource.
    pub collect_function_info: bool,
}

/// A failure while processing a resource.
#[derive(Debug)]
pub enum ProcessError {
    Scout(ScoutError),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scout(_) => write!(f, "function scout failed while processing a resource"),
        }
    }
}

impl Error for ProcessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scout(err) => Some(err),
        }
    }
}

impl From<ScoutError> for ProcessError {
    fn from(err: ScoutError) -> Self {
        Self::Scout(err)
    }
}

/// What a [`ResourceExtractor`] gets to work with while turning a live
/// resource into a snapshot.
pub struct ProcessContext<'a> {
    cloner: &'a Cloner,
    capture_arguments: bool,
    capture_source: bool,
    collect_function_info: bool,
}

impl ProcessContext<'_> {
    /// The processor's bounded cloner.
    pub fn cloner(&self) -> &Cloner {
        self.cloner
    }

    /// Whether this cleanup pass asked for function descriptors.
    pub fn collect_function_info(&self) -> bool {
        self.collect_function_info
    }

    /// Scouts `root` for functions with the processor's configured capture
    /// settings, attributing descriptors to `uid`.
    ///
    /// Returns an empty vec without walking when the cleanup pass did not
    /// ask for function info.
    pub fn scout(
        &self,
        root: &Resource,
        uid: &Uid,
        name: Option<&str>,
    ) -> Result<Vec<FunctionDescriptor>, ProcessError> {
        if !self.collect_function_info {
            return Ok(Vec::new());
        }
        let options = ScoutOptions {
            capture_arguments: self.capture_arguments,
            capture_source: self.capture_source,
            cloner: self.cloner,
            name,
        };
        scout_functions(root, uid, &options).map_err(ProcessError::from)
    }
}

/// Resource-type-specific extraction hook.
///
/// Implement this per resource kind (a network extractor, a timer
/// extractor, ...) and hand it to a [`ResourceProcessor`]. The required
/// method makes "base class invoked without an override" unrepresentable.
pub trait ResourceExtractor {
    /// Turns a live resource into the snapshot that will replace it.
    ///
    /// Must not stash `resource` or anything it borrows; the snapshot is
    /// the only thing retained.
    fn process_resource(
        &mut self,
        uid: &Uid,
        resource: &Resource,
        cx: &ProcessContext<'_>,
    ) -> Result<ResourceSnapshot, ProcessError>;
}

/// Orchestrates per-activity, at-most-once resource processing.
///
/// Processed uids are remembered for the lifetime of the instance; repeat
/// cleanups are no-ops even if the tracker later places a different
/// activity at the same uid.
pub struct ResourceProcessor<E> {
    extractor: E,
    cloner: Cloner,
    capture_arguments: bool,
    capture_source: bool,
    processed: HashSet<Uid>,
}

impl<E: ResourceExtractor> ResourceProcessor<E> {
    pub fn new(extractor: E, options: ProcessorOptions) -> Self {
        Self {
            extractor,
            cloner: Cloner::new(options.cloner),
            capture_arguments: options.capture_arguments,
            capture_source: options.capture_source,
            processed: HashSet::new(),
        }
    }

    /// Processes the resource of the activity at `uid`, overwriting its
    /// resource slot with the extracted snapshot.
    ///
    /// No-op when the uid was already processed, is absent from
    /// `activities`, or maps to a nulled entry. An extractor error
    /// propagates before the uid is marked processed, so the uid stays
    /// eligible for a later retry.
    pub fn cleanup_resource(
        &mut self,
        uid: &Uid,
        activities: &mut Activities,
        options: CleanupOptions,
    ) -> Result<(), ProcessError> {
        if self.processed.contains(uid) {
            trace!(%uid, "resource already processed, skipping");
            return Ok(());
        }
        let Some(Some(activity)) = activities.get_mut(uid) else {
            trace!(%uid, "no activity for uid, skipping");
            return Ok(());
        };

        match &activity.resource {
            ResourceSlot::Live(resource) => {
                let cx = ProcessContext {
                    cloner: &self.cloner,
                    capture_arguments: self.capture_arguments,
                    capture_source: self.capture_source,
                    collect_function_info: options.collect_function_info,
                };
                let snapshot = self.extractor.process_resource(uid, resource, &cx)?;
                // The live value drops here; the slot now holds plain data.
                activity.resource = ResourceSlot::Snapshot(snapshot);
                debug!(%uid, "captured resource snapshot");
            }
            ResourceSlot::Snapshot(_) => {
                trace!(%uid, "slot already holds a snapshot");
            }
        }

        self.processed.insert(uid.clone());
        Ok(())
    }

    /// Applies [`cleanup_resource`](Self::cleanup_resource) to every uid in
    /// `activities`, in the map's iteration order.
    pub fn clean_all_resources(
        &mut self,
        activities: &mut Activities,
        options: CleanupOptions,
    ) -> Result<(), ProcessError> {
        // Snapshot the key set up front; cleanup never adds or removes
        // entries, only overwrites resource slots.
        let uids: Vec<Uid> = activities.keys().cloned().collect();
        for uid in &uids {
            self.cleanup_resource(uid, activities, options)?;
        }
        Ok(())
    }

    /// How many uids this instance has processed so far.
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}
