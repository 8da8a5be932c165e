use std::error::Error;
use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use facet::Facet;

use crate::Resource;

/// Declaration-site metadata for a function.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct FunctionOrigin {
    /// Absolute UTF-8 path to the source file declaring the function.
    pub file: CompactString,

    /// 1-based source line.
    pub line: u32,

    /// 1-based source column.
    pub column: u32,

    /// Declared name; empty for anonymous functions.
    pub name: CompactString,

    /// Name inferred from the assignment site; empty when none.
    pub inferred_name: CompactString,
}

impl FunctionOrigin {
    /// Builds an origin with a declared name and no inferred name.
    pub fn new(file: impl Into<CompactString>, line: u32, column: u32, name: impl Into<CompactString>) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            name: name.into(),
            inferred_name: CompactString::default(),
        }
    }
}

/// The runtime refused reflective access to a function's call arguments.
///
/// The canonical cause is a function declared in restricted mode; core
/// runtime functions behave this way across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentsDenied;

impl fmt::Display for ArgumentsDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function call arguments are not reflectively accessible")
    }
}

impl Error for ArgumentsDenied {}

#[derive(Debug)]
enum ArgumentAccess {
    Available(Vec<Resource>),
    Denied,
}

#[derive(Debug)]
struct FunctionState {
    arguments: ArgumentAccess,
    source_text: Option<String>,
}

/// Handle to a live function registered with the runtime.
///
/// Cloning the handle shares the underlying state. Snapshot types cannot
/// embed one, so dropping the last handle releases whatever the function
/// closed over.
#[derive(Debug, Clone)]
pub struct LiveFunction {
    origin: FunctionOrigin,
    state: Arc<FunctionState>,
}

impl LiveFunction {
    /// A function with no captured arguments and no source text.
    pub fn new(origin: FunctionOrigin) -> Self {
        Self::builder(origin).build()
    }

    /// Starts building a function handle from its origin.
    pub fn builder(origin: FunctionOrigin) -> LiveFunctionBuilder {
        LiveFunctionBuilder {
            origin,
            arguments: ArgumentAccess::Available(Vec::new()),
            source_text: None,
        }
    }

    /// Declaration-site metadata.
    pub fn origin(&self) -> &FunctionOrigin {
        &self.origin
    }

    /// Captured call arguments, or [`ArgumentsDenied`] when the runtime
    /// forbids reflective access.
    pub fn arguments(&self) -> Result<&[Resource], ArgumentsDenied> {
        match &self.state.arguments {
            ArgumentAccess::Available(arguments) => Ok(arguments),
            ArgumentAccess::Denied => Err(ArgumentsDenied),
        }
    }

    /// Textual source representation, when the runtime has it.
    pub fn source_text(&self) -> Option<&str> {
        self.state.source_text.as_deref()
    }

    /// Number of live handles sharing this function's state, including
    /// this one.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.state)
    }
}

/// Builder for [`LiveFunction`].
pub struct LiveFunctionBuilder {
    origin: FunctionOrigin,
    arguments: ArgumentAccess,
    source_text: Option<String>,
}

impl LiveFunctionBuilder {
    /// Sets the captured call arguments.
    pub fn arguments(mut self, arguments: Vec<Resource>) -> Self {
        self.arguments = ArgumentAccess::Available(arguments);
        self
    }

    /// Marks the arguments as reflectively inaccessible.
    pub fn deny_arguments(mut self) -> Self {
        self.arguments = ArgumentAccess::Denied;
        self
    }

    /// Sets the textual source representation.
    pub fn source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Finalizes the handle.
    pub fn build(self) -> LiveFunction {
        LiveFunction {
            origin: self.origin,
            state: Arc::new(FunctionState {
                arguments: self.arguments,
                source_text: self.source_text,
            }),
        }
    }
}
