//! Generator options.

/// Options threaded through every emitter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Emit `/** ... */` blocks for callables, enums, classes and constants.
    pub documentation: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            documentation: true,
        }
    }
}

impl Options {
    /// Options with documentation blocks disabled.
    pub fn bare() -> Self {
        Self {
            documentation: false,
        }
    }
}
