//! Simulation limits.
//!
//! Pure data: no files, flags or environment lookups belong to the engine.

/// Caps applied to nondeterministic pushdown runs.
///
/// Exceeding a cap ends the run with
/// [`AutomatonError::ResourceExhausted`](crate::AutomatonError::ResourceExhausted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest configuration set allowed at any point of a run,
    /// including while an epsilon closure is being resolved.
    pub max_configurations: usize,
    /// Deepest stack any single configuration may hold.
    pub max_stack_depth: usize,
}

impl Limits {
    /// Limits that never trip. Only safe for machines whose epsilon moves
    /// cannot grow the stack without bound.
    pub fn unbounded() -> Self {
        Self {
            max_configurations: usize::MAX,
            max_stack_depth: usize::MAX,
        }
    }

    pub fn with_max_configurations(mut self, max_configurations: usize) -> Self {
        self.max_configurations = max_configurations;
        self
    }

    pub fn with_max_stack_depth(mut self, max_stack_depth: usize) -> Self {
        self.max_stack_depth = max_stack_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_configurations: 65_536,
            max_stack_depth: 4_096,
        }
    }
}
