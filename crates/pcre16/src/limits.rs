//! Limits and sizing constants for calls into the engine.

/// Capacity, in code units, of the scratch buffer used to read the engine's
/// last error message. Longer messages are truncated.
pub const ERROR_MESSAGE_CAPACITY: usize = 256;

/// Hard ceiling on `match_all` iterations.
pub const MAX_MATCH_ITERATIONS: usize = 1000;

/// Hard ceiling on the substitution output buffer, in code units.
pub const MAX_SUBSTITUTE_UNITS: usize = 100 * 1024 * 1024;

/// The first substitution buffer is the subject length scaled by
/// `SUBSTITUTE_INITIAL_NUM / SUBSTITUTE_INITIAL_DEN`; it doubles on each
/// retry.
pub const SUBSTITUTE_INITIAL_NUM: usize = 3;
pub const SUBSTITUTE_INITIAL_DEN: usize = 2;

/// Per-engine tunables, inherited by every pattern compiled through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    pub max_match_iterations: usize,
    pub max_substitute_units: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_match_iterations: MAX_MATCH_ITERATIONS,
            max_substitute_units: MAX_SUBSTITUTE_UNITS,
        }
    }
}

impl Limits {
    /// Output capacity of the first substitution attempt, clamped to the
    /// ceiling.
    pub fn initial_substitute_capacity(&self, subject_units: usize) -> usize {
        subject_units
            .saturating_mul(SUBSTITUTE_INITIAL_NUM)
            .div_ceil(SUBSTITUTE_INITIAL_DEN)
            .max(1)
            .min(self.max_substitute_units)
    }
}
