//! Error types for matcher, capturer, and action construction.
//!
//! Construction is the only fallible surface in the crate: `matches`,
//! `format`, and `invoke` have no failure modes of their own.

/// Errors returned by matcher, formatter, capturer, and action constructors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The test-scoped arena has no room for the requested allocation.
    #[error("test arena exhausted: requested {requested} bytes with {remaining} remaining")]
    ArenaExhausted {
        /// Bytes the constructor tried to allocate.
        requested: usize,
        /// Bytes left in the arena budget.
        remaining: usize,
    },

    /// The pattern given to `str_matches` failed to compile.
    #[error("invalid match pattern")]
    InvalidPattern(#[from] regex::Error),
}

/// Convenience alias used by every constructor in the crate.
pub type Result<T> = std::result::Result<T, Error>;
