//! The environment threaded through every read.
//!
//! This module provides [`ReaderEnv`], which carries the error-builder set
//! and the [`ReaderOptions`] for one call tree. The environment is resolved
//! once by the caller and never mutated during a traversal.

use crate::error::DefaultErrorBuilders;

/// Options that change how engines report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    fail_fast: bool,
}

impl ReaderOptions {
    /// Creates the default options (accumulate every error).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether engines stop at the first failure.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Returns true if engines stop at the first failure.
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }
}

/// Reader environment carrying error builders and options.
///
/// `EB` is the error-builder set. Readers bound it by the capabilities they
/// need (for example `EB: PathMissingErrorBuilder`), so an environment that
/// cannot build an error some reader raises is rejected at compile time.
///
/// # Example
///
/// ```rust
/// use assay::{DefaultErrorBuilders, ReaderEnv, ReaderOptions};
///
/// let env = ReaderEnv::new(DefaultErrorBuilders, ReaderOptions::new().with_fail_fast(true));
/// assert!(env.fail_fast());
///
/// let env = ReaderEnv::default();
/// assert!(!env.fail_fast());
/// ```
#[derive(Debug, Clone)]
pub struct ReaderEnv<EB> {
    error_builders: EB,
    options: ReaderOptions,
}

impl<EB> ReaderEnv<EB> {
    /// Creates an environment from an error-builder set and options.
    pub fn new(error_builders: EB, options: ReaderOptions) -> Self {
        Self {
            error_builders,
            options,
        }
    }

    /// Returns a copy of this environment with different options.
    pub fn with_options(&self, options: ReaderOptions) -> Self
    where
        EB: Clone,
    {
        Self {
            error_builders: self.error_builders.clone(),
            options,
        }
    }

    /// Returns the error-builder set.
    pub fn error_builders(&self) -> &EB {
        &self.error_builders
    }

    /// Returns the options.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Shorthand for `options().fail_fast()`.
    pub fn fail_fast(&self) -> bool {
        self.options.fail_fast
    }
}

impl Default for ReaderEnv<DefaultErrorBuilders> {
    fn default() -> Self {
        Self::new(DefaultErrorBuilders, ReaderOptions::default())
    }
}
