//! Error types for grain noise evaluation.
//!
//! The noise engine itself is closed-form and cannot fail once it runs.
//! Every error here is raised at the call boundary, before any sample is
//! evaluated: bad [`Settings`](crate::Settings), mismatched buffers, or
//! an unknown selector name.
//!
//! # Usage
//!
//! ```rust
//! use grain_core::{Error, Result};
//!
//! fn check_octaves(octaves: i32) -> Result<()> {
//!     if octaves < 1 {
//!         return Err(Error::invalid_settings("octaves", "must be at least 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_octaves(0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by grain at the evaluation boundary.
///
/// # Categories
///
/// - **Configuration errors**: [`InvalidSettings`](Error::InvalidSettings),
///   [`Parse`](Error::Parse)
/// - **Buffer errors**: [`LengthMismatch`](Error::LengthMismatch)
#[derive(Debug, Error)]
pub enum Error {
    /// A [`Settings`](crate::Settings) field violates its invariant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grain_core::Error;
    ///
    /// let err = Error::invalid_settings("frequency", "must be at least 1, got 0");
    /// assert!(err.to_string().contains("frequency"));
    /// ```
    #[error("invalid settings: {field} {reason}")]
    InvalidSettings {
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Position and output buffers hold a different number of batches.
    #[error("length mismatch: {positions} position batches vs {outputs} output batches")]
    LengthMismatch {
        /// Number of position batches supplied
        positions: usize,
        /// Number of output batches supplied
        outputs: usize,
    },

    /// A name could not be parsed into a selector value.
    #[error("unknown {kind} '{value}'")]
    Parse {
        /// What was being parsed (e.g. "gradient")
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidSettings`] error.
    #[inline]
    pub fn invalid_settings(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::LengthMismatch`] error.
    #[inline]
    pub fn length_mismatch(positions: usize, outputs: usize) -> Self {
        Self::LengthMismatch { positions, outputs }
    }

    /// Creates an [`Error::Parse`] error.
    #[inline]
    pub fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            value: value.into(),
        }
    }

    /// Returns `true` if the caller supplied a bad configuration.
    #[inline]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidSettings { .. } | Self::Parse { .. })
    }

    /// Returns `true` if this is a buffer length error.
    #[inline]
    pub fn is_length_error(&self) -> bool {
        matches!(self, Self::LengthMismatch { .. })
    }
}
