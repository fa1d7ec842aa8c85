//! Fractal noise settings.
//!
//! [`Settings`] is the immutable configuration handed to every evaluation
//! call: the seed and the octave progression of the fractal sum.
//!
//! # Example
//!
//! ```rust
//! use grain_core::Settings;
//!
//! let settings = Settings::default()
//!     .with_seed(1234)
//!     .with_frequency(8)
//!     .with_octaves(4);
//! settings.validate().unwrap();
//! assert!(settings.with_frequency(0).validate().is_err());
//! ```

use crate::{Error, Result};

/// Seed and octave progression for a fractal noise evaluation.
///
/// Invariants (checked by [`Settings::validate`]):
///
/// - `frequency >= 1`
/// - `octaves >= 1`
/// - `lacunarity >= 1`
/// - `persistence` finite and `>= 0`
/// - the last octave's frequency fits in an `i32`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Hash seed shared by all octaves.
    pub seed: i32,
    /// Lattice cells per domain unit for the first octave.
    pub frequency: i32,
    /// Number of fractal layers.
    pub octaves: i32,
    /// Frequency multiplier between octaves.
    pub lacunarity: i32,
    /// Amplitude multiplier between octaves.
    pub persistence: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 4,
            octaves: 1,
            lacunarity: 2,
            persistence: 0.5,
        }
    }
}

impl Settings {
    /// Sets the seed.
    #[inline]
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the base frequency.
    #[inline]
    pub fn with_frequency(mut self, frequency: i32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the octave count.
    #[inline]
    pub fn with_octaves(mut self, octaves: i32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the lacunarity.
    #[inline]
    pub fn with_lacunarity(mut self, lacunarity: i32) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the persistence.
    #[inline]
    pub fn with_persistence(mut self, persistence: f32) -> Self {
        self.persistence = persistence;
        self
    }

    /// Checks every invariant, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.frequency < 1 {
            return Err(Error::invalid_settings(
                "frequency",
                format!("must be at least 1, got {}", self.frequency),
            ));
        }
        if self.octaves < 1 {
            return Err(Error::invalid_settings(
                "octaves",
                format!("must be at least 1, got {}", self.octaves),
            ));
        }
        if self.lacunarity < 1 {
            return Err(Error::invalid_settings(
                "lacunarity",
                format!("must be at least 1, got {}", self.lacunarity),
            ));
        }
        if !self.persistence.is_finite() || self.persistence < 0.0 {
            return Err(Error::invalid_settings(
                "persistence",
                format!("must be finite and non-negative, got {}", self.persistence),
            ));
        }

        let mut frequency = self.frequency;
        let steps = if self.lacunarity > 1 { self.octaves } else { 1 };
        for _ in 1..steps {
            frequency = frequency.checked_mul(self.lacunarity).ok_or_else(|| {
                Error::invalid_settings(
                    "octaves",
                    format!(
                        "frequency {} x lacunarity {} overflows after {} octaves",
                        self.frequency, self.lacunarity, self.octaves
                    ),
                )
            })?;
        }

        Ok(())
    }
}
