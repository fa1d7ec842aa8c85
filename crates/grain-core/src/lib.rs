//! # grain-core
//!
//! Core types for grain procedural noise.
//!
//! This crate provides the configuration vocabulary shared by every other
//! grain crate:
//!
//! - [`Settings`] - Seed and fractal octave progression
//! - [`NoiseType`] - Runtime selector for a noise composition
//! - [`Error`], [`Result`] - Boundary errors
//!
//! ## Crate Structure
//!
//! ```text
//! grain-core (this crate)
//!    ^
//!    |
//!    +-- grain-math (SIMD lanes, domain transform)
//!    +-- grain-noise (hash, lattice, simplex, voronoi, fractal)
//!    +-- grain-cli
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for settings and selectors

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod kind;
pub mod settings;

pub use error::*;
pub use kind::*;
pub use settings::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::kind::{
        Dimensions, DistanceKind, GradientKind, NoiseKind, NoiseType, VoronoiFunction,
    };
    pub use crate::settings::Settings;
}
