//! # grain-math
//!
//! Math primitives for 4-wide batched noise evaluation.
//!
//! - [`Position4`] - Four 3D sample positions in lane layout
//! - [`DomainTransform`], [`Trs`] - Affine transform applied before sampling
//! - [`simd`] - Lane interpolation, conversion and branchless selection
//!
//! # Design
//!
//! Lane math is built on [`wide`]. Transforms are composed with [`glam`]
//! and then flattened into plain column arrays so evaluation stays a
//! handful of multiply-adds per axis.
//!
//! # Usage
//!
//! ```rust
//! use grain_math::{DomainTransform, Position4};
//!
//! let p = Position4::splat([0.5, 0.0, 0.25]);
//! let scaled = DomainTransform::uniform_scale(8.0).transform(&p);
//! assert_eq!(scaled.x.to_array(), [4.0; 4]);
//! ```
//!
//! # Dependencies
//!
//! - [`wide`] - Portable 4-lane SIMD
//! - [`glam`] - Quaternion and affine composition
//! - [`bytemuck`] - Lane bit reinterpretation
//!
//! # Used By
//!
//! - `grain-noise` - All noise families

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod position;
mod transform;
pub mod simd;

pub use position::*;
pub use transform::*;

/// Re-export lane types for direct use
pub use wide::{f32x4, i32x4, u32x4};
