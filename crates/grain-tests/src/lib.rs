//! Integration tests for grain crates.
//!
//! End-to-end checks through [`grain_noise::NoiseField`], covering the
//! properties every noise family has to keep: tiling, cellular ordering,
//! fractal range, configuration and error boundaries. Golden digests of
//! exact outputs live in the `golden` module.

#[cfg(test)]
mod golden;
