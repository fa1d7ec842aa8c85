//! Lane-parallel integer hash.
//!
//! A small xxHash32-style hash over four independent `u32` lanes. A state
//! is seeded once per batch, then lattice coordinates are absorbed one
//! axis at a time (x, then y, then z). Absorption order matters:
//! `seed.absorb(a).absorb(b)` and `seed.absorb(b).absorb(a)` differ.
//!
//! Every extraction reads the avalanched [`HashState::value`], never the
//! raw accumulator.
//!
//! # Example
//!
//! ```rust
//! use grain_noise::HashState;
//! use wide::i32x4;
//!
//! let cell = HashState::seed(7)
//!     .absorb(i32x4::from([0, 1, 2, 3]))
//!     .absorb(i32x4::splat(-1));
//!
//! for v in cell.channel_a().to_array() {
//!     assert!((0.0..1.0).contains(&v));
//! }
//! ```

use grain_math::simd::{f32x4_from_bits, i32x4_as_u32x4, select_u32x4};
use wide::{f32x4, i32x4, u32x4};

/// Avalanche multiplier. Changing any prime changes every output.
pub const PRIME_B: u32 = 0x85EB_CA77;
/// Absorb multiplier, also the third avalanche multiplier.
pub const PRIME_C: u32 = 0xC2B2_AE3D;
/// Post-rotation absorb multiplier.
pub const PRIME_D: u32 = 0x27D4_EB2F;
/// Seed offset.
pub const PRIME_E: u32 = 0x1656_67B1;

const ONE_BITS: u32 = 0x3F80_0000;

/// Four hash accumulators, one per lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashState {
    acc: u32x4,
}

impl HashState {
    /// Starts every lane from the same seed.
    #[inline]
    pub fn seed(seed: i32) -> Self {
        Self {
            acc: u32x4::splat((seed as u32).wrapping_add(PRIME_E)),
        }
    }

    /// Mixes one lattice coordinate per lane into the state.
    ///
    /// `rotl(acc + value * C, 17) * D` with wrapping arithmetic.
    #[inline]
    pub fn absorb(self, value: i32x4) -> Self {
        let mixed = self.acc + i32x4_as_u32x4(value) * u32x4::splat(PRIME_C);
        Self {
            acc: rotate_left_17(mixed) * u32x4::splat(PRIME_D),
        }
    }

    /// Adds a scalar to every lane. Used to derive per-octave states.
    #[inline]
    pub fn offset(self, n: i32) -> Self {
        Self {
            acc: self.acc + u32x4::splat(n as u32),
        }
    }

    /// Avalanched hash value.
    #[inline]
    pub fn value(self) -> u32x4 {
        let mut v = self.acc;
        v = v ^ (v >> 15);
        v = v * u32x4::splat(PRIME_B);
        v = v ^ (v >> 13);
        v = v * u32x4::splat(PRIME_C);
        v ^ (v >> 16)
    }

    /// `count` bits of [`value`](Self::value) starting at bit `shift`.
    ///
    /// `count` is clamped to `1..=23`, the width a unit float can hold, and
    /// `shift` is lowered until the window ends at or before bit 32.
    #[inline]
    pub fn bits(self, count: u32, shift: u32) -> u32x4 {
        let count = count.clamp(1, 23);
        let shift = shift.min(32 - count);
        (self.value() >> shift as i32) & u32x4::splat((1u32 << count) - 1)
    }

    /// `bit_count` bits at `bit_offset` as a float in `[0, 1)`.
    ///
    /// The bits become the top of a mantissa with the exponent of 1.0, so
    /// the result is exactly `k / 2^bit_count` with no division. Out of
    /// range arguments are clamped as in [`bits`](Self::bits).
    #[inline]
    pub fn unit_float(self, bit_offset: u32, bit_count: u32) -> f32x4 {
        let bit_count = bit_count.clamp(1, 23);
        unit_float_from_bits(self.bits(bit_count, bit_offset), bit_count)
    }

    /// Bits 0..8 as a unit float.
    #[inline]
    pub fn channel_a(self) -> f32x4 {
        self.unit_float(0, 8)
    }

    /// Bits 8..16 as a unit float.
    #[inline]
    pub fn channel_b(self) -> f32x4 {
        self.unit_float(8, 8)
    }

    /// Bits 16..24 as a unit float.
    #[inline]
    pub fn channel_c(self) -> f32x4 {
        self.unit_float(16, 8)
    }

    /// Bits 24..32 as a unit float.
    #[inline]
    pub fn channel_d(self) -> f32x4 {
        self.unit_float(24, 8)
    }

    /// Per lane: `b` where `mask` is set, otherwise `a`.
    #[inline]
    pub fn select(a: Self, b: Self, mask: f32x4) -> Self {
        Self {
            acc: select_u32x4(mask, b.acc, a.acc),
        }
    }
}

/// Turns `count` low bits into `k / 2^count`.
///
/// `count` is clamped to `1..=23`; higher bits of `bits` must be clear.
#[inline]
pub fn unit_float_from_bits(bits: u32x4, count: u32) -> f32x4 {
    let mantissa = bits << (23 - count.clamp(1, 23)) as i32;
    f32x4_from_bits(mantissa | u32x4::splat(ONE_BITS)) - f32x4::splat(1.0)
}

#[inline]
fn rotate_left_17(v: u32x4) -> u32x4 {
    (v << 17) | (v >> 15)
}
