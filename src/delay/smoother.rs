//! Delay length smoothing.
//!
//! Each update closes about 0.24% of the remaining distance to the requested
//! length, so a jump in the requested delay turns into a slow glide with the same
//! time constant in both directions.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

use crate::utils::fixed::{mul_shift_u, Uq8, SQ7_24_BITS, UQ8_BITS};

pub const MIN_GRAIN_SIZE: u32 = 1 << 12;
pub const MAX_GRAIN_SIZE: u32 = 1 << 16;

/// Share of the distance that is kept per update, 0.9976 in Q7.24.
pub const CONVERGE_COEFFICIENT: u32 = (0.9976 * (1 << SQ7_24_BITS) as f64) as u32;

/// One convergence step from `src` towards `dst`.
///
/// The remaining distance is scaled by [`CONVERGE_COEFFICIENT`] and truncated, so
/// the result never passes `dst` and reaches it exactly once the distance is small.
#[inline]
pub fn converge(src: Uq8, dst: Uq8) -> Uq8 {
    if src < dst {
        dst - mul_shift_u(dst - src, CONVERGE_COEFFICIENT, SQ7_24_BITS)
    } else {
        dst + mul_shift_u(src - dst, CONVERGE_COEFFICIENT, SQ7_24_BITS)
    }
}

/// Largest move a single [`converge`] step makes over a distance of `distance`.
pub fn max_step(distance: Uq8) -> Uq8 {
    distance - mul_shift_u(distance, CONVERGE_COEFFICIENT, SQ7_24_BITS)
}

#[derive(Debug, Clone, Copy)]
pub struct DelaySmoother {
    target: u32,
    length: Uq8,
}

impl Default for DelaySmoother {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaySmoother {
    pub fn new() -> Self {
        Self {
            target: MIN_GRAIN_SIZE,
            length: MIN_GRAIN_SIZE << UQ8_BITS,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Takes `requested` as the new target if it lies within
    /// `MIN_GRAIN_SIZE..=MAX_GRAIN_SIZE`, then steps the smoothed length towards
    /// the target. Requests out of range keep the previous target.
    #[inline]
    pub fn update(&mut self, requested: u32) {
        if (MIN_GRAIN_SIZE..=MAX_GRAIN_SIZE).contains(&requested) {
            self.target = requested;
        }

        self.length = converge(self.length, self.target << UQ8_BITS);
    }

    /// Target length in samples.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Smoothed length with 8 fraction bits.
    #[inline]
    pub fn length(&self) -> Uq8 {
        self.length
    }

    /// Integer part of the smoothed length.
    #[inline]
    pub fn samples(&self) -> u32 {
        self.length >> UQ8_BITS
    }
}
