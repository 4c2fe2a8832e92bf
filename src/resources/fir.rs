//! Fractional delay FIR bank.
//!
//! One row of `FIR_TAP` Q3.12 coefficients per sub-sample position. Row `k`
//! delays by `k / FIR_TABLE_SIZE` of a sample on top of the integer delay, using a
//! Blackman windowed sinc with its cutoff at Nyquist. Every row sums to exactly
//! `1 << FIR_VALUE_BITS`, and row 0 is a unit impulse.
//!
//! The bank is computed on first use and shared by all delay instances.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use crate::utils::fixed::{Sq3_12, SQ3_12_BITS, SQ3_12_ONE, UQ8_BITS};

pub const FIR_TAP: usize = 16;
pub const FIR_TABLE_BITS: u32 = 5;
pub const FIR_TABLE_SIZE: usize = 1 << FIR_TABLE_BITS;
pub const FIR_TABLE_MASK: usize = FIR_TABLE_SIZE - 1;
pub const FIR_VALUE_BITS: u32 = SQ3_12_BITS;

static FIR_BANK: Once<FirBank> = Once::new();

/// Returns the shared bank, computing it on the first call.
pub fn fir_bank() -> &'static FirBank {
    FIR_BANK.call_once(FirBank::new)
}

#[derive(Debug, Clone)]
pub struct FirBank {
    rows: [[Sq3_12; FIR_TAP]; FIR_TABLE_SIZE],
}

impl Default for FirBank {
    fn default() -> Self {
        Self::new()
    }
}

impl FirBank {
    pub fn new() -> Self {
        let mut rows = [[0; FIR_TAP]; FIR_TABLE_SIZE];

        for (k, row) in rows.iter_mut().enumerate() {
            compute_row(k as f32 / FIR_TABLE_SIZE as f32, row);
        }

        Self { rows }
    }

    #[inline]
    pub fn row(&self, index: usize) -> &[Sq3_12; FIR_TAP] {
        &self.rows[index & FIR_TABLE_MASK]
    }

    /// Selects the row for a delay length with 8 fraction bits.
    #[inline]
    pub fn taps(&self, length: u32) -> &[Sq3_12; FIR_TAP] {
        self.row((length >> (UQ8_BITS - FIR_TABLE_BITS)) as usize)
    }
}

fn compute_row(fraction: f32, row: &mut [Sq3_12; FIR_TAP]) {
    let half = (FIR_TAP / 2) as f32;
    let pi = core::f32::consts::PI;
    let mut coefficients = [0.0f32; FIR_TAP];

    for (j, c) in coefficients.iter_mut().enumerate() {
        let x = (j as f32 - half) - fraction;
        if x.abs() >= half {
            continue;
        }
        let sinc = if x == 0.0 {
            1.0
        } else {
            (pi * x).sin() / (pi * x)
        };
        let window = 0.42 + 0.5 * (pi * x / half).cos() + 0.08 * (2.0 * pi * x / half).cos();
        *c = sinc * window;
    }

    let sum: f32 = coefficients.iter().sum();
    let scale = SQ3_12_ONE as f32 / sum;

    for (q, c) in row.iter_mut().zip(coefficients.iter()) {
        *q = (c * scale).round() as Sq3_12;
    }

    // Unity DC gain after quantization.
    let total: i32 = row.iter().map(|&q| q as i32).sum();
    let peak = (0..FIR_TAP).max_by_key(|&j| row[j].abs()).unwrap_or(FIR_TAP / 2);
    row[peak] += (SQ3_12_ONE - total) as Sq3_12;
}
