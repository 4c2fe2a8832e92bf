//! Fixed-point formats.
//!
//! `SqI_F` stands for a signed value with `I` integer bits and `F` fraction bits,
//! the sign bit being implied. All formats are stored in plain integers and
//! converted with arithmetic shifts, truncating towards negative infinity.
//!
//! | Alias     | Storage | Used for                                  |
//! |-----------|---------|-------------------------------------------|
//! | `Sq7_24`  | `i32`   | audio samples, `1 << 24` is full scale    |
//! | `Sq3_28`  | `i32`   | grain phase and phase increments          |
//! | `Sq15_16` | `i32`   | window envelope values                    |
//! | `Sq1_14`  | `u16`   | window table entries                      |
//! | `Sq3_12`  | `i16`   | FIR coefficients                          |
//! | `Uq8`     | `u32`   | smoothed delay length (8 fraction bits)   |

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

pub type Sq7_24 = i32;
pub type Sq3_28 = i32;
pub type Sq15_16 = i32;
pub type Sq1_14 = u16;
pub type Sq3_12 = i16;
pub type Uq8 = u32;

pub const SQ7_24_BITS: u32 = 24;
pub const SQ3_28_BITS: u32 = 28;
pub const SQ15_16_BITS: u32 = 16;
pub const SQ1_14_BITS: u32 = 14;
pub const SQ3_12_BITS: u32 = 12;
pub const UQ8_BITS: u32 = 8;

pub const SQ7_24_ONE: Sq7_24 = 1 << SQ7_24_BITS;
pub const SQ3_28_ONE: Sq3_28 = 1 << SQ3_28_BITS;
pub const SQ15_16_ONE: Sq15_16 = 1 << SQ15_16_BITS;
pub const SQ1_14_ONE: Sq1_14 = 1 << SQ1_14_BITS;
pub const SQ3_12_ONE: i32 = 1 << SQ3_12_BITS;

/// Converts a float to Q7.24, saturating at the format limits.
#[inline]
pub fn sq7_24_from_f32(x: f32) -> Sq7_24 {
    (x * SQ7_24_ONE as f32) as Sq7_24
}

#[inline]
pub fn sq7_24_to_f32(x: Sq7_24) -> f32 {
    x as f32 / SQ7_24_ONE as f32
}

/// Reduces a phase value to the window format.
#[inline]
pub fn sq3_28_to_sq15_16(x: Sq3_28) -> Sq15_16 {
    x >> (SQ3_28_BITS - SQ15_16_BITS)
}

/// Multiplies in 64 bits and drops `shift` fraction bits.
#[inline]
pub fn mul_shift(a: i32, b: i32, shift: u32) -> i32 {
    ((a as i64 * b as i64) >> shift) as i32
}

/// Unsigned variant of [`mul_shift`], used where both operands are magnitudes.
#[inline]
pub fn mul_shift_u(a: u32, b: u32, shift: u32) -> u32 {
    ((a as u64 * b as u64) >> shift) as u32
}
