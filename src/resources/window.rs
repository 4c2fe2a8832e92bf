//! Hann window, one full period in Q1.14.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

use crate::utils::fixed::Sq1_14;

pub const WINDOW_BITS: u32 = 6;
pub const WINDOW_SIZE: usize = 1 << WINDOW_BITS;
pub const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// `sin(pi * i / 64)^2`. Entries half a period apart sum to exactly `1 << 14`.
#[rustfmt::skip]
pub const LUT_GRAIN_WINDOW: [Sq1_14; WINDOW_SIZE] = [
    0x0000, 0x0027, 0x009D, 0x0161, 0x0270, 0x03C7, 0x0565, 0x0743,
    0x095F, 0x0BB3, 0x0E39, 0x10EA, 0x13C1, 0x16B6, 0x19C2, 0x1CDD,
    0x2000, 0x2323, 0x263E, 0x294A, 0x2C3F, 0x2F16, 0x31C7, 0x344D,
    0x36A1, 0x38BD, 0x3A9B, 0x3C39, 0x3D90, 0x3E9F, 0x3F63, 0x3FD9,
    0x4000, 0x3FD9, 0x3F63, 0x3E9F, 0x3D90, 0x3C39, 0x3A9B, 0x38BD,
    0x36A1, 0x344D, 0x31C7, 0x2F16, 0x2C3F, 0x294A, 0x263E, 0x2323,
    0x2000, 0x1CDD, 0x19C2, 0x16B6, 0x13C1, 0x10EA, 0x0E39, 0x0BB3,
    0x095F, 0x0743, 0x0565, 0x03C7, 0x0270, 0x0161, 0x009D, 0x0027,
];
