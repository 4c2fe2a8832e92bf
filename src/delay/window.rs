//! Grain envelope.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

use crate::resources::window::{LUT_GRAIN_WINDOW, WINDOW_BITS, WINDOW_MASK};
use crate::utils::fixed::{Sq15_16, SQ15_16_BITS, SQ15_16_ONE, SQ1_14_BITS};

const FRACTION_BITS: u32 = SQ15_16_BITS - WINDOW_BITS;
const FRACTION_MASK: i32 = (SQ15_16_ONE - 1) >> WINDOW_BITS;

/// Hann envelope over one period, `t` in `[0, 1)`.
///
/// The table index comes from the top bits of `t`, the low bits interpolate
/// linearly towards the next entry. The table wraps, so `window(1.0) == window(0.0) == 0`
/// and `window(0.5)` is unity.
///
/// At `t = 0`, `0.25`, `0.5` and `0.75` this matches the triangle
/// `1 - |2t - 1|` exactly, which is what the table replaces.
#[inline]
pub fn window(t: Sq15_16) -> Sq15_16 {
    let i = (t >> FRACTION_BITS) as usize;
    let fraction = t & FRACTION_MASK;

    let a = LUT_GRAIN_WINDOW[i & WINDOW_MASK] as i32;
    let b = LUT_GRAIN_WINDOW[i.wrapping_add(1) & WINDOW_MASK] as i32;

    let value = a + (((b - a) * fraction) >> FRACTION_BITS);
    value << (SQ15_16_BITS - SQ1_14_BITS)
}
