//! FIR interpolated reads from a ring buffer.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

use crate::resources::fir::FIR_VALUE_BITS;
use crate::utils::fixed::{Sq3_12, Sq7_24};
use crate::utils::ring_buffer::RingBuffer;

/// Inner product of `taps` with the samples at `index`, `index + 1`, ...
///
/// Accumulates in 64 bits and drops the coefficient fraction bits at the end.
#[inline]
pub fn resample(buffer: &RingBuffer, index: isize, taps: &[Sq3_12]) -> Sq7_24 {
    let mut acc: i64 = 0;

    for (j, &tap) in taps.iter().enumerate() {
        acc += buffer.at(index + j as isize) as i64 * tap as i64;
    }

    (acc >> FIR_VALUE_BITS) as Sq7_24
}
