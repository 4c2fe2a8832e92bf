//! Delay with a granular reverse output.
//!
//! Per sample, the host calls [`ReverseDelay::push_input`] and
//! [`ReverseDelay::update_delay_length`] (in either order), then reads
//! [`ReverseDelay::delay_output`] and [`ReverseDelay::reverse_output`].
//!
//! Two histories are kept. The *reverse* history holds the raw input and feeds the
//! grains. The *sampling* history holds whatever the host mixes for the delay path
//! (typically reverse output plus feedback) and is read back through the
//! fractional delay filters.
//!
//! Grains last half of the smoothed delay length, which makes the reverse echoes
//! line up with the delay time.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

pub mod grain;
pub mod resampler;
pub mod smoother;
pub mod window;

use log::debug;

use crate::resources::fir::{fir_bank, FirBank, FIR_TAP};
use crate::utils::fixed::{Sq7_24, Uq8, UQ8_BITS};
use crate::utils::ring_buffer::RingBuffer;

use grain::{Grain, GrainEngine, GRAIN_COUNT};
use resampler::resample;
use smoother::{DelaySmoother, MAX_GRAIN_SIZE};

pub const INPUT_BUFFER_BITS: u32 = 18;
pub const SAMPLING_BUFFER_BITS: u32 = 18;

/// Recommended capacity for both histories.
pub const DELAY_BUFFER_SIZE: usize = 1 << INPUT_BUFFER_BITS;

/// Smallest capacity that holds the longest delay plus the filter span.
pub const MIN_BUFFER_SIZE: usize = (MAX_GRAIN_SIZE as usize) << 1;

/// Caller-owned storage for the two histories.
#[derive(Debug)]
pub struct DelayBuffers<'a> {
    /// Raw input, read backwards by the grains.
    pub reverse: &'a mut [Sq7_24],
    /// Feedback mix, read by the delay output.
    pub sampling: &'a mut [Sq7_24],
}

#[derive(Debug)]
pub struct ReverseDelay<'a> {
    input: RingBuffer<'a>,
    sampling: RingBuffer<'a>,
    grains: GrainEngine,
    smoother: DelaySmoother,
    fir: &'static FirBank,
}

impl<'a> ReverseDelay<'a> {
    /// Binds the history buffers and resets the engine state.
    ///
    /// The buffer contents are used as they are; pass zeroed memory for a silent start.
    ///
    /// # Panics
    ///
    /// Panics if a buffer length is not a power of two or is below [`MIN_BUFFER_SIZE`].
    pub fn new(buffers: DelayBuffers<'a>) -> Self {
        assert!(
            buffers.reverse.len() >= MIN_BUFFER_SIZE,
            "reverse buffer needs at least {MIN_BUFFER_SIZE} samples"
        );
        assert!(
            buffers.sampling.len() >= MIN_BUFFER_SIZE,
            "sampling buffer needs at least {MIN_BUFFER_SIZE} samples"
        );

        let input = RingBuffer::new(buffers.reverse);
        let sampling = RingBuffer::new(buffers.sampling);
        debug!(
            "delay buffers bound: reverse {} samples, sampling {} samples",
            input.capacity(),
            sampling.capacity()
        );

        let mut delay = Self {
            input,
            sampling,
            grains: GrainEngine::new(),
            smoother: DelaySmoother::new(),
            fir: fir_bank(),
        };
        delay.reset();

        delay
    }

    /// Returns grains and delay length to their defaults. Histories are untouched.
    pub fn reset(&mut self) {
        self.grains.reset();
        self.smoother.reset();
        debug!("delay reset, length {} samples", self.smoother.samples());
    }

    /// Zeroes both histories.
    pub fn clear(&mut self) {
        self.input.clear();
        self.sampling.clear();
    }

    /// Requests a delay length in samples and advances the smoothing by one step.
    ///
    /// Requests outside `MIN_GRAIN_SIZE..=MAX_GRAIN_SIZE` are ignored.
    #[inline]
    pub fn update_delay_length(&mut self, requested: u32) {
        self.smoother.update(requested);
    }

    /// Writes one sample into each history and advances the grains.
    #[inline]
    pub fn push_input(&mut self, input: Sq7_24, sampling: Sq7_24) {
        self.input.write(input);

        let grain_size = self.smoother.length() >> (UQ8_BITS + 1);
        self.grains.advance(&self.input, grain_size);

        self.sampling.write(sampling);
    }

    /// Sampling history delayed by the smoothed length, fractional part included.
    #[inline]
    pub fn delay_output(&self) -> Sq7_24 {
        let length = self.smoother.length();
        let index = self.sampling.write_ptr() as isize - (FIR_TAP >> 1) as isize
            + (length >> UQ8_BITS) as isize;

        resample(&self.sampling, index, self.fir.taps(length))
    }

    /// Overlap-add of the reverse grains.
    #[inline]
    pub fn reverse_output(&self) -> Sq7_24 {
        self.grains.render(&self.input)
    }

    /// Integer part of the smoothed delay length.
    pub fn delay_length(&self) -> u32 {
        self.smoother.samples()
    }

    pub fn smoothed_length(&self) -> Uq8 {
        self.smoother.length()
    }

    pub fn target_length(&self) -> u32 {
        self.smoother.target()
    }

    pub fn grains(&self) -> &[Grain; GRAIN_COUNT] {
        self.grains.grains()
    }

    pub fn origin_index(&self) -> usize {
        self.grains.origin()
    }

    pub fn input_history(&self) -> &RingBuffer<'a> {
        &self.input
    }

    pub fn sampling_history(&self) -> &RingBuffer<'a> {
        &self.sampling
    }
}
