//! Reverse granular playback.
//!
//! Two grains read the input history backwards, each under a Hann envelope.
//! Whenever the origin grain has played half of its length, the other slot is
//! respawned at the newest input sample and becomes the origin, so the envelopes
//! of the two grains always overlap by half a period and sum to unity.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

use crate::delay::window::window;
use crate::utils::fixed::{sq3_28_to_sq15_16, Sq3_28, Sq7_24, SQ15_16_BITS, SQ3_28_ONE};
use crate::utils::ring_buffer::RingBuffer;

pub const GRAIN_COUNT: usize = 2;

/// Origin phase at or below which the next grain is spawned.
pub const RESPAWN_PHASE: Sq3_28 = SQ3_28_ONE - SQ3_28_ONE / GRAIN_COUNT as Sq3_28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainState {
    /// Phase has run out, the grain is silent.
    Inactive,
    Active,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Grain {
    counter: u32,
    phase: Sq3_28,
    step: Sq3_28,
    size: u32,
    pointer: usize,
}

impl Grain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the grain at full phase, reading backwards from `pointer`.
    ///
    /// The phase step is rounded up, so the phase reaches zero after at most
    /// `size` samples.
    pub fn spawn(&mut self, pointer: usize, size: u32) {
        debug_assert!(size > 0, "grain size must not be zero");
        let size = size.max(1);

        self.counter = 0;
        self.phase = SQ3_28_ONE;
        self.step = SQ3_28_ONE / size as Sq3_28;
        self.size = size;
        self.pointer = pointer;

        if (self.step as i64) * (size as i64) < SQ3_28_ONE as i64 {
            self.step += 1;
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.phase -= self.step;
        self.counter = self.counter.wrapping_add(1);
    }

    #[inline]
    pub fn state(&self) -> GrainState {
        if self.phase > 0 {
            GrainState::Active
        } else {
            GrainState::Inactive
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state() == GrainState::Active
    }

    /// Remaining phase, `1.0` at spawn.
    pub fn phase(&self) -> Sq3_28 {
        self.phase
    }

    pub fn step(&self) -> Sq3_28 {
        self.step
    }

    pub fn set_step(&mut self, step: Sq3_28) {
        self.step = step;
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Samples played since spawn.
    pub fn elapsed(&self) -> u32 {
        self.counter
    }

    /// Buffer position of the newest input sample at spawn time.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// The history sample currently under the read head.
    #[inline]
    pub fn source(&self, input: &RingBuffer) -> Sq7_24 {
        input.at(self.pointer as isize + self.counter as isize)
    }

    /// Windowed output, zero while inactive.
    #[inline]
    pub fn render(&self, input: &RingBuffer) -> Sq7_24 {
        if !self.is_active() {
            return 0;
        }

        let t = SQ3_28_ONE - self.phase;
        let value = self.source(input) as i64;

        ((value * window(sq3_28_to_sq15_16(t)) as i64) >> SQ15_16_BITS) as Sq7_24
    }
}

#[derive(Debug, Default, Clone)]
pub struct GrainEngine {
    origin: usize,
    grains: [Grain; GRAIN_COUNT],
}

impl GrainEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn grains(&self) -> &[Grain; GRAIN_COUNT] {
        &self.grains
    }

    /// Advances all grains by one sample and respawns when the origin is half done.
    ///
    /// The new grain starts at the newest sample of `input` and lasts `grain_size`
    /// samples. Its phase step is copied to every slot, keeping the envelopes
    /// period-locked. Returns `true` if a grain was spawned.
    #[inline]
    pub fn advance(&mut self, input: &RingBuffer, grain_size: u32) -> bool {
        for grain in self.grains.iter_mut() {
            grain.advance();
        }

        if self.grains[self.origin].phase > RESPAWN_PHASE {
            return false;
        }

        self.origin = (self.origin + 1) % GRAIN_COUNT;

        let origin = &mut self.grains[self.origin];
        origin.spawn(input.write_ptr(), grain_size);
        let step = origin.step;

        for grain in self.grains.iter_mut() {
            grain.set_step(step);
        }

        true
    }

    /// Overlap-add of all active grains.
    ///
    /// The Hann envelopes of two grains half a period apart add up to one, so no
    /// normalization is applied. Other grain counts would need one here.
    #[inline]
    pub fn render(&self, input: &RingBuffer) -> Sq7_24 {
        self.grains
            .iter()
            .map(|grain| grain.render(input))
            .fold(0, |sum, sample| sum.wrapping_add(sample))
    }
}
