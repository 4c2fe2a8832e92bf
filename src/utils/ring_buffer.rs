//! Sample history over caller-owned memory.
//!
//! The buffer grows backwards: every write decrements the write pointer first, so
//! the newest sample sits at offset 0 and a sample written `n` writes ago at offset `n`.
//! Indices are wrapped with a bit mask, which makes every offset valid and the
//! history periodic with the buffer capacity.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

use crate::utils::fixed::Sq7_24;

#[derive(Debug)]
pub struct RingBuffer<'a> {
    line: &'a mut [Sq7_24],
    mask: usize,
    write_ptr: usize,
}

impl<'a> RingBuffer<'a> {
    /// Binds the storage. The contents are left as they are.
    ///
    /// # Panics
    ///
    /// Panics if the length of `line` is not a power of two.
    pub fn new(line: &'a mut [Sq7_24]) -> Self {
        assert!(
            line.len().is_power_of_two(),
            "ring buffer capacity must be a power of two, got {}",
            line.len()
        );
        let mask = line.len() - 1;

        Self {
            line,
            mask,
            write_ptr: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.line.len()
    }

    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Position of the newest sample.
    #[inline]
    pub fn write_ptr(&self) -> usize {
        self.write_ptr
    }

    /// Zeroes the history. The write pointer keeps its position.
    pub fn clear(&mut self) {
        self.line.fill(0);
    }

    #[inline]
    pub fn write(&mut self, sample: Sq7_24) {
        self.write_ptr = self.write_ptr.wrapping_sub(1) & self.mask;
        self.line[self.write_ptr] = sample;
    }

    /// Reads the sample `offset` writes back from the newest one.
    #[inline]
    pub fn read(&self, offset: isize) -> Sq7_24 {
        self.line[self.write_ptr.wrapping_add_signed(offset) & self.mask]
    }

    /// Reads at an absolute position, wrapped into the buffer.
    #[inline]
    pub fn at(&self, index: isize) -> Sq7_24 {
        self.line[index as usize & self.mask]
    }
}
