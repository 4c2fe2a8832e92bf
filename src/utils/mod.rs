//! Utility functions.
//!
//! Fixed-point helpers and the sample history shared by the delay and the grain engine.

pub mod fixed;
pub mod ring_buffer;
