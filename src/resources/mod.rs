//! Lookup tables.

// Based on MIT-licensed code (c) 2019 by Tomoaki Itoh

pub mod fir;
pub mod window;
