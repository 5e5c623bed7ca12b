//! Shared utilities.
//!
//! Frame timing and the fixed tick clock of the mirror worker.

pub mod frame_timing;
