//! Cross-crate test suite for the altscore engine.
//!
//! Integration tests under `tests/` check score-range, ordering,
//! monotonicity and variance invariants over randomized inputs, plus the
//! canned-profile scenarios end to end.

pub mod helpers;
