//! Test utilities for SportZone services.
//!
//! Envelope assertions and domain fixture builders.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod envelope;
pub mod fixture;
