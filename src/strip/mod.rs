//! Strip assembly: layout, parallel frame decoding and single-shot finalization.

/// Jobs, generations and the finished strip.
pub mod assembler;
/// Exactly-once completion counting.
pub mod barrier;
/// Strip geometry.
pub mod layout;
