// Career Match Scoring Engine.
// Pure, synchronous scoring: profile in, ranked careers out. The catalog is
// passed in by reference and never mutated.

pub mod aggregator;
pub mod handlers;
pub mod profile;
pub mod scorers;
pub mod weights;
