//! Local search refinement of individual tours.
//!
//! - [`two_opt`]: segment-reversal improvement to a 2-opt local optimum

mod two_opt;

pub use two_opt::{two_opt, IMPROVEMENT_EPSILON};
