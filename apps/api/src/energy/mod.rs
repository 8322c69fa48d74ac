// Energy matrix: per-task quadrant classification and company-level synthesis.
// Everything here except handlers is pure; persistence goes through `store`.

pub mod handlers;
pub mod pipeline;
pub mod quadrant;
pub mod synthesis;
pub mod weights;
