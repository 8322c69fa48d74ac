// Company evaluations: flags grouped by mountain element and severity, with
// task implications that feed the energy matrix.

pub mod handlers;
pub mod merge;
pub mod models;
pub mod save;
pub mod slug;
pub mod time_estimate;
