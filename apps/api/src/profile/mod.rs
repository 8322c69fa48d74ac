// Energy profile: the drains, generators and strengths every evaluation is scored against.
// One profile is current at a time; each save is a new version.

pub mod handlers;
pub mod models;
pub mod validation;
