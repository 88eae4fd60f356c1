//! Aggregation pipeline construction.

mod pipeline;
mod stage;

pub use pipeline::{Pipeline, pipe};
pub use stage::{Operation, Stage, limit, match_stage, project, skip, sort};
