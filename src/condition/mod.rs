//! Reusable filter fragments and their conjunction.

mod build;
mod types;

pub use build::{
    equal_to, fragment, in_values, object_id_in, object_id_match, object_id_match_with, pipe,
    string_starts_with, string_starts_with_ci, try_pipe,
};
pub use types::{CompositeFilter, Condition, ConditionKind, Fragment};
