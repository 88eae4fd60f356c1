pub mod aggregate;
pub mod cli;
pub mod condition;
pub mod config;
pub mod errors;
pub mod ident;
pub mod json;
pub mod logger;
pub mod pretty;
pub mod template;
pub mod types;

pub use aggregate::{Operation, Pipeline, Stage};
pub use condition::{CompositeFilter, Condition, Fragment};
pub use errors::QueryError;
pub use ident::IdFallback;
pub use template::{Template, TextFormat};
