//! Text templates with `{{name}}` placeholders, rendered against a variable
//! mapping and decoded into a caller-chosen type.
//!
//! The engine treats the template as opaque text until every placeholder is
//! substituted; only then is the result parsed. Values are not escaped, so a
//! template that wants a JSON string writes the quotes itself:
//!
//! ```text
//! { "name": { "$regex": "{{pattern}}" }, "age": {{age}} }
//! ```

mod decode;
mod render;
mod scan;

pub use decode::TextFormat;
pub use render::{Template, build, build_as, build_document, build_with, render, value_text};
