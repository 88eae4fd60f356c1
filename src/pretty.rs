//! Human-readable output for filters, stages, pipelines and rendered documents.
//!
//! Builders never print; callers inject a [`Printer`] where they want output.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

use crate::errors::QueryError;

pub trait Printer {
    /// # Errors
    /// Returns an error if `value` cannot be serialized or the sink fails.
    fn print<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), QueryError>;
}

/// Writes indented JSON, one value per call, each followed by a newline.
///
/// Identifiers appear in extended-JSON form (`{"$oid": ".."}`) so the output can be
/// pasted into a shell query.
pub struct JsonPrinter<W: Write> {
    writer: W,
    indent: Vec<u8>,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_indent(writer, "    ")
    }

    pub fn with_indent(writer: W, indent: &str) -> Self {
        Self { writer, indent: indent.as_bytes().to_vec() }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn print<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), QueryError> {
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut ser = Serializer::with_formatter(&mut self.writer, formatter);
        value.serialize(&mut ser)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// # Errors
/// Returns an error if `value` cannot be serialized.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String, QueryError> {
    let mut printer = JsonPrinter::new(Vec::new());
    printer.print(value)?;
    String::from_utf8(printer.into_inner()).map_err(|e| QueryError::Io(e.to_string()))
}
