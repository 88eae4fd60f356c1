use super::Command;
use crate::config::BuilderConfig;
use crate::errors::QueryError;
use crate::ident::{self, IdFallback};
use crate::json;
use crate::pretty::Printer;
use crate::template::{Template, TextFormat};
use bson::Document;
use std::path::Path;

fn read_text(path: &Path) -> Result<String, QueryError> {
    std::fs::read_to_string(path).map_err(|e| QueryError::Io(format!("{}: {e}", path.display())))
}

/// Builds the variable set for a render: the JSON object file first, then each
/// `NAME=VALUE` pair as a string binding on top of it.
///
/// # Errors
/// [`QueryError::Config`] for an unreadable object file or a pair without `=`,
/// [`QueryError::EmptyKey`] for a pair with an empty name.
pub fn collect_vars(pairs: &[String], vars_json: Option<&Path>) -> Result<Document, QueryError> {
    let mut vars = match vars_json {
        Some(p) => json::parse_document(&read_text(p)?)
            .map_err(|e| QueryError::Config(format!("{}: {e}", p.display())))?,
        None => Document::new(),
    };
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(QueryError::Config(format!("expected NAME=VALUE, got '{pair}'")));
        };
        if name.is_empty() {
            return Err(QueryError::EmptyKey);
        }
        vars.insert(name, value);
    }
    Ok(vars)
}

/// Executes one command, writing its result through `out`.
///
/// # Errors
/// Any error from reading inputs, parsing the template or building the result.
pub fn run<P: Printer>(cmd: Command, cfg: &BuilderConfig, out: &mut P) -> Result<(), QueryError> {
    match cmd {
        Command::Render { template, vars, vars_json, extended } => {
            let tpl = Template::parse(&read_text(&template)?)?;
            let vars = collect_vars(&vars, vars_json.as_deref())?;
            let format = if extended { TextFormat::ExtendedJson } else { cfg.format };
            log::debug!("render {} as {format:?}", template.display());
            out.print(&tpl.build_as(&vars, format)?)
        }
        Command::Placeholders { template } => {
            let tpl = Template::parse(&read_text(&template)?)?;
            out.print(&tpl.placeholders())
        }
        Command::Oid { hex, fallback } => {
            let policy = if fallback { IdFallback::Generate } else { cfg.id_fallback };
            let oid = ident::parse_object_id_with(&hex, policy)?;
            out.print(&oid.to_hex())
        }
    }
}
