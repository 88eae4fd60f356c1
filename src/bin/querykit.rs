use clap::{Parser, Subcommand};
use querykit::cli::{self, Command};
use querykit::config::BuilderConfig;
use querykit::errors::QueryError;
use querykit::logger;
use querykit::pretty::JsonPrinter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "querykit", version, about = "Render query templates and check identifiers")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Render a template and print the decoded document
    Render {
        #[arg(long)]
        template: PathBuf,
        /// Variable binding, `name=value`; may be repeated
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
        /// JSON object file with typed variables; `--var` entries override it
        #[arg(long)]
        vars_json: Option<PathBuf>,
        /// Decode as extended JSON regardless of configuration
        #[arg(long)]
        extended: bool,
    },
    /// List the placeholder names a template references
    Placeholders {
        #[arg(long)]
        template: PathBuf,
    },
    /// Validate an identifier and print its canonical hex form
    Oid {
        hex: String,
        /// Print a generated identifier instead of failing
        #[arg(long)]
        fallback: bool,
    },
}

impl From<Cmd> for Command {
    fn from(cmd: Cmd) -> Self {
        match cmd {
            Cmd::Render { template, vars, vars_json, extended } => {
                Command::Render { template, vars, vars_json, extended }
            }
            Cmd::Placeholders { template } => Command::Placeholders { template },
            Cmd::Oid { hex, fallback } => Command::Oid { hex, fallback },
        }
    }
}

fn run(cli: Cli) -> Result<(), QueryError> {
    let cfg = BuilderConfig::load(cli.config.as_deref())?;
    if let Err(e) = logger::init_console(cfg.log_level.as_deref()) {
        eprintln!("warning: logging disabled: {e}");
    }
    let mut out = JsonPrinter::new(std::io::stdout().lock());
    cli::run(cli.command.into(), &cfg, &mut out)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
