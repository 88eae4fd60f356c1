mod command;
mod runner;

pub use command::Command;
pub use runner::{collect_vars, run};
