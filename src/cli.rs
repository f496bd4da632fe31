//! CLI domain: parse, route and output only.
//! The shell engine lives in `shell`; this layer wires it to the process.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::{load_config, run, RunMode};
