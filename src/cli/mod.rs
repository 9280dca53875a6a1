//! Terminal front end for the tracker: a small command shell plus a
//! key-driven carousel browser.

mod context;
pub mod navigation;
pub mod output;
mod shell;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
