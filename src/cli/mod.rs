pub mod commands;
pub mod core;
pub mod forms;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub(crate) mod shell;

pub use shell::{run_cli, SCRIPT_ENV};
