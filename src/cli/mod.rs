pub mod args;
pub mod commands;

pub use args::{Cli, Commands, InputArgs};
pub use commands::{run, summarize};
