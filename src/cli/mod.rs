//! CLI module - argument parsing, interactive prompts and stage runners

pub mod args;
pub mod commands;
mod prompts;

pub use args::{Cli, Commands, PredictArgs, PrepareArgs, TrainArgs};
pub use commands::*;
pub use prompts::*;
