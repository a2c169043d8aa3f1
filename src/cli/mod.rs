//! Command-line interface module.

mod args;
pub mod migrate;

pub use args::Cli;
