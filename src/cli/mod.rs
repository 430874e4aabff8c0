//! Command-line interface module.

mod args;
pub mod build;
pub mod list;
pub mod serve;

pub use args::{Cli, Commands};
