//! Command-line interface

pub mod args;
pub mod commands;
mod render;

pub use args::{Cli, Commands};
