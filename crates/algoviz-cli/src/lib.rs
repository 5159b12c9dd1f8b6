#![forbid(unsafe_code)]

//! Terminal driver for algoviz.
//!
//! `algoviz run` animates a sort in the terminal, `algoviz trace` dumps the
//! recorded step log as JSON and `algoviz list` prints the algorithms with
//! their pseudocode.

pub mod cli;
pub mod error;
pub mod render;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
