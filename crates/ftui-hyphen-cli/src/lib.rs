#![forbid(unsafe_code)]

//! Command-line front end for `ftui-hyphen`.

pub mod cli;
pub mod error;
pub mod logging;

pub use cli::{Cli, run, run_from_env};
pub use error::{CliError, Result};
