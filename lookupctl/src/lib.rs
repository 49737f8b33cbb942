//! Library part of the `lookupctl` utility.
//!
//! Each sub-command lives in its own module under `cmds`, they all take the loaded
//! configuration and their own options and write their results on `stdout`.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;
