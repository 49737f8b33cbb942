//! This library is there to share some common code amongst all lookup modules.
//!
//! - geodesy on a spherical Earth (bearings, distances, destination points, bounding boxes)
//! - logging initialisation
//! - versioned HCL configuration files
//!

mod config;
mod error;
mod location;
mod logging;
mod macros;

use clap::{crate_name, crate_version};
pub use config::*;
pub use error::*;
pub use location::*;
pub use logging::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Anything carrying a file format version.
///
/// Usually implemented through `#[into_configfile(...)]` from `lookup-macros`.
///
pub trait Versioned {
    /// Version this build knows how to read.
    const VERSION: usize;

    /// Version actually found in the data.
    fn version(&self) -> usize;
}
