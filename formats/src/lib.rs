//! Definition of the data formats
//!
//! Everything coming from outside (flight feed, object detector) is deserialised here into
//! explicit schemas and validated before being converted into the types used by the tracker.
//! Nothing past this crate should ever see a NaN coordinate or an inverted box.
//!

// Re-export for convenience
//
pub use aircraft::*;
pub use detector::*;
pub use error::*;
pub use fr24::*;
pub use region::*;

mod aircraft;
mod detector;
mod error;
mod fr24;
mod region;
