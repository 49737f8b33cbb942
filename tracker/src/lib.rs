//! Core of lookup: which aircraft is the user pointing at, and where to draw the marker for
//! what the camera sees.
//!
//! Everything but `session` is synchronous and driven by an explicit clock (a `Duration` since
//! an arbitrary origin) so that it can be stepped in tests.  `session` wires it to tokio
//! timers and `watch` channels.
//!

pub use config::*;
pub use error::*;
pub use heading::*;
pub use marker::*;
pub use matcher::*;
pub use multi::*;
pub use session::*;
pub use smoother::*;
pub use tooltip::*;
pub use tween::*;

mod config;
mod error;
mod heading;
mod marker;
mod matcher;
mod multi;
mod session;
mod smoother;
mod tooltip;
mod tween;
