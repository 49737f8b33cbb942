pub use bearing::*;
pub use bounds::*;
pub use detect::*;
pub use fetch::*;
pub use matching::*;
pub use track::*;

mod bearing;
mod bounds;
mod detect;
mod fetch;
mod matching;
mod track;
