//! Error module
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Status {
    #[error("No API key, set {0} or api_key in the configuration file")]
    NoApiKey(&'static str),
    #[error("Nothing to ask for, give a flight, a route or a position")]
    NoCriteria,
    #[error("Feed returned {0}: {1}")]
    FeedError(u16, String),
    #[error("No usable detection in {0}")]
    NoDetection(String),
}
