//! Configuration for `lookupctl`.
//!
//! Everything is optional: without a file we run on the defaults.  The feed API key can also
//! come from the environment, which always wins over the file.
//!
//! ```hcl
//! version = 1
//!
//! api_key = "..."
//!
//! home {
//!   lat = 50.8
//!   lon = 4.4
//! }
//!
//! tracker {
//!   tolerance = 10
//!   radius_km = 15
//! }
//! ```
//!
//! Version History:
//!
//! - v1 is the initial one
//!

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use lookup_common::{ConfigFile, GeoPoint, Status, Versioned};
use lookup_macros::into_configfile;
use lookup_tracker::TrackerConfig;

/// Environment variable overriding `api_key`
pub const API_KEY_ENV: &str = "FR24_API_KEY";

#[into_configfile(version = 1, filename = "lookupctl.hcl")]
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CtlConfig {
    /// Bearer token for the flight feed
    pub api_key: Option<String>,
    /// Default location for `fetch` when none is given
    pub home: Option<GeoPoint>,
    pub tracker: TrackerConfig,
}

impl CtlConfig {
    /// Load the given file or the default one.  A missing default file is not an error, a
    /// missing explicit one is.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<Self> {
        let mut cfg = match ConfigFile::<CtlConfig>::load(fname, Self::FILENAME) {
            Ok(cfile) => cfile.into_inner(),
            Err(e) => match (fname, e.downcast_ref::<Status>()) {
                (None, Some(Status::MissingConfig(..) | Status::NoHomeDir)) => {
                    info!("no configuration file, using defaults");
                    CtlConfig {
                        version: Self::VERSION,
                        ..Default::default()
                    }
                }
                _ => return Err(e),
            },
        };
        trace!("config version {}", cfg.version());

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            debug!("api key from {API_KEY_ENV}");
            cfg.api_key = Some(key);
        }
        cfg.tracker.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse() {
        let cfg = ConfigFile::<CtlConfig>::parse(
            r#"
            version = 1
            api_key = "secret"
            home {
              lat = 50.8
              lon = 4.4
            }
            tracker {
              tolerance = 5
            }
            "#,
        )
        .unwrap();
        assert_eq!(Some("secret".to_string()), cfg.api_key);
        assert_eq!(Some(GeoPoint::new(50.8, 4.4)), cfg.home);
        assert_eq!(5., cfg.tracker.tolerance);
        assert_eq!(900, cfg.tracker.duration_ms);
    }

    #[test]
    fn test_bad_version() {
        let r = ConfigFile::<CtlConfig>::parse("version = 2\n");
        assert!(r.is_err());
        // missing means 0
        assert!(ConfigFile::<CtlConfig>::parse("api_key = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_missing() {
        assert!(CtlConfig::load(Some("/nonexistent/lookupctl.hcl")).is_err());
    }

    #[test]
    fn test_load_invalid_tracker() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "version = 1\ntracker {{\n  tolerance = 0\n}}").unwrap();
        let path = f.path().to_string_lossy().to_string();
        assert!(CtlConfig::load(Some(&path)).is_err());
    }
}
