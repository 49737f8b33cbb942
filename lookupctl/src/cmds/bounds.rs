//! `bounds` sub-command.
//!

use eyre::Result;
use tracing::trace;

use lookup_common::{list_cardinals, validate_radius, BB};
use lookup_formats::check_position;

use crate::{BoundsOpts, CtlConfig};

/// Cardinal points around the position and the bounds string used to query the feed.
///
#[tracing::instrument(skip(cfg))]
pub fn bounds_around(cfg: &CtlConfig, opts: &BoundsOpts) -> Result<String> {
    trace!("bounds_around");

    let radius = validate_radius(opts.radius.unwrap_or(cfg.tracker.radius_km))?;
    let center = check_position(opts.pos.lat, opts.pos.lon)?;
    let bb = BB::from_location(&center, radius);

    Ok(format!(
        "{}\nBounds (N,S,W,E): {}",
        list_cardinals(&center, radius),
        bb.to_bounds_string()
    ))
}
