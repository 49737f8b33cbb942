//! `match` sub-command: which flight of a saved snapshot is in view.
//!

use std::fs;

use eyre::Result;
use tracing::{info, trace};

use lookup_formats::{check_position, FlightPositions};
use lookup_tracker::{nearest_first, FovMatcher, TrackerConfig};

use crate::{CtlConfig, MatchOpts};

#[tracing::instrument(skip(cfg))]
pub fn match_in_file(cfg: &CtlConfig, opts: &MatchOpts) -> Result<String> {
    trace!("match_in_file({:?})", opts.file);

    // Command line wins over the configuration
    //
    let tcfg = TrackerConfig {
        tolerance: opts.tolerance.unwrap_or(cfg.tracker.tolerance),
        heading_offset: opts.offset.unwrap_or(cfg.tracker.heading_offset),
        ..cfg.tracker
    };
    tcfg.validate()?;

    let user = check_position(opts.pos.lat, opts.pos.lon)?;
    let data = fs::read_to_string(&opts.file)?;
    let mut flights = FlightPositions::from_json(&data)?.to_positions();
    info!("{} flights in snapshot", flights.len());

    if opts.nearest {
        nearest_first(&user, &mut flights);
    }

    let matcher = FovMatcher::from_config(&tcfg);
    let res = match matcher.in_view(Some(&user), Some(opts.heading), &flights) {
        Some(f) => format!(
            "In view: {f}, bearing {:.1}°, {:.1} km",
            user.bearing_to(&f.position),
            user.distance_to(&f.position)
        ),
        None => "no flight in view".to_string(),
    };
    Ok(res)
}
