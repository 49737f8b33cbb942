//! Field-of-view matcher: is there an aircraft in the direction the user is facing?
//!
//! For each aircraft we take the initial great-circle bearing from the user and compare it
//! with the heading.  The first one within the tolerance window wins, in input order; sort
//! the snapshot beforehand (see [`nearest_first`]) if the closest one is wanted instead.
//!

use tracing::{debug, trace};

use lookup_common::{angular_diff, GeoPoint};
use lookup_formats::AircraftPosition;

use crate::{HeadingOffset, TrackerConfig};

/// First aircraft within `tolerance` degrees of `heading` as seen from `user`.
///
/// Pure, O(n) and stops at the first hit.
///
pub fn find_flight_in_view<'a>(
    user: &GeoPoint,
    heading: f64,
    flights: &'a [AircraftPosition],
    tolerance: f64,
) -> Option<&'a AircraftPosition> {
    flights
        .iter()
        .find(|f| angular_diff(heading, user.bearing_to(&f.position)) <= tolerance)
}

/// Sort a snapshot by distance from `user`, keeping the feed order for ties.
///
#[tracing::instrument(skip(flights))]
pub fn nearest_first(user: &GeoPoint, flights: &mut [AircraftPosition]) {
    flights.sort_by(|a, b| {
        user.distance_to(&a.position)
            .total_cmp(&user.distance_to(&b.position))
    });
}

/// Matcher with its parameters.
///
#[derive(Clone, Copy, Debug)]
pub struct FovMatcher {
    tolerance: f64,
    offset: HeadingOffset,
}

impl FovMatcher {
    pub fn new(tolerance: f64, offset: HeadingOffset) -> Self {
        Self { tolerance, offset }
    }

    pub fn from_config(cfg: &TrackerConfig) -> Self {
        Self::new(cfg.tolerance, HeadingOffset::new(cfg.heading_offset))
    }

    pub fn offset(&self) -> HeadingOffset {
        self.offset
    }

    /// Same as [`find_flight_in_view`] but with a raw compass value and missing inputs.
    ///
    /// No location or no heading yet means nothing is in view, not an error.
    ///
    pub fn in_view<'a>(
        &self,
        user: Option<&GeoPoint>,
        raw_heading: Option<f64>,
        flights: &'a [AircraftPosition],
    ) -> Option<&'a AircraftPosition> {
        let (user, raw) = match (user, raw_heading) {
            (Some(u), Some(h)) => (u, h),
            _ => {
                trace!("missing location or heading");
                return None;
            }
        };
        self.in_view_corrected(user, self.offset.apply(raw), flights)
    }

    /// Heading already corrected (offset, pitch lock).
    ///
    pub fn in_view_corrected<'a>(
        &self,
        user: &GeoPoint,
        heading: f64,
        flights: &'a [AircraftPosition],
    ) -> Option<&'a AircraftPosition> {
        let found = find_flight_in_view(user, heading, flights, self.tolerance);
        debug!(
            "heading {heading:.1} over {} flights: {:?}",
            flights.len(),
            found.map(|f| f.id.as_str())
        );
        found
    }
}
