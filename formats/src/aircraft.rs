//! Aircraft positions as consumed by the tracker.
//!
//! A snapshot is a `Vec<AircraftPosition>` replaced wholesale on each fetch, it is never
//! mutated once built.
//!

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lookup_common::{normalize_deg, GeoPoint};

use crate::FormatError;

/// One aircraft in the snapshot.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AircraftPosition {
    /// Feed-specific unique ID
    pub id: String,
    /// Current position
    pub position: GeoPoint,
    /// Aircraft own heading in degrees, only used to rotate the icon
    pub track: f64,
    /// Flight number (e.g. "AF1463")
    pub flight: Option<String>,
    /// ATC callsign (e.g. "AFR1463")
    pub callsign: Option<String>,
    /// Origin IATA code
    pub origin: Option<String>,
    /// Destination IATA code
    pub destination: Option<String>,
    /// Barometric altitude in feet
    pub altitude: Option<i32>,
    /// Ground speed in knots
    pub ground_speed: Option<i32>,
    /// ICAO 24-bit address as hex string
    pub hex: Option<String>,
    /// ICAO aircraft type
    pub aircraft_type: Option<String>,
    /// Position timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl AircraftPosition {
    /// Bare position with no identifiers besides `id`.
    ///
    pub fn new(id: &str, position: GeoPoint, track: f64) -> Self {
        Self {
            id: id.to_string(),
            position,
            track,
            flight: None,
            callsign: None,
            origin: None,
            destination: None,
            altitude: None,
            ground_speed: None,
            hex: None,
            aircraft_type: None,
            timestamp: None,
        }
    }

    /// Best human name for this aircraft
    ///
    pub fn name(&self) -> &str {
        self.flight
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.callsign.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.id)
    }
}

impl fmt::Display for AircraftPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}->{} @ {} trk {:.0}",
            self.name(),
            self.id,
            self.origin.as_deref().unwrap_or("?"),
            self.destination.as_deref().unwrap_or("?"),
            self.position,
            self.track
        )
    }
}

/// Check a coordinate pair coming from outside and normalise -180 into 180.
///
pub fn check_position(lat: f64, lon: f64) -> Result<GeoPoint, FormatError> {
    if !lat.is_finite() || !(-90. ..=90.).contains(&lat) {
        return Err(FormatError::InvalidLatitude(lat));
    }
    if !lon.is_finite() || !(-180. ..=180.).contains(&lon) {
        return Err(FormatError::InvalidLongitude(lon));
    }
    let lon = if lon == -180. { 180. } else { lon };
    Ok(GeoPoint::new(lat, lon))
}

/// Check a heading/track coming from outside, 360 is accepted as 0.
///
pub fn check_track(track: f64) -> Result<f64, FormatError> {
    if !track.is_finite() || !(0. ..=360.).contains(&track) {
        return Err(FormatError::InvalidTrack(track));
    }
    Ok(normalize_deg(track))
}

/// Flight summary for list displays.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FlightSummary {
    pub id: String,
    pub ident: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub airline: String,
}
