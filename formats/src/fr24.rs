//! This module implement a subset of [Flightradar24]'s live flight positions API.
//!
//! Only the struct we need are there, this is not a general client API.
//!
//! Non-mandatory fields are `Option`, every record is validated before becoming an
//! `AircraftPosition`, bad records are logged and skipped.
//!
//! [Flightradar24]: https://fr24api.flightradar24.com/docs/endpoints
//!

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use lookup_common::BB;

use crate::{check_position, check_track, AircraftPosition, FlightSummary, FormatError};

/// Live positions endpoint
pub const FR24_URL: &str = "https://fr24api.flightradar24.com/api/live/flight-positions/full";

/// API version sent in `Accept-Version`
pub const FR24_API_VERSION: &str = "v1";

/// Envelope of the live positions answer.
///
#[derive(Debug, Default, Deserialize)]
pub struct FlightPositions {
    #[serde(default)]
    pub data: Vec<Fr24Position>,
}

/// One flight as sent by the feed.
///
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fr24Position {
    /// Feed unique ID
    pub fr24_id: Option<String>,
    /// Flight number
    pub flight: Option<String>,
    /// ATC callsign
    pub callsign: Option<String>,
    /// Latitude
    pub lat: Option<f64>,
    /// Longitude
    pub lon: Option<f64>,
    /// True track in degrees
    pub track: Option<f64>,
    /// Barometric altitude in feet
    pub alt: Option<i32>,
    /// Ground speed in knots
    pub gspeed: Option<i32>,
    /// ICAO 24-bit address
    pub hex: Option<String>,
    /// Aircraft type
    #[serde(rename = "type")]
    pub atype: Option<String>,
    /// Origin IATA code
    pub orig_iata: Option<String>,
    /// Destination IATA code
    pub dest_iata: Option<String>,
    /// Position timestamp
    pub timestamp: Option<DateTime<Utc>>,
    /// Estimated time of arrival
    pub eta: Option<DateTime<Utc>>,
    /// Operating airline ICAO code
    pub operating_as: Option<String>,
    /// Airline whose livery is painted on the aircraft
    pub painted_as: Option<String>,
}

impl TryFrom<&Fr24Position> for AircraftPosition {
    type Error = FormatError;

    fn try_from(r: &Fr24Position) -> Result<Self, Self::Error> {
        let id = r
            .fr24_id
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or(FormatError::MissingField("fr24_id"))?;
        let lat = r.lat.ok_or(FormatError::MissingField("lat"))?;
        let lon = r.lon.ok_or(FormatError::MissingField("lon"))?;
        let position = check_position(lat, lon)?;
        let track = check_track(r.track.unwrap_or(0.))?;

        Ok(AircraftPosition {
            id,
            position,
            track,
            flight: r.flight.clone(),
            callsign: r.callsign.clone(),
            origin: r.orig_iata.clone(),
            destination: r.dest_iata.clone(),
            altitude: r.alt,
            ground_speed: r.gspeed,
            hex: r.hex.clone(),
            aircraft_type: r.atype.clone(),
            timestamp: r.timestamp,
        })
    }
}

impl From<&Fr24Position> for FlightSummary {
    fn from(r: &Fr24Position) -> Self {
        let pick = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

        FlightSummary {
            id: r.fr24_id.clone().unwrap_or_default(),
            ident: r.flight.clone().unwrap_or_default(),
            origin: r.orig_iata.clone().unwrap_or_default(),
            destination: r.dest_iata.clone().unwrap_or_default(),
            departure_time: r.timestamp,
            arrival_time: r.eta,
            airline: pick(&r.operating_as)
                .or(pick(&r.painted_as))
                .or(pick(&r.callsign))
                .unwrap_or_default(),
        }
    }
}

impl FlightPositions {
    /// Deserialize from json
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Self, FormatError> {
        trace!("flightpositions::from_json");

        let data: FlightPositions = serde_json::from_str(input)?;
        debug!("{} records", data.data.len());
        Ok(data)
    }

    /// Convert into a snapshot, dropping invalid records.
    ///
    #[tracing::instrument(skip(self))]
    pub fn to_positions(&self) -> Vec<AircraftPosition> {
        let res: Vec<_> = self
            .data
            .iter()
            .filter_map(|r| match AircraftPosition::try_from(r) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("skipping {:?}: {e}", r.fr24_id);
                    None
                }
            })
            .collect();
        trace!("{} valid positions out of {}", res.len(), self.data.len());
        res
    }

    /// Convert into list summaries
    ///
    pub fn to_summaries(&self) -> Vec<FlightSummary> {
        self.data.iter().map(FlightSummary::from).collect()
    }
}

/// What we ask the feed for.  Only one criteria is ever sent.
///
#[derive(Clone, Debug, PartialEq, strum::Display)]
pub enum Fr24Query {
    /// By flight number
    #[strum(to_string = "flights")]
    Flights(String),
    /// By origin/destination pair
    #[strum(to_string = "routes")]
    Routes { origin: String, destination: String },
    /// By bounding box, `north,south,west,east`
    #[strum(to_string = "bounds")]
    Bounds(String),
}

impl Fr24Query {
    /// Pick the criteria, in order: flight number, route then bounds.  A route needs both
    /// ends.  `None` if there is nothing to ask for.
    ///
    #[tracing::instrument]
    pub fn from_criteria(
        flight: Option<&str>,
        origin: Option<&str>,
        destination: Option<&str>,
        bounds: Option<&str>,
    ) -> Option<Self> {
        let some = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);

        if let Some(f) = some(flight) {
            return Some(Fr24Query::Flights(f));
        }
        if let (Some(origin), Some(destination)) = (some(origin), some(destination)) {
            return Some(Fr24Query::Routes {
                origin,
                destination,
            });
        }
        some(bounds).map(Fr24Query::Bounds)
    }

    /// Query by bounding box
    ///
    pub fn from_bb(bb: &BB) -> Self {
        Fr24Query::Bounds(bb.to_bounds_string())
    }

    /// Value sent in the query string
    ///
    pub fn value(&self) -> String {
        match self {
            Fr24Query::Flights(f) => f.clone(),
            Fr24Query::Routes {
                origin,
                destination,
            } => format!("{origin}-{destination}"),
            Fr24Query::Bounds(b) => b.clone(),
        }
    }

    /// Full URL.  Built by hand so that commas in bounds are not percent-encoded.
    ///
    pub fn url(&self) -> String {
        format!("{FR24_URL}?{}={}", self, self.value())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use lookup_common::GeoPoint;

    use super::*;

    const SAMPLE: &str = r#"{
      "data": [
        {
          "fr24_id": "321a0cc3",
          "flight": "AF1463",
          "callsign": "AFR1463",
          "lat": 50.86,
          "lon": 4.47,
          "track": 219,
          "alt": 38000,
          "gspeed": 500,
          "timestamp": "2023-11-08T10:10:00Z",
          "hex": "394C19",
          "type": "A321",
          "painted_as": "AFR",
          "operating_as": "AFR",
          "orig_iata": "CDG",
          "dest_iata": "BRU",
          "eta": "2023-11-08T11:12:24Z"
        },
        {
          "fr24_id": "321a0cc4",
          "callsign": "N123AB",
          "lat": 95.0,
          "lon": 4.47
        },
        {
          "fr24_id": "321a0cc5",
          "callsign": "N456CD",
          "lat": 50.5,
          "lon": 4.2,
          "track": 12.5
        },
        {
          "flight": "NOID1"
        }
      ]
    }"#;

    #[test_pretty_log::test]
    fn test_from_json() {
        let data = FlightPositions::from_json(SAMPLE).unwrap();
        assert_eq!(4, data.data.len());

        let pos = data.to_positions();
        assert_eq!(2, pos.len());

        let a = &pos[0];
        assert_eq!("321a0cc3", a.id);
        assert_eq!(GeoPoint::new(50.86, 4.47), a.position);
        assert_eq!(219., a.track);
        assert_eq!(Some("CDG".to_string()), a.origin);
        assert_eq!(Some(38000), a.altitude);
        assert_eq!(Some("A321".to_string()), a.aircraft_type);
        assert!(a.timestamp.is_some());

        assert_eq!("321a0cc5", pos[1].id);
        assert_eq!(None, pos[1].flight);
    }

    #[test]
    fn test_from_json_empty() {
        let data = FlightPositions::from_json("{}").unwrap();
        assert!(data.to_positions().is_empty());
    }

    #[test]
    fn test_from_json_garbage() {
        assert!(FlightPositions::from_json("[1, 2").is_err());
    }

    #[test]
    fn test_summaries() {
        let data = FlightPositions::from_json(SAMPLE).unwrap();
        let sum = data.to_summaries();

        assert_eq!(4, sum.len());
        assert_eq!("AF1463", sum[0].ident);
        assert_eq!("AFR", sum[0].airline);
        assert_eq!("BRU", sum[0].destination);
        assert!(sum[0].arrival_time.is_some());
        // no operating_as nor painted_as
        assert_eq!("N123AB", sum[1].airline);
        assert_eq!("", sum[3].airline);
    }

    #[rstest]
    #[case(Some("AF1463"), Some("CDG"), Some("BRU"), Some("1,2,3,4"), Some(Fr24Query::Flights("AF1463".to_string())))]
    #[case(None, Some("CDG"), Some("BRU"), Some("1,2,3,4"), Some(Fr24Query::Routes { origin: "CDG".to_string(), destination: "BRU".to_string() }))]
    #[case(None, Some("CDG"), None, Some("1,2,3,4"), Some(Fr24Query::Bounds("1,2,3,4".to_string())))]
    #[case(Some(""), None, None, Some("1,2,3,4"), Some(Fr24Query::Bounds("1,2,3,4".to_string())))]
    #[case(None, None, None, None, None)]
    fn test_from_criteria(
        #[case] flight: Option<&str>,
        #[case] origin: Option<&str>,
        #[case] destination: Option<&str>,
        #[case] bounds: Option<&str>,
        #[case] expected: Option<Fr24Query>,
    ) {
        assert_eq!(expected, Fr24Query::from_criteria(flight, origin, destination, bounds));
    }

    #[test]
    fn test_url() {
        let q = Fr24Query::Routes {
            origin: "CDG".to_string(),
            destination: "BRU".to_string(),
        };
        assert_eq!(format!("{FR24_URL}?routes=CDG-BRU"), q.url());

        let q = Fr24Query::Bounds("50.682,46.218,14.422,22.243".to_string());
        assert_eq!(format!("{FR24_URL}?bounds=50.682,46.218,14.422,22.243"), q.url());
    }

    #[test]
    fn test_from_bb() {
        let bb = BB::from_location(&GeoPoint::new(50.8, 4.4), 10.);
        let q = Fr24Query::from_bb(&bb);
        assert_eq!(Fr24Query::Bounds("50.890,50.710,4.258,4.542".to_string()), q);
    }
}
