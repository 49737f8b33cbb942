//! Location related module
//!
//! Everything here works on a sphere of radius [`EARTH_RADIUS_KM`]:
//!
//! - initial great-circle bearing between two points (forward azimuth)
//! - shortest angular distance between two directions
//! - haversine distance
//! - destination point given a bearing and a distance, and the four cardinal ones used to
//!   build a query bounding box
//!
//! Angles are in degrees at the API level, radians only inside the formulas.
//!
use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Mean Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6371.;

/// Normalise any angle into [0, 360)
///
#[inline]
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.);
    // rem_euclid() can round up to exactly 360 for tiny negative values
    if a >= 360. {
        0.
    } else {
        a
    }
}

/// Normalise a longitude into (-180, 180]
///
#[inline]
pub fn normalize_lon(lon: f64) -> f64 {
    let l = normalize_deg(lon + 180.) - 180.;
    if l == -180. {
        180.
    } else {
        l
    }
}

/// Shortest angular distance between two directions, in [0, 180].
///
/// Symmetric and handles the wrap-around at 0°/360°.
///
#[inline]
pub fn angular_diff(heading: f64, bearing: f64) -> f64 {
    ((bearing - heading + 540.).rem_euclid(360.) - 180.).abs()
}

/// A position on the globe, in decimal degrees.
///
/// latitude is in [-90, 90] and longitude in (-180, 180], this is checked by whoever produces
/// one (see `lookup-formats`), not here.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Latitude
    #[serde(alias = "latitude")]
    pub lat: f64,
    /// Longitude
    #[serde(alias = "longitude")]
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Initial great-circle bearing from `self` to `other`, in [0, 360).
    ///
    /// Coincident points give 0 as `atan2(0, 0)` is 0.
    ///
    #[inline]
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lon.cos();
        normalize_deg(y.atan2(x).to_degrees())
    }

    /// Haversine distance in km
    ///
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin()
                * (d_lon / 2.0).sin();

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Point reached when travelling `dist` km from `self` along the great circle starting
    /// at `bearing` degrees.
    ///
    pub fn destination(&self, bearing: f64, dist: f64) -> GeoPoint {
        let delta = dist / EARTH_RADIUS_KM;
        let theta = bearing.to_radians();
        let phi1 = self.lat.to_radians();
        let lambda1 = self.lon.to_radians();

        let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
        let phi2 = sin_phi2.clamp(-1., 1.).asin();
        let lambda2 = lambda1
            + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

        GeoPoint {
            lat: phi2.to_degrees(),
            lon: normalize_lon(lambda2.to_degrees()),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// The four destination points at a given distance due north, east, south and west.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Cardinal {
    pub north: GeoPoint,
    pub east: GeoPoint,
    pub south: GeoPoint,
    pub west: GeoPoint,
}

/// Compute the four cardinal destination points `radius` km away from `center`.
///
/// `radius` must be > 0, see [`crate::validate_radius`].
///
#[tracing::instrument]
pub fn destination_points(center: &GeoPoint, radius: f64) -> Cardinal {
    Cardinal {
        north: center.destination(0., radius),
        east: center.destination(90., radius),
        south: center.destination(180., radius),
        west: center.destination(270., radius),
    }
}

/// Bounding box used to query the flight feed.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BB {
    /// Longitude - X0
    pub min_lon: f64,
    /// Latitude - Y0
    pub min_lat: f64,
    /// Longitude - X1
    pub max_lon: f64,
    /// Latitude - Y1
    pub max_lat: f64,
}

impl BB {
    /// Take a location and create a bounding box whose sides are `radius` km away.
    ///
    #[tracing::instrument]
    pub fn from_location(center: &GeoPoint, radius: f64) -> Self {
        Self::from(destination_points(center, radius))
    }

    /// Is the point inside?  Boxes crossing the antimeridian have `min_lon > max_lon`.
    ///
    pub fn contains(&self, p: &GeoPoint) -> bool {
        let in_lat = p.lat >= self.min_lat && p.lat <= self.max_lat;
        let in_lon = if self.min_lon <= self.max_lon {
            p.lon >= self.min_lon && p.lon <= self.max_lon
        } else {
            p.lon >= self.min_lon || p.lon <= self.max_lon
        };
        in_lat && in_lon
    }

    /// Bounds in the `north,south,west,east` order used by the flight feed query string.
    ///
    pub fn to_bounds_string(&self) -> String {
        format!(
            "{:.3},{:.3},{:.3},{:.3}",
            self.max_lat, self.min_lat, self.min_lon, self.max_lon
        )
    }
}

impl From<Cardinal> for BB {
    fn from(c: Cardinal) -> Self {
        Self {
            min_lon: c.west.lon,
            min_lat: c.south.lat,
            max_lon: c.east.lon,
            max_lat: c.north.lat,
        }
    }
}

/// Render the cardinal points as a table
///
#[tracing::instrument]
pub fn list_cardinals(center: &GeoPoint, radius: f64) -> String {
    let pts = destination_points(center, radius);
    let header = vec!["Point", "Lat/Lon", "Bearing", "Distance (km)"];

    let mut builder = Builder::default();
    builder.push_record(header);

    [
        ("north", pts.north),
        ("east", pts.east),
        ("south", pts.south),
        ("west", pts.west),
    ]
    .iter()
    .for_each(|(name, p)| {
        builder.push_record(vec![
            name.to_string(),
            p.to_string(),
            format!("{:.1}", center.bearing_to(p)),
            format!("{:.3}", center.distance_to(p)),
        ]);
    });

    let allf = builder.build().with(Style::modern()).to_string();
    format!("Cardinal points from {center} ({radius} km):\n{allf}")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;
    use tracing::info;

    use super::*;

    const EPS: f64 = 1e-6;

    #[inline]
    fn shorten(v: f64) -> String {
        format!("{:.3}", v)
    }

    #[rstest]
    #[case(GeoPoint::new(0., 0.), GeoPoint::new(1., 0.), 0.)]
    #[case(GeoPoint::new(0., 0.), GeoPoint::new(0., 1.), 90.)]
    #[case(GeoPoint::new(1., 0.), GeoPoint::new(0., 0.), 180.)]
    #[case(GeoPoint::new(0., 0.), GeoPoint::new(0., -1.), 270.)]
    fn test_bearing_cardinal(#[case] from: GeoPoint, #[case] to: GeoPoint, #[case] expected: f64) {
        let b = from.bearing_to(&to);
        assert!((b - expected).abs() < EPS, "got {b}, expected {expected}");
    }

    #[rstest]
    #[case(GeoPoint::new(48.8, 2.3), GeoPoint::new(50.8, 2.3), 0.)]
    #[case(GeoPoint::new(48.8, 2.3), GeoPoint::new(46.8, 2.3), 180.)]
    fn test_bearing_meridian(#[case] from: GeoPoint, #[case] to: GeoPoint, #[case] expected: f64) {
        assert!((from.bearing_to(&to) - expected).abs() < EPS);
    }

    #[test]
    fn test_bearing_coincident() {
        let p = GeoPoint::new(50.8, 4.4);
        assert_eq!(0., p.bearing_to(&p));
    }

    #[test]
    fn test_bearing_from_pole() {
        let pole = GeoPoint::new(90., 0.);
        let b = pole.bearing_to(&GeoPoint::new(45., 30.));
        assert!(b.is_finite());
        assert!((0. ..360.).contains(&b));
    }

    #[rstest]
    #[case(350., 10., 20.)]
    #[case(10., 350., 20.)]
    #[case(0., 180., 180.)]
    #[case(90., 90., 0.)]
    #[case(359., 1., 2.)]
    #[case(-10., 10., 20.)]
    fn test_angular_diff(#[case] heading: f64, #[case] bearing: f64, #[case] expected: f64) {
        assert!((angular_diff(heading, bearing) - expected).abs() < EPS);
    }

    #[rstest]
    #[case(-1e-18, 0.)]
    #[case(360., 0.)]
    #[case(725., 5.)]
    #[case(-90., 270.)]
    fn test_normalize_deg(#[case] a: f64, #[case] expected: f64) {
        assert_eq!(expected, normalize_deg(a));
    }

    #[rstest]
    #[case(-180., 180.)]
    #[case(190., -170.)]
    #[case(-190., 170.)]
    #[case(4.4, 4.4)]
    fn test_normalize_lon(#[case] l: f64, #[case] expected: f64) {
        assert!((normalize_lon(l) - expected).abs() < EPS);
    }

    #[test]
    fn test_distance_one_degree_meridian() {
        let a = GeoPoint::new(0., 0.);
        let b = GeoPoint::new(1., 0.);
        // 2πR / 360
        assert_eq!(shorten(111.195), shorten(a.distance_to(&b)));
    }

    #[rstest]
    #[case(GeoPoint::new(50.8, 4.4), 0., 10.)]
    #[case(GeoPoint::new(50.8, 4.4), 45., 25.)]
    #[case(GeoPoint::new(-33.9, 151.2), 137.5, 120.)]
    #[case(GeoPoint::new(54.7, -6.2), 270., 5.)]
    #[case(GeoPoint::new(0., 179.9), 90., 50.)]
    fn test_destination_round_trip(#[case] center: GeoPoint, #[case] bearing: f64, #[case] dist: f64) {
        let dest = center.destination(bearing, dist);
        assert!(angular_diff(bearing, center.bearing_to(&dest)) < 1e-6);
        assert!((center.distance_to(&dest) - dist).abs() < 1e-6);
    }

    #[test_pretty_log::test]
    fn test_destination_points_bxl() {
        info!("bxl");
        let center = GeoPoint::new(50.8, 4.4);
        let pts = destination_points(&center, 10.);

        assert!(pts.north.lat > center.lat);
        assert!(pts.south.lat < center.lat);
        assert!(pts.east.lon > center.lon);
        assert!(pts.west.lon < center.lon);
        // 10 km is about 0.09° of latitude
        assert_eq!(shorten(50.890), shorten(pts.north.lat));
        assert_eq!(shorten(50.710), shorten(pts.south.lat));
        assert_eq!(shorten(center.lon), shorten(pts.north.lon));
    }

    #[test_pretty_log::test]
    fn test_bb_from_location() {
        let center = GeoPoint::new(50.8, 4.4);
        let bb = BB::from_location(&center, 10.);

        assert!(bb.contains(&center));
        assert!(!bb.contains(&GeoPoint::new(51.8, 4.4)));
        assert_eq!("50.890,50.710,4.258,4.542", bb.to_bounds_string());
    }

    #[test]
    fn test_bb_bounds_string() {
        let bb = BB {
            min_lon: 14.422,
            min_lat: 46.218,
            max_lon: 22.243,
            max_lat: 50.682,
        };
        assert_eq!("50.682,46.218,14.422,22.243", bb.to_bounds_string());
    }

    #[test]
    fn test_bb_antimeridian() {
        let bb = BB::from_location(&GeoPoint::new(0., 179.95), 20.);
        assert!(bb.min_lon > bb.max_lon);
        assert!(bb.contains(&GeoPoint::new(0., -179.95)));
        assert!(bb.contains(&GeoPoint::new(0., 179.95)));
        assert!(!bb.contains(&GeoPoint::new(0., 0.)));
    }

    #[test]
    fn test_list_cardinals() {
        let s = list_cardinals(&GeoPoint::new(50.8, 4.4), 10.);
        assert!(s.contains("north"));
        assert!(s.contains("west"));
        assert!(s.contains("10.000"));
    }

    proptest! {
        #[test]
        fn prop_angular_diff_range(h in 0f64..360., b in 0f64..360.) {
            let d = angular_diff(h, b);
            prop_assert!((0. ..=180.).contains(&d));
        }

        #[test]
        fn prop_angular_diff_symmetric(h in 0f64..360., b in 0f64..360.) {
            prop_assert!((angular_diff(h, b) - angular_diff(b, h)).abs() < 1e-9);
        }

        #[test]
        fn prop_bearing_in_range(lat1 in -89f64..89., lon1 in -179f64..180., lat2 in -89f64..89., lon2 in -179f64..180.) {
            let b = GeoPoint::new(lat1, lon1).bearing_to(&GeoPoint::new(lat2, lon2));
            prop_assert!((0. ..360.).contains(&b));
        }
    }
}
