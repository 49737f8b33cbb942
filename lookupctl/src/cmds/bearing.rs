//! `bearing` sub-command.
//!

use crate::BearingOpts;

/// Initial bearing both ways and great-circle distance.
///
pub fn bearing_between(opts: &BearingOpts) -> String {
    let (from, to) = (&opts.from, &opts.to);
    format!(
        "From {from} to {to}: bearing {:.1}°, back {:.1}°, distance {:.3} km",
        from.bearing_to(to),
        to.bearing_to(from),
        from.distance_to(to)
    )
}

#[cfg(test)]
mod tests {
    use lookup_common::GeoPoint;

    use super::*;

    #[test]
    fn test_due_east_on_equator() {
        let opts = BearingOpts {
            from: GeoPoint::new(0., 0.),
            to: GeoPoint::new(0., 1.),
        };
        let out = bearing_between(&opts);
        assert!(out.contains("bearing 90.0°"));
        assert!(out.contains("back 270.0°"));
        assert!(out.contains("distance 111.195 km"));
    }
}
