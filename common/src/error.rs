use thiserror::Error;

#[derive(Debug, Error)]
pub enum Status {
    #[error("Bad file version {0}, expected {1}")]
    BadFileVersion(usize, usize),
    #[error("Missing configuration file {0}, no default in {1}")]
    MissingConfig(String, String),
    #[error("No home directory, can not locate configuration")]
    NoHomeDir,
    #[error("Invalid radius {0} km, must be > 0")]
    InvalidRadius(f64),
}

/// Radius validation happens on the caller side, the geodesy functions trust their input.
///
pub fn validate_radius(radius_km: f64) -> Result<f64, Status> {
    if radius_km.is_finite() && radius_km > 0. {
        Ok(radius_km)
    } else {
        Err(Status::InvalidRadius(radius_km))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(10., true)]
    #[case(0.001, true)]
    #[case(0., false)]
    #[case(-5., false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn test_validate_radius(#[case] r: f64, #[case] ok: bool) {
        assert_eq!(ok, validate_radius(r).is_ok());
    }
}
