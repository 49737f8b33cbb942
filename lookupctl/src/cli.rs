//! Module describing all possible commands and sub-commands to the `lookupctl` main driver
//!
//! Offline commands work on files or on the command line only:
//!
//! - `bounds`: cardinal points and query bounds around a location
//! - `bearing`: bearing and distance between two points
//! - `match`: which flight of a saved feed snapshot is in view for a given heading
//! - `detect`: parse, filter and de-duplicate an object detector response
//! - `track`: run the marker smoother headless and print its frames
//!
//! `fetch` is the only one going to the network, to get live positions from the flight feed.
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

use lookup_common::GeoPoint;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<String>,
    /// Hierarchical output for logs.
    #[clap(short = 'T', long = "tree")]
    pub use_tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long = "log-dir")]
    pub use_file: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `bearing --from LAT,LON --to LAT,LON`
/// `bounds --lat LAT --lon LON [-r KM]`
/// `completion SHELL`
/// `detect [--confidence C] [--iou I] FILE`
/// `fetch [--lat LAT --lon LON] [-r KM] [--flight F] [--from O --to D]`
/// `match --lat LAT --lon LON --heading H [-t T] [--offset O] [--nearest] FILE`
/// `track [-d MS] [--simulate] [FILE]`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Bearing and distance between two points
    Bearing(BearingOpts),
    /// Cardinal points and feed query bounds around a location
    Bounds(BoundsOpts),
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Filter an object detector response
    Detect(DetectOpts),
    /// Fetch live positions from the flight feed
    Fetch(FetchOpts),
    /// Find the flight in view in a feed snapshot
    Match(MatchOpts),
    /// Run the marker smoother and print frames
    Track(TrackOpts),
    /// List all package versions.
    Version,
}

// ------

/// `lat,lon` on the command line
///
pub fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {e}"))?;
    if !(-90. ..=90.).contains(&lat) || !(-180. ..=180.).contains(&lon) {
        return Err(format!("{s} is not a valid position"));
    }
    Ok(GeoPoint::new(lat, lon))
}

/// Options for the `bearing` command.
///
#[derive(Debug, Parser)]
pub struct BearingOpts {
    /// Starting point as LAT,LON
    #[clap(long, allow_hyphen_values = true, value_parser = parse_point)]
    pub from: GeoPoint,
    /// Target point as LAT,LON
    #[clap(long, allow_hyphen_values = true, value_parser = parse_point)]
    pub to: GeoPoint,
}

/// Position shared by several commands.
///
#[derive(Clone, Copy, Debug, Parser)]
pub struct PosOpts {
    /// Latitude in degrees
    #[clap(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in degrees
    #[clap(long, allow_negative_numbers = true)]
    pub lon: f64,
}

/// Options for the `bounds` command.
///
#[derive(Debug, Parser)]
pub struct BoundsOpts {
    #[clap(flatten)]
    pub pos: PosOpts,
    /// Radius in km (default from configuration)
    #[clap(short = 'r', long)]
    pub radius: Option<f64>,
}

/// Options for the `detect` command.
///
#[derive(Debug, Parser)]
pub struct DetectOpts {
    /// Minimum confidence
    #[clap(long, default_value_t = lookup_formats::DEF_CONFIDENCE)]
    pub confidence: f64,
    /// Overlap over which the less confident box is dropped
    #[clap(long, default_value_t = lookup_formats::DEF_IOU)]
    pub iou: f64,
    /// Horizontal scale from image to display pixels
    #[clap(long = "sx", default_value_t = 1.)]
    pub scale_x: f64,
    /// Vertical scale from image to display pixels
    #[clap(long = "sy", default_value_t = 1.)]
    pub scale_y: f64,
    /// Detector response (JSON)
    pub file: PathBuf,
}

/// Options for the `fetch` command.  Flight number wins over route, route over position.
///
#[derive(Debug, Parser)]
pub struct FetchOpts {
    /// Latitude in degrees (default is `home` from configuration)
    #[clap(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,
    /// Longitude in degrees
    #[clap(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
    /// Radius in km (default from configuration)
    #[clap(short = 'r', long)]
    pub radius: Option<f64>,
    /// Look for this flight number instead
    #[clap(long)]
    pub flight: Option<String>,
    /// Origin airport (IATA), needs `--to`
    #[clap(long = "from")]
    pub origin: Option<String>,
    /// Destination airport (IATA), needs `--from`
    #[clap(long = "to")]
    pub destination: Option<String>,
    /// Save the raw response in this file
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Options for the `match` command.
///
#[derive(Debug, Parser)]
pub struct MatchOpts {
    #[clap(flatten)]
    pub pos: PosOpts,
    /// Raw compass heading in degrees
    #[clap(long)]
    pub heading: f64,
    /// Half-angle of the field of view (default from configuration)
    #[clap(short = 't', long)]
    pub tolerance: Option<f64>,
    /// Heading offset (default from configuration)
    #[clap(long, allow_negative_numbers = true)]
    pub offset: Option<f64>,
    /// Closest flight first instead of feed order
    #[clap(long)]
    pub nearest: bool,
    /// Feed snapshot (JSON)
    pub file: PathBuf,
}

/// Options for the `track` command.
///
#[derive(Debug, Parser)]
pub struct TrackOpts {
    /// How long to run
    #[clap(short = 'd', long = "duration-ms", default_value_t = 3000)]
    pub duration_ms: u64,
    /// Step a simulated clock instead of running in real time
    #[clap(short = 's', long)]
    pub simulate: bool,
    /// Detector response (JSON), the best box is followed
    pub file: Option<PathBuf>,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("50.8,4.4", Some((50.8, 4.4)))]
    #[case("-33.9, 151.2", Some((-33.9, 151.2)))]
    #[case("50.8", None)]
    #[case("north,4.4", None)]
    #[case("91,0", None)]
    fn test_parse_point(#[case] s: &str, #[case] expected: Option<(f64, f64)>) {
        let p = parse_point(s).ok().map(|p| (p.lat, p.lon));
        assert_eq!(expected, p);
    }

    #[test]
    fn test_opts() {
        let opts = Opts::try_parse_from([
            "lookupctl", "match", "--lat", "-33.9", "--lon", "151.2", "--heading", "90", "-t", "5",
            "snap.json",
        ])
        .unwrap();
        match opts.subcmd {
            SubCommand::Match(m) => {
                assert_eq!(-33.9, m.pos.lat);
                assert_eq!(Some(5.), m.tolerance);
                assert!(!m.nearest);
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
