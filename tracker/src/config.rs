//! Tracker parameters.
//!
//! Usually read as a `tracker { ... }` block of the tool configuration file, every field has
//! a default so that an empty block is valid.
//!
//! ```hcl
//! tracker {
//!   tolerance      = 8
//!   heading_offset = 180
//!   viewport {
//!     width  = 1170
//!     height = 2532
//!   }
//! }
//! ```
//!

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use lookup_common::validate_radius;

use crate::TrackerError;

/// Half-angle of the field of view, in degrees
pub const DEF_TOLERANCE: f64 = 10.;
/// Radius of the flight query box, in km
pub const DEF_RADIUS: f64 = 10.;
/// Side of the synthetic marker box, in px
pub const DEF_BOX_SIZE: f64 = 240.;
/// Interval between two marker retargets
pub const DEF_REFRESH_MS: u64 = 1000;
/// Length of one marker animation, shorter than the refresh interval
pub const DEF_DURATION_MS: u64 = 900;
/// Frame interval of the animation driver
pub const DEF_FRAME_MS: u64 = 16;
/// Pitch over which the heading is frozen, in degrees
pub const DEF_PITCH_LOCK: f64 = 50.;
/// How long a marker survives without update in multi-track mode
pub const DEF_MARKER_TTL_MS: u64 = 3000;

/// Visible area in px.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1080.,
            height: 2340.,
        }
    }
}

/// Where the info bubble goes and how fast it moves.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Flip to the left once the marker is past `viewport.width - edge_margin_high`
    pub edge_margin_high: f64,
    /// Flip back to the right once the marker is before `edge_margin_low`
    pub edge_margin_low: f64,
    /// Offset from the marker when on the left side, negative
    pub left_offset: f64,
    /// Offset from the marker when on the right side, positive
    pub right_offset: f64,
    /// Length of the flip animation
    pub duration_ms: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            edge_margin_high: 450.,
            edge_margin_low: 240.,
            left_offset: -210.,
            right_offset: 250.,
            duration_ms: 300,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Half-angle window around the heading, in degrees
    pub tolerance: f64,
    /// Added to the raw compass heading, usually 0 or 180 depending on how the device is held
    pub heading_offset: f64,
    /// Flight query radius in km
    pub radius_km: f64,
    /// Synthetic box side in px
    pub box_size: f64,
    pub refresh_ms: u64,
    pub duration_ms: u64,
    pub frame_ms: u64,
    /// Pitch lock threshold in degrees
    pub pitch_lock: f64,
    pub marker_ttl_ms: u64,
    pub viewport: Viewport,
    pub tooltip: TooltipConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tolerance: DEF_TOLERANCE,
            heading_offset: 0.,
            radius_km: DEF_RADIUS,
            box_size: DEF_BOX_SIZE,
            refresh_ms: DEF_REFRESH_MS,
            duration_ms: DEF_DURATION_MS,
            frame_ms: DEF_FRAME_MS,
            pitch_lock: DEF_PITCH_LOCK,
            marker_ttl_ms: DEF_MARKER_TTL_MS,
            viewport: Viewport::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl TrackerConfig {
    #[inline]
    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[inline]
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    #[inline]
    pub fn marker_ttl(&self) -> Duration {
        Duration::from_millis(self.marker_ttl_ms)
    }

    /// Check everything once at load time, the tracker itself trusts these values.
    ///
    #[tracing::instrument]
    pub fn validate(&self) -> Result<(), TrackerError> {
        trace!("validate");

        let bad = |s: &str| Err(TrackerError::InvalidConfig(s.to_string()));

        if !(self.tolerance > 0. && self.tolerance <= 180.) {
            return bad("tolerance must be in (0, 180]");
        }
        if !self.heading_offset.is_finite() {
            return bad("heading_offset must be a number");
        }
        if validate_radius(self.radius_km).is_err() {
            return bad("radius_km must be > 0");
        }
        if !(self.box_size.is_finite() && self.box_size > 0.) {
            return bad("box_size must be > 0");
        }
        if self.frame_ms == 0 || self.refresh_ms == 0 {
            return bad("refresh_ms and frame_ms must be > 0");
        }
        if self.refresh_ms < self.duration_ms {
            return bad("refresh_ms must be >= duration_ms");
        }
        if !(self.pitch_lock > 0. && self.pitch_lock <= 90.) {
            return bad("pitch_lock must be in (0, 90]");
        }
        if !(self.viewport.width > 0. && self.viewport.height > 0.) {
            return bad("viewport must not be empty");
        }
        let t = &self.tooltip;
        if !(t.left_offset < 0. && t.right_offset > 0.) {
            return bad("tooltip offsets must be negative on the left and positive on the right");
        }
        // With overlapping thresholds the tooltip would flip on every frame
        if self.viewport.width - t.edge_margin_high < t.edge_margin_low {
            return bad("viewport too narrow for the tooltip edge margins");
        }
        Ok(())
    }
}
