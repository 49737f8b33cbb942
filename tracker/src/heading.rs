//! Compass heading handling.
//!
//! The raw compass value goes through two stages before being used by the matcher:
//!
//! 1. a fixed offset depending on how the device is held (0 or 180 in practice)
//! 2. a pitch lock: when the phone is tilted past the threshold the compass becomes
//!    unreliable, so the last heading is frozen until the phone comes back
//!

use tracing::{debug, info};

use lookup_common::normalize_deg;

/// Offset added to the raw compass heading.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadingOffset(f64);

impl HeadingOffset {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    #[inline]
    pub fn apply(&self, raw: f64) -> f64 {
        normalize_deg(raw + self.0)
    }
}

/// Pitch from an accelerometer sample, in degrees.
///
/// 0° is flat (screen up), +90° is vertical with the top edge up.
///
#[inline]
pub fn pitch_from_accel(x: f64, y: f64, z: f64) -> f64 {
    y.atan2((x * x + z * z).sqrt()).to_degrees()
}

/// Freeze the displayed heading while the device is tilted.
///
#[derive(Clone, Debug)]
pub struct PitchLock {
    threshold: f64,
    locked: bool,
    raw: Option<f64>,
    display: Option<f64>,
}

impl PitchLock {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            locked: false,
            raw: None,
            display: None,
        }
    }

    /// New pitch sample.  Returns the new lock state if it changed.
    ///
    pub fn on_pitch(&mut self, pitch: f64) -> Option<bool> {
        let was = self.locked;
        if !self.locked && pitch.abs() > self.threshold {
            self.locked = true;
        } else if self.locked && pitch.abs() <= self.threshold {
            self.locked = false;
        }
        self.refresh();

        if was != self.locked {
            info!("heading {}", if self.locked { "locked" } else { "unlocked" });
            Some(self.locked)
        } else {
            None
        }
    }

    /// New heading sample (already offset), `None` when the compass is unavailable.
    ///
    pub fn on_heading(&mut self, heading: Option<f64>) {
        self.raw = heading;
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.locked {
            // keep what we had, or the first value ever seen
            if self.display.is_none() {
                self.display = self.raw;
            }
        } else {
            self.display = self.raw;
        }
        debug!("display = {:?}", self.display);
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Heading to use right now
    ///
    #[inline]
    pub fn display(&self) -> Option<f64> {
        self.display
    }
}
