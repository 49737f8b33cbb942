//! Answer of the object detector.
//!
//! The detector service gets a camera frame and answers with a JSON array, one entry per
//! detected object:
//!
//! ```json
//! [{"class": "plane", "confidence": 0.87,
//!   "top_left": [x0, y0], "top_right": [x1, y0], "bottom_left": [x0, y1], "bottom_right": [x1, y1]}]
//! ```
//!
//! Coordinates are in image pixels; rescaling to the display is up to the caller
//! (`BoundingRegion::scaled()`).
//!

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{BoundingRegion, FormatError};

/// Minimum confidence kept by default
pub const DEF_CONFIDENCE: f64 = 0.5;

/// Default IoU over which two boxes are the same object
pub const DEF_IOU: f64 = 0.3;

/// One detected object.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Detection {
    /// Model class label
    #[serde(default)]
    pub class: String,
    /// In [0, 1]
    pub confidence: f64,
    #[serde(flatten)]
    pub region: BoundingRegion,
}

impl Detection {
    /// Reject what could not be drawn.
    ///
    pub fn validate(&self) -> Result<(), FormatError> {
        if !self.confidence.is_finite() || !(0. ..=1.).contains(&self.confidence) {
            return Err(FormatError::InvalidConfidence(self.confidence));
        }
        let b = self.region.to_box();
        if !(b.width.is_finite() && b.height.is_finite() && b.width > 0. && b.height > 0.) {
            return Err(FormatError::DegenerateBox {
                width: b.width,
                height: b.height,
            });
        }
        Ok(())
    }

    /// Deserialize from json, dropping invalid entries.
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Vec<Detection>, FormatError> {
        trace!("detection::from_json");

        let data: Vec<Detection> = serde_json::from_str(input)?;
        let total = data.len();
        let res: Vec<_> = data
            .into_iter()
            .filter(|d| match d.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("skipping {}: {e}", d.class);
                    false
                }
            })
            .collect();
        debug!("{} valid detections out of {total}", res.len());
        Ok(res)
    }
}

/// Keep only detections at or above `min` confidence.
///
pub fn filter_confidence(dets: Vec<Detection>, min: f64) -> Vec<Detection> {
    dets.into_iter().filter(|d| d.confidence >= min).collect()
}

/// Greedy non-maximum suppression: highest confidence first, drop everything overlapping a
/// kept box by `iou` or more.
///
#[tracing::instrument(skip(dets))]
pub fn non_max_suppression(mut dets: Vec<Detection>, iou: f64) -> Vec<Detection> {
    dets.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Detection> = Vec::with_capacity(dets.len());
    for d in dets {
        if kept.iter().all(|k| k.region.iou(&d.region) < iou) {
            kept.push(d);
        }
    }
    trace!("{} boxes kept", kept.len());
    kept
}

/// The one to follow: highest confidence.
///
pub fn best_detection(dets: &[Detection]) -> Option<&Detection> {
    dets.iter().max_by(|a, b| a.confidence.total_cmp(&b.confidence))
}
