//! `detect` sub-command, also used by `track` to load a detection.
//!

use std::fs;
use std::path::Path;

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, trace};

use lookup_formats::{
    best_detection, filter_confidence, non_max_suppression, BoundingRegion, Detection,
    DEF_CONFIDENCE, DEF_IOU,
};

use crate::{DetectOpts, Status};

/// Read a detector answer, drop the weak and duplicate boxes.
///
#[tracing::instrument]
pub fn load_detections(path: &Path, confidence: f64, iou: f64) -> Result<(Vec<Detection>, usize)> {
    let data = fs::read_to_string(path)?;
    let dets = Detection::from_json(&data)?;
    let total = dets.len();

    let dets = non_max_suppression(filter_confidence(dets, confidence), iou);
    debug!("{} kept out of {total}", dets.len());
    Ok((dets, total))
}

/// Region to follow from a detector answer, with the default thresholds.
///
#[tracing::instrument]
pub fn load_best_region(path: &Path) -> Result<BoundingRegion> {
    let (dets, _) = load_detections(path, DEF_CONFIDENCE, DEF_IOU)?;
    let best = best_detection(&dets)
        .ok_or_else(|| Status::NoDetection(path.to_string_lossy().to_string()))?;
    Ok(best.region)
}

#[tracing::instrument]
pub fn detect_in_file(opts: &DetectOpts) -> Result<String> {
    trace!("detect_in_file({:?})", opts.file);

    let (dets, total) = load_detections(&opts.file, opts.confidence, opts.iou)?;
    let dets: Vec<_> = dets
        .into_iter()
        .map(|d| Detection {
            region: d.region.scaled(opts.scale_x, opts.scale_y),
            ..d
        })
        .collect();

    Ok(format!(
        "{} detections kept out of {total}\n{}",
        dets.len(),
        list_detections(&dets)
    ))
}

pub fn list_detections(dets: &[Detection]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Class", "Confidence", "X", "Y", "Width", "Height"]);

    dets.iter().for_each(|d| {
        let b = d.region.to_box();
        builder.push_record([
            d.class.clone(),
            format!("{:.2}", d.confidence),
            format!("{:.0}", b.x),
            format!("{:.0}", b.y),
            format!("{:.0}", b.width),
            format!("{:.0}", b.height),
        ]);
    });
    builder.build().with(Style::modern()).to_string()
}
