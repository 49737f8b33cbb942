//! `track` sub-command: run the marker smoother without any display.
//!
//! With `--simulate` the clock is stepped frame by frame and the command returns at once,
//! otherwise a real tracking session runs for the given duration.
//!

use std::time::Duration;

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tokio::time::{interval, Instant};
use tracing::{info, trace};

use lookup_formats::BoundingRegion;
use lookup_tracker::{MarkerFrame, Smoother, TrackerConfig, TrackingSession};

use crate::{load_best_region, CtlConfig, TrackOpts};

#[tracing::instrument(skip(cfg))]
pub async fn track_from_file(cfg: &CtlConfig, opts: &TrackOpts) -> Result<String> {
    trace!("track_from_file({:?})", opts.file);

    let detection = match &opts.file {
        Some(path) => Some(load_best_region(path)?),
        None => None,
    };
    let duration = Duration::from_millis(opts.duration_ms);

    let frames = if opts.simulate {
        track_simulated(&cfg.tracker, detection, duration)
    } else {
        info!("tracking for {duration:?}");
        track_live(&cfg.tracker, detection, duration).await
    };
    Ok(list_frames(&frames))
}

/// Step the smoother on a simulated clock, keep one frame per refresh interval.
///
pub fn track_simulated(
    cfg: &TrackerConfig,
    detection: Option<BoundingRegion>,
    duration: Duration,
) -> Vec<(Duration, MarkerFrame)> {
    let mut smoother = Smoother::new(cfg, Duration::ZERO);
    smoother.set_detection(detection);

    let mut res = vec![];
    let mut now = Duration::ZERO;
    let mut next = Duration::ZERO;
    while now <= duration {
        let frame = smoother.advance(now);
        if now >= next {
            res.push((now, frame));
            next += cfg.refresh();
        }
        now += cfg.frame();
    }
    res
}

/// Same through a real session, sampling the published frame on every refresh interval.
///
pub async fn track_live(
    cfg: &TrackerConfig,
    detection: Option<BoundingRegion>,
    duration: Duration,
) -> Vec<(Duration, MarkerFrame)> {
    let (session, feeds) = TrackingSession::start(*cfg);
    feeds.detection.send_replace(detection);
    let frames = session.frames();

    let start = Instant::now();
    let mut sample = interval(cfg.refresh());
    let mut res = vec![];
    loop {
        sample.tick().await;
        let t = start.elapsed();
        if t > duration {
            break;
        }
        res.push((t, *frames.borrow()));
    }
    session.stop().await;
    res
}

pub fn list_frames(frames: &[(Duration, MarkerFrame)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Time (ms)", "X", "Y", "Width", "Height", "Tooltip", "Offset"]);

    frames.iter().for_each(|(t, f)| {
        builder.push_record([
            t.as_millis().to_string(),
            format!("{:.1}", f.position.x),
            format!("{:.1}", f.position.y),
            format!("{:.1}", f.size.width),
            format!("{:.1}", f.size.height),
            f.tooltip_side.to_string(),
            format!("{:.0}", f.tooltip_offset),
        ]);
    });
    builder.build().with(Style::modern()).to_string()
}
