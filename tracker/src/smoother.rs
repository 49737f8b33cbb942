//! Bounding-region smoother.
//!
//! The detector result (if any) is only a target: on each refresh tick the marker starts a new
//! animation towards it, from its current interpolated state.  Without any detection, a box
//! centred on the viewport is used so that the marker never disappears.
//!
//! The clock is external: `tick()` on every refresh interval, `frame()` on every animation
//! frame.  `advance()` does both for callers stepping the time themselves.
//!

use std::time::Duration;

use tracing::{debug, trace};

use lookup_formats::{BoundingRegion, BoxDims};

use crate::{Marker, MarkerFrame, TrackerConfig, Viewport};

/// Placeholder of `size` x `size` px centred on the viewport.
///
pub fn synthetic_region(viewport: &Viewport, size: f64) -> BoundingRegion {
    BoundingRegion::from_box(BoxDims {
        x: (viewport.width - size) / 2.,
        y: (viewport.height - size) / 2.,
        width: size,
        height: size,
    })
}

#[derive(Clone, Debug)]
pub struct Smoother {
    synthetic: BoundingRegion,
    detection: Option<BoundingRegion>,
    marker: Marker,
    refresh: Duration,
    /// when the next retarget is due
    next_tick: Duration,
}

impl Smoother {
    /// Start with the marker on the synthetic box, first retarget is due at `now`.
    ///
    pub fn new(cfg: &TrackerConfig, now: Duration) -> Self {
        let synthetic = synthetic_region(&cfg.viewport, cfg.box_size);
        Self {
            synthetic,
            detection: None,
            marker: Marker::new(synthetic.to_box(), cfg),
            refresh: cfg.refresh(),
            next_tick: now,
        }
    }

    /// Latest detection, already in display pixels.  `None` goes back to the synthetic box; not
    /// calling this at all keeps the last one.
    ///
    pub fn set_detection(&mut self, detection: Option<BoundingRegion>) {
        debug!("detection: {detection:?}");
        self.detection = detection;
    }

    /// Box the next tick will animate to.
    ///
    #[inline]
    pub fn target(&self) -> BoxDims {
        self.detection.unwrap_or(self.synthetic).to_box()
    }

    /// Refresh tick: retarget the marker.
    ///
    pub fn tick(&mut self, now: Duration) {
        let target = self.target();
        trace!("tick at {now:?} to {target:?}");
        self.marker.retarget(target, now);
    }

    /// Animation frame
    ///
    #[inline]
    pub fn frame(&mut self, now: Duration) -> MarkerFrame {
        self.marker.frame(now)
    }

    /// Run every tick due up to `now` then return the frame.  Missed ticks are collapsed into
    /// one.
    ///
    pub fn advance(&mut self, now: Duration) -> MarkerFrame {
        if now >= self.next_tick {
            self.tick(now);
            while self.next_tick <= now {
                self.next_tick += self.refresh;
            }
        }
        self.frame(now)
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }
}
