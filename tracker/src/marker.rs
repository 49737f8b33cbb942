//! One on-screen marker: position and size animated towards the latest box, with its tooltip.
//!

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use lookup_formats::{BoxDims, PixelPoint};

use crate::{Lerp, TooltipFlip, TooltipSide, TrackerConfig, Tween};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Lerp for Size {
    #[inline]
    fn lerp(from: Self, to: Self, t: f64) -> Self {
        Size {
            width: f64::lerp(from.width, to.width, t),
            height: f64::lerp(from.height, to.height, t),
        }
    }
}

/// What gets drawn at a given instant.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MarkerFrame {
    pub position: PixelPoint,
    pub size: Size,
    pub tooltip_side: TooltipSide,
    pub tooltip_offset: f64,
}

impl MarkerFrame {
    pub fn to_box(&self) -> BoxDims {
        BoxDims {
            x: self.position.x,
            y: self.position.y,
            width: self.size.width,
            height: self.size.height,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Marker {
    position: Tween<PixelPoint>,
    size: Tween<Size>,
    tooltip: TooltipFlip,
    duration: Duration,
}

impl Marker {
    /// Marker sitting still on `initial`.
    ///
    pub fn new(initial: BoxDims, cfg: &TrackerConfig) -> Self {
        Self {
            position: Tween::still(PixelPoint::new(initial.x, initial.y)),
            size: Tween::still(Size {
                width: initial.width,
                height: initial.height,
            }),
            tooltip: TooltipFlip::new(cfg.tooltip, cfg.viewport.width),
            duration: cfg.duration(),
        }
    }

    /// Start animating towards `target` from wherever we are at `now`.
    ///
    pub fn retarget(&mut self, target: BoxDims, now: Duration) {
        trace!("retarget to {target:?}");
        self.position
            .retarget(PixelPoint::new(target.x, target.y), now, self.duration);
        self.size.retarget(
            Size {
                width: target.width,
                height: target.height,
            },
            now,
            self.duration,
        );
    }

    /// Interpolated state at `now`.  This is also where the tooltip edge check runs, on the
    /// interpolated horizontal position.
    ///
    pub fn frame(&mut self, now: Duration) -> MarkerFrame {
        let position = self.position.value_at(now);
        self.tooltip.on_position(position.x, now);
        MarkerFrame {
            position,
            size: self.size.value_at(now),
            tooltip_side: self.tooltip.side(),
            tooltip_offset: self.tooltip.offset_at(now),
        }
    }

    /// Final destination of the current animation
    ///
    pub fn target(&self) -> BoxDims {
        let p = self.position.target();
        let s = self.size.target();
        BoxDims {
            x: p.x,
            y: p.y,
            width: s.width,
            height: s.height,
        }
    }

    #[inline]
    pub fn is_moving(&self, now: Duration) -> bool {
        self.position.is_running(now) || self.size.is_running(now)
    }

    #[inline]
    pub fn tooltip_side(&self) -> TooltipSide {
        self.tooltip.side()
    }
}
