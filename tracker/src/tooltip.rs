//! Tooltip edge flip.
//!
//! The info bubble sits on the right of the marker.  When the marker gets close to the right
//! edge the bubble moves to its left, and back when it gets close to the left edge.  Only the
//! horizontal coordinate matters.
//!
//! ```text
//!            x < edge_margin_low
//!        +----------------------+
//!        v                      |
//!    +-------+             +------+
//!    | Right |             | Left |
//!    +-------+             +------+
//!        |                      ^
//!        +----------------------+
//!       x > width - edge_margin_high
//! ```
//!
//! `on_position()` is called on every animation frame: it is O(1) and does not allocate.
//!

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Easing, TooltipConfig, Tween};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TooltipSide {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug)]
pub struct TooltipFlip {
    cfg: TooltipConfig,
    /// x over which we go left
    high: f64,
    side: TooltipSide,
    offset: Tween<f64>,
}

impl TooltipFlip {
    pub fn new(cfg: TooltipConfig, screen_width: f64) -> Self {
        Self {
            cfg,
            high: screen_width - cfg.edge_margin_high,
            side: TooltipSide::Right,
            offset: Tween::still(cfg.right_offset).with_easing(Easing::InOut),
        }
    }

    /// Check the marker horizontal position, flip if needed.  Returns the new side on a
    /// transition, `None` otherwise (including when already on the right side).
    ///
    #[inline]
    pub fn on_position(&mut self, x: f64, now: Duration) -> Option<TooltipSide> {
        let (side, offset) = if x > self.high && self.side != TooltipSide::Left {
            (TooltipSide::Left, self.cfg.left_offset)
        } else if x < self.cfg.edge_margin_low && self.side != TooltipSide::Right {
            (TooltipSide::Right, self.cfg.right_offset)
        } else {
            return None;
        };

        self.side = side;
        self.offset
            .retarget(offset, now, Duration::from_millis(self.cfg.duration_ms));
        info!("tooltip to the {side} at x={x:.0}");
        Some(side)
    }

    #[inline]
    pub fn side(&self) -> TooltipSide {
        self.side
    }

    /// Current horizontal offset of the tooltip relative to the marker
    ///
    #[inline]
    pub fn offset_at(&self, now: Duration) -> f64 {
        self.offset.value_at(now)
    }
}
