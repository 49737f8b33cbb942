//! Pixel-space geometry.
//!
//! The detector describes a box by its four corners, the marker is animated with
//! `{x, y, width, height}`.  Both live here with the conversion between them.
//!

use serde::{Deserialize, Serialize};

/// A point in pixel space, serialised as `[x, y]`.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for PixelPoint {
    fn from(v: [f64; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

impl From<PixelPoint> for [f64; 2] {
    fn from(p: PixelPoint) -> Self {
        [p.x, p.y]
    }
}

/// Top-left anchored box.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BoxDims {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxDims {
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Four-corner box as sent by the detector.  Replaced wholesale on each cycle.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BoundingRegion {
    pub top_left: PixelPoint,
    pub top_right: PixelPoint,
    pub bottom_left: PixelPoint,
    pub bottom_right: PixelPoint,
}

impl BoundingRegion {
    /// Axis-aligned region from its top-left corner and size.
    ///
    pub fn from_box(b: BoxDims) -> Self {
        let (x0, y0, x1, y1) = (b.x, b.y, b.x + b.width, b.y + b.height);
        Self {
            top_left: PixelPoint::new(x0, y0),
            top_right: PixelPoint::new(x1, y0),
            bottom_left: PixelPoint::new(x0, y1),
            bottom_right: PixelPoint::new(x1, y1),
        }
    }

    /// Top-left corner is the position, width comes from the top edge and height from the
    /// left edge.
    ///
    #[inline]
    pub fn to_box(&self) -> BoxDims {
        BoxDims {
            x: self.top_left.x,
            y: self.top_left.y,
            width: self.top_right.x - self.top_left.x,
            height: self.bottom_left.y - self.top_left.y,
        }
    }

    /// Rescale from image pixels to display pixels.
    ///
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        let s = |p: PixelPoint| PixelPoint::new(p.x * sx, p.y * sy);
        Self {
            top_left: s(self.top_left),
            top_right: s(self.top_right),
            bottom_left: s(self.bottom_left),
            bottom_right: s(self.bottom_right),
        }
    }

    /// Intersection over union of the two boxes, 0 when both are empty.
    ///
    pub fn iou(&self, other: &BoundingRegion) -> f64 {
        let a = self.to_box();
        let b = other.to_box();

        let ix = ((a.x + a.width).min(b.x + b.width) - a.x.max(b.x)).max(0.);
        let iy = ((a.y + a.height).min(b.y + b.height) - a.y.max(b.y)).max(0.);
        let inter = ix * iy;
        let union = a.area() + b.area() - inter;
        if union > 0. {
            inter / union
        } else {
            0.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_box() {
        let r = BoundingRegion {
            top_left: PixelPoint::new(10., 20.),
            top_right: PixelPoint::new(110., 20.),
            bottom_left: PixelPoint::new(10., 120.),
            bottom_right: PixelPoint::new(110., 120.),
        };
        assert_eq!(
            BoxDims {
                x: 10.,
                y: 20.,
                width: 100.,
                height: 100.
            },
            r.to_box()
        );
    }

    #[test]
    fn test_from_box() {
        let b = BoxDims {
            x: 5.,
            y: 6.,
            width: 30.,
            height: 40.,
        };
        let r = BoundingRegion::from_box(b);
        assert_eq!(PixelPoint::new(35., 46.), r.bottom_right);
        assert_eq!(b, r.to_box());
    }

    #[test]
    fn test_scaled() {
        let r = BoundingRegion::from_box(BoxDims {
            x: 100.,
            y: 50.,
            width: 200.,
            height: 100.,
        });
        let b = r.scaled(0.5, 2.).to_box();
        assert_eq!(50., b.x);
        assert_eq!(100., b.y);
        assert_eq!(100., b.width);
        assert_eq!(200., b.height);
    }

    #[test]
    fn test_iou() {
        let a = BoundingRegion::from_box(BoxDims {
            x: 0.,
            y: 0.,
            width: 10.,
            height: 10.,
        });
        let b = BoundingRegion::from_box(BoxDims {
            x: 5.,
            y: 0.,
            width: 10.,
            height: 10.,
        });
        let c = BoundingRegion::from_box(BoxDims {
            x: 50.,
            y: 50.,
            width: 10.,
            height: 10.,
        });
        assert_eq!(1., a.iou(&a));
        assert!((a.iou(&b) - 50. / 150.).abs() < 1e-9);
        assert_eq!(0., a.iou(&c));
        assert_eq!(0., BoundingRegion::default().iou(&BoundingRegion::default()));
    }

    #[test]
    fn test_corners_json() {
        let r: BoundingRegion = serde_json::from_str(
            r#"{"top_left": [10, 20], "top_right": [110, 20], "bottom_left": [10, 120], "bottom_right": [110, 120]}"#,
        )
        .unwrap();
        assert_eq!(100., r.to_box().width);
    }
}
