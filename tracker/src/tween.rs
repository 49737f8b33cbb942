//! Minimal animation primitive.
//!
//! A `Tween` interpolates between two values over a fixed duration.  Retargeting starts from
//! the value at the time of the call, so a new animation can be started while the previous
//! one is still running without any jump.
//!

use std::time::Duration;

use lookup_formats::PixelPoint;

/// Anything we can interpolate
///
pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(from: Self, to: Self, t: f64) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for PixelPoint {
    #[inline]
    fn lerp(from: Self, to: Self, t: f64) -> Self {
        PixelPoint::new(f64::lerp(from.x, to.x, t), f64::lerp(from.y, to.y, t))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, strum::Display)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out
    #[default]
    InOut,
}

impl Easing {
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::InOut => {
                if t < 0.5 {
                    4. * t * t * t
                } else {
                    1. - (-2. * t + 2.).powi(3) / 2.
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// Not moving
    ///
    pub fn still(value: T) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Interpolated value at `now`
    ///
    #[inline]
    pub fn value_at(&self, now: Duration) -> T {
        if now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start).as_secs_f64() / self.duration.as_secs_f64();
        T::lerp(self.from, self.to, self.easing.apply(t))
    }

    /// Start moving towards `to` from wherever we are at `now`.
    ///
    pub fn retarget(&mut self, to: T, now: Duration, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    #[inline]
    pub fn target(&self) -> T {
        self.to
    }

    #[inline]
    pub fn is_running(&self, now: Duration) -> bool {
        now < self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[rstest]
    #[case(Easing::Linear, 0.25, 0.25)]
    #[case(Easing::InOut, 0., 0.)]
    #[case(Easing::InOut, 0.5, 0.5)]
    #[case(Easing::InOut, 1., 1.)]
    #[case(Easing::InOut, 0.25, 0.0625)]
    fn test_easing(#[case] e: Easing, #[case] t: f64, #[case] expected: f64) {
        assert!((e.apply(t) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_still() {
        let t = Tween::still(3.);
        assert_eq!(3., t.value_at(Duration::ZERO));
        assert_eq!(3., t.value_at(MS(1000)));
        assert!(!t.is_running(Duration::ZERO));
    }

    #[test]
    fn test_linear() {
        let mut t = Tween::still(0.).with_easing(Easing::Linear);
        t.retarget(100., MS(1000), MS(1000));

        assert_eq!(0., t.value_at(MS(500)));
        assert_eq!(0., t.value_at(MS(1000)));
        assert!((t.value_at(MS(1500)) - 50.).abs() < 1e-9);
        assert_eq!(100., t.value_at(MS(2000)));
        assert_eq!(100., t.value_at(MS(5000)));
        assert!(t.is_running(MS(1999)));
        assert!(!t.is_running(MS(2000)));
    }

    #[test]
    fn test_retarget_midway() {
        let mut t = Tween::still(0.).with_easing(Easing::Linear);
        t.retarget(100., Duration::ZERO, MS(1000));
        // halfway there, go back
        t.retarget(0., MS(500), MS(1000));

        assert!((t.value_at(MS(500)) - 50.).abs() < 1e-9);
        assert!((t.value_at(MS(1000)) - 25.).abs() < 1e-9);
        assert_eq!(0., t.value_at(MS(1500)));
        assert_eq!(0., t.target());
    }

    #[test]
    fn test_point() {
        let mut t = Tween::still(PixelPoint::new(0., 0.)).with_easing(Easing::Linear);
        t.retarget(PixelPoint::new(100., 200.), Duration::ZERO, MS(1000));
        let p = t.value_at(MS(250));
        assert!((p.x - 25.).abs() < 1e-9);
        assert!((p.y - 50.).abs() < 1e-9);
    }
}
