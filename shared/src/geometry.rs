//! Dial geometry - layout of the clock face and hand lengths
//!
//! All coordinates are control-local screen coordinates: origin at the top
//! left corner, y growing downward. In that frame `atan2(dy, dx)` measures
//! clockwise from 3 o'clock, matching the internal angle convention in
//! [`crate::angle`].

use serde::{Deserialize, Serialize};

/// Touch target radius in density-independent pixels
pub const TOUCH_RADIUS_DP: f32 = 24.0;

/// A point in control-local coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `length` from `center` in direction `angle`
    pub fn on_circle(center: Point, angle: f32, length: f32) -> Self {
        Self {
            x: center.x + length * angle.cos(),
            y: center.y + length * angle.sin(),
        }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Internal angle of this point as seen from `center`
    pub fn angle_from(self, center: Point) -> f32 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Geometry parameters supplied by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockGeometry {
    /// Center of the dial
    pub center: Point,
    /// Outer radius of the dial
    pub radius: f32,
    /// Distance from center to the hour handle
    pub hour_length: f32,
    /// Distance from center to the stop handle
    pub stop_length: f32,
    /// Distance from center to the minute handle
    pub minute_length: f32,
    /// Radius of each handle's touch target
    pub touch_radius: f32,
}

impl ClockGeometry {
    /// Lay out a dial inside a `width` x `height` control.
    ///
    /// `density` is the display scale factor (physical pixels per
    /// density-independent pixel). Hands sit at 40%, 60% and 80% of the
    /// radius; on small dials where those rings would be closer than one
    /// touch target the stop and minute handles are spread outward from the
    /// hour handle instead.
    pub fn fit(width: f32, height: f32, density: f32) -> Self {
        let radius = width.min(height) * 0.5;
        let touch_radius = density * TOUCH_RADIUS_DP;
        let cell = radius * 0.6 / 3.0;
        let hour_length = radius * 0.4;

        let (stop_length, minute_length) = if cell < touch_radius * 2.0 {
            let stop = hour_length + cell;
            (stop, stop + cell)
        } else {
            (radius * 0.6, radius * 0.8)
        };

        Self {
            center: Point::new(width * 0.5, height * 0.5),
            radius,
            hour_length,
            stop_length,
            minute_length,
            touch_radius,
        }
    }

    /// Whether this geometry can be used for hit testing and angle math
    pub fn is_valid(&self) -> bool {
        let lengths = [
            self.radius,
            self.hour_length,
            self.stop_length,
            self.minute_length,
            self.touch_radius,
        ];
        self.center.is_finite() && lengths.iter().all(|l| l.is_finite() && *l > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_large_dial() {
        let g = ClockGeometry::fit(800.0, 600.0, 1.0);
        assert_eq!(g.center, Point::new(400.0, 300.0));
        assert_eq!(g.radius, 300.0);
        assert_eq!(g.touch_radius, 24.0);
        assert!((g.hour_length - 120.0).abs() < 1e-3);
        assert!((g.stop_length - 180.0).abs() < 1e-3);
        assert!((g.minute_length - 240.0).abs() < 1e-3);
        assert!(g.is_valid());
    }

    #[test]
    fn test_fit_small_dial_spreads_handles() {
        // cell = 100 * 0.6 / 3 = 20, narrower than two touch radii
        let g = ClockGeometry::fit(200.0, 200.0, 1.0);
        assert!((g.hour_length - 40.0).abs() < 1e-3);
        assert!((g.stop_length - 60.0).abs() < 1e-3);
        assert!((g.minute_length - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_size_is_invalid() {
        assert!(!ClockGeometry::fit(0.0, 0.0, 1.0).is_valid());
        assert!(!ClockGeometry::fit(300.0, 300.0, 0.0).is_valid());
    }

    #[test]
    fn test_point_angle_from_center() {
        let c = Point::new(100.0, 100.0);
        // Below the center is 6 o'clock, a quarter turn clockwise from 3
        let below = Point::new(100.0, 150.0);
        assert!((below.angle_from(c) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let p = Point::on_circle(c, 1.0, 50.0);
        assert!((p.distance(c) - 50.0).abs() < 1e-3);
        assert!((p.angle_from(c) - 1.0).abs() < 1e-5);
    }
}
