//! Clock hands and their touch targets

use crate::geometry::{ClockGeometry, Point};

/// One of the three draggable hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    Hour,
    Minute,
    Stop,
}

impl HandKind {
    /// Hit-test order when touch targets overlap
    pub const PRIORITY: [HandKind; 3] = [HandKind::Hour, HandKind::Minute, HandKind::Stop];
}

impl std::fmt::Display for HandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandKind::Hour => write!(f, "hour"),
            HandKind::Minute => write!(f, "minute"),
            HandKind::Stop => write!(f, "stop"),
        }
    }
}

/// A hand on the dial
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub kind: HandKind,
    /// Internal angle in `[0, TAU)`
    pub angle: f32,
    /// Distance from the center to the handle
    pub length: f32,
    /// Draw only the handle, without a line from the center
    pub handle_only: bool,
}

impl Hand {
    pub fn new(kind: HandKind) -> Self {
        Self {
            kind,
            angle: 0.0,
            length: 0.0,
            handle_only: kind == HandKind::Stop,
        }
    }

    /// Take this hand's length from the dial layout
    pub fn apply_geometry(&mut self, geometry: &ClockGeometry) {
        self.length = match self.kind {
            HandKind::Hour => geometry.hour_length,
            HandKind::Minute => geometry.minute_length,
            HandKind::Stop => geometry.stop_length,
        };
    }

    /// Position of the handle on the face
    pub fn position(&self, center: Point) -> Point {
        Point::on_circle(center, self.angle, self.length)
    }

    /// Whether `point` lies strictly inside the handle's touch target
    pub fn hit(&self, center: Point, point: Point, touch_radius: f32) -> bool {
        self.position(center).distance(point) < touch_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_hand_is_handle_only() {
        assert!(Hand::new(HandKind::Stop).handle_only);
        assert!(!Hand::new(HandKind::Hour).handle_only);
        assert!(!Hand::new(HandKind::Minute).handle_only);
    }

    #[test]
    fn test_hit_is_strict() {
        let center = Point::new(0.0, 0.0);
        let mut hand = Hand::new(HandKind::Minute);
        hand.length = 100.0;
        // angle 0 puts the handle at (100, 0)
        assert!(hand.hit(center, Point::new(110.0, 0.0), 24.0));
        assert!(!hand.hit(center, Point::new(124.0, 0.0), 24.0));
        assert!(!hand.hit(center, Point::new(0.0, 100.0), 24.0));
    }

    #[test]
    fn test_apply_geometry() {
        let geometry = ClockGeometry::fit(800.0, 800.0, 1.0);
        let mut hand = Hand::new(HandKind::Stop);
        hand.apply_geometry(&geometry);
        assert_eq!(hand.length, geometry.stop_length);
    }
}
