//! Drawing module - clock face, duration wedge and hands
//!
//! Renders the touch clock using nannou's Draw API. The control works in
//! control-local coordinates (origin top left, y down); nannou's world has
//! its origin at the window center with y up, so every point goes through
//! [`to_world`] on the way out and [`to_control`] on the way in.

use nannou::prelude::*;
use touchclock::angle::{RAD_PER_MINUTE, TAU};
use touchclock::{ClockGeometry, Hand, HandKind, Point, TouchClock};

/// Height reserved for the readout bar at the top
const TOP_BAR_HEIGHT: f32 = 44.0;
/// Height reserved for the controls panel at the bottom
const BOTTOM_PANEL_HEIGHT: f32 = 48.0;

/// Color palette, Holo blues with a purple stop hand
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 24,
        green: 24,
        blue: 28,
        standard: std::marker::PhantomData,
    };
    pub const MARK: Srgb<u8> = Srgb {
        red: 0,
        green: 153,
        blue: 204,
        standard: std::marker::PhantomData,
    };
    pub const HOUR: Srgb<u8> = Srgb {
        red: 0,
        green: 153,
        blue: 204,
        standard: std::marker::PhantomData,
    };
    pub const MINUTE: Srgb<u8> = Srgb {
        red: 51,
        green: 181,
        blue: 229,
        standard: std::marker::PhantomData,
    };
    pub const STOP: Srgb<u8> = Srgb {
        red: 170,
        green: 102,
        blue: 204,
        standard: std::marker::PhantomData,
    };

    /// `color` with an alpha channel
    pub fn with_alpha(color: Srgb<u8>, alpha: u8) -> Srgba<u8> {
        srgba(color.red, color.green, color.blue, alpha)
    }
}

/// Area of the window the dial lives in
pub fn dial_rect(window_rect: Rect) -> Rect {
    window_rect
        .pad_top(TOP_BAR_HEIGHT)
        .pad_bottom(BOTTOM_PANEL_HEIGHT)
}

/// Map a nannou world point into control-local coordinates
pub fn to_control(rect: Rect, point: Point2) -> Point {
    Point::new(point.x - rect.left(), rect.top() - point.y)
}

/// Map a control-local point into nannou world coordinates
pub fn to_world(rect: Rect, point: Point) -> Point2 {
    pt2(rect.left() + point.x, rect.top() - point.y)
}

/// Whether a press at `point` belongs to the clock.
///
/// Presses over the egui panels stay with egui, even where a touch target
/// reaches past the dial's edge.
pub fn accepts_press(rect: Rect, point: Point2, over_panel: bool) -> bool {
    !over_panel && rect.contains(point)
}

/// Lay out the dial for a rect.
///
/// nannou already measures in logical points, so the density is 1.
pub fn dial_geometry(rect: Rect) -> ClockGeometry {
    ClockGeometry::fit(rect.w(), rect.h(), 1.0)
}

/// Draw the whole clock
pub fn draw_clock(draw: &Draw, rect: Rect, clock: &TouchClock) {
    let Some(geometry) = clock.geometry() else {
        return;
    };

    draw_face(draw, rect, geometry);

    if clock.use_duration() {
        draw_duration(draw, rect, geometry, clock);
    }

    let active = clock.drag_state().hand();
    for hand in clock.hands() {
        if hand.kind == HandKind::Stop && !clock.use_duration() {
            continue;
        }
        draw_hand(draw, rect, geometry, hand, active == Some(hand.kind));
    }

    draw.ellipse()
        .xy(to_world(rect, geometry.center))
        .radius(geometry.touch_radius * 0.3)
        .color(colors::MARK);
}

/// Draw the 60 tick marks, longer on every fifth minute
fn draw_face(draw: &Draw, rect: Rect, geometry: &ClockGeometry) {
    let radius = geometry.radius;
    let center = geometry.center;

    for i in 0..60 {
        let angle = i as f32 * RAD_PER_MINUTE;
        let inner = if i % 5 == 0 { radius * 0.9 } else { radius * 0.95 };

        draw.line()
            .start(to_world(rect, Point::on_circle(center, angle, inner)))
            .end(to_world(rect, Point::on_circle(center, angle, radius)))
            .color(colors::MARK)
            .weight(2.0);
    }
}

/// Draw the wedge between the hour hand and the stop hand
fn draw_duration(draw: &Draw, rect: Rect, geometry: &ClockGeometry, clock: &TouchClock) {
    let start = clock.hand(HandKind::Hour).angle;
    let points = arc_points(
        geometry.center,
        geometry.stop_length,
        start,
        clock.duration_sweep(),
    );
    if points.len() < 2 {
        return;
    }

    let world: Vec<Point2> = points.iter().map(|p| to_world(rect, *p)).collect();
    let wedge = std::iter::once(to_world(rect, geometry.center)).chain(world.iter().copied());

    draw.polygon()
        .color(colors::with_alpha(colors::STOP, 0x44))
        .points(wedge);

    draw.polyline()
        .weight(2.0)
        .color(colors::STOP)
        .points(world);
}

/// Points along a clockwise arc of `sweep` radians starting at `start`
pub fn arc_points(center: Point, radius: f32, start: f32, sweep: f32) -> Vec<Point> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let segments = ((sweep / TAU) * 120.0).ceil().max(2.0) as usize;
    (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f32 / segments as f32);
            Point::on_circle(center, angle, radius)
        })
        .collect()
}

/// Draw one hand: a line from the center (unless handle-only), the handle
/// dot, and its translucent touch target
fn draw_hand(draw: &Draw, rect: Rect, geometry: &ClockGeometry, hand: &Hand, active: bool) {
    let color = match hand.kind {
        HandKind::Hour => colors::HOUR,
        HandKind::Minute => colors::MINUTE,
        HandKind::Stop => colors::STOP,
    };
    let tip = to_world(rect, hand.position(geometry.center));

    if !hand.handle_only {
        draw.line()
            .start(to_world(rect, geometry.center))
            .end(tip)
            .color(color)
            .weight(2.0);
    }

    draw.ellipse()
        .xy(tip)
        .radius(geometry.touch_radius * 0.3)
        .color(color);

    let target_alpha = if active { 0xcc } else { 0x88 };
    draw.ellipse()
        .xy(tip)
        .radius(geometry.touch_radius)
        .color(colors::with_alpha(color, target_alpha));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_round_trip() {
        let rect = Rect::from_x_y_w_h(0.0, 0.0, 400.0, 300.0);
        let world = pt2(-50.0, 25.0);
        let control = to_control(rect, world);
        assert_eq!(control, Point::new(150.0, 125.0));
        assert_eq!(to_world(rect, control), world);
    }

    #[test]
    fn test_control_y_points_down() {
        let rect = Rect::from_x_y_w_h(0.0, 0.0, 400.0, 400.0);
        let top = to_control(rect, pt2(0.0, 200.0));
        let bottom = to_control(rect, pt2(0.0, -200.0));
        assert!(top.y < bottom.y);
    }

    #[test]
    fn test_arc_points() {
        let center = Point::new(0.0, 0.0);
        assert!(arc_points(center, 10.0, 0.0, 0.0).is_empty());

        let points = arc_points(center, 10.0, 0.0, TAU / 4.0);
        assert!(points.len() >= 3);
        let last = points.last().unwrap();
        assert!((last.x - 0.0).abs() < 1e-3);
        assert!((last.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_dial_geometry_fits_below_bars() {
        let rect = dial_rect(Rect::from_x_y_w_h(0.0, 0.0, 600.0, 600.0));
        let geometry = dial_geometry(rect);
        assert!(geometry.is_valid());
        assert!(geometry.radius * 2.0 <= rect.h());
        assert_eq!(geometry.touch_radius, 24.0);
    }

    #[test]
    fn test_presses_on_panels_are_rejected() {
        let window = Rect::from_x_y_w_h(0.0, 0.0, 400.0, 300.0);
        let rect = dial_rect(window);

        assert!(accepts_press(rect, pt2(0.0, 0.0), false));
        assert!(!accepts_press(rect, pt2(0.0, 0.0), true));
        assert!(!accepts_press(rect, pt2(0.0, window.top() - 10.0), false));
        assert!(!accepts_press(rect, pt2(0.0, window.bottom() + 10.0), false));
    }
}
