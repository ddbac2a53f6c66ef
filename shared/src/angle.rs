//! Angle model - conversions between dial angles and clock values
//!
//! Internal angles follow screen conventions: 0 rad points at 3 o'clock and
//! angles grow clockwise (y axis pointing down). "Face" angles are the same
//! rotation shifted so that 0 rad points at 12 o'clock.
//!
//! The hour and stop hands share a 12-hour dial, so one revolution is 720
//! minutes. The minute hand uses a 60-minute dial.

pub use std::f32::consts::TAU;

/// A quarter turn, the offset between 3 o'clock and 12 o'clock
pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

/// Radians per minute on the minute dial
pub const RAD_PER_MINUTE: f32 = TAU / 60.0;

/// Minutes per radian on the minute dial
pub const MINUTES_PER_RAD: f32 = 60.0 / TAU;

/// Hours per radian on the 12-hour dial
pub const HOURS_PER_RAD: f32 = 12.0 / TAU;

/// Minutes of a full revolution on the 12-hour dial
pub const MINUTES_PER_REVOLUTION: i32 = 720;

/// Minutes per radian on the 12-hour dial
pub const DURATION_MINUTES_PER_RAD: f32 = MINUTES_PER_REVOLUTION as f32 / TAU;

/// Radians per minute on the 12-hour dial
pub const RAD_PER_DURATION_MINUTE: f32 = TAU / MINUTES_PER_REVOLUTION as f32;

/// Granularity of the stop hand, in minutes of duration
pub const DURATION_STEP_MINUTES: i32 = 5;

/// Direction in which a hand passed 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Clockwise, from just before 12 to just after it
    Forward,
    /// Counter-clockwise, from just after 12 to just before it
    Backward,
}

/// Reduce any angle into `[0, TAU)`.
///
/// Non-finite input maps to 0 so a bad pointer sample can never poison
/// stored state with NaN.
pub fn normalize(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Convert an internal angle (0 = 3 o'clock) into a face angle (0 = 12 o'clock)
pub fn clock_angle(angle: f32) -> f32 {
    normalize(angle + HALF_PI)
}

/// Clockwise sweep from `from` to `to`, in `[0, TAU)`
pub fn angular_separation(from: f32, to: f32) -> f32 {
    normalize(to - from)
}

/// Internal angle of the hour hand for a time of day.
///
/// The hand advances 0.5° per minute; hours past 12 fold onto the same dial.
pub fn hour_angle(hour: i32, minute: i32) -> f32 {
    let minutes = hour.rem_euclid(12) * 60 + minute;
    normalize(-HALF_PI + RAD_PER_DURATION_MINUTE * minutes as f32)
}

/// Internal angle of the minute hand (6° per minute)
pub fn minute_angle(minute: i32) -> f32 {
    normalize(-HALF_PI + RAD_PER_MINUTE * minute as f32)
}

/// Clockwise sweep that represents a duration on the 12-hour dial.
///
/// Durations wrap every 720 minutes; negative durations wind backwards.
pub fn duration_angle(minutes: i32) -> f32 {
    normalize(RAD_PER_DURATION_MINUTE * minutes.rem_euclid(MINUTES_PER_REVOLUTION) as f32)
}

/// Duration in minutes between the hour hand and the stop hand, in `[0, 720)`
pub fn duration_from_angles(hour_angle: f32, stop_angle: f32) -> u32 {
    let minutes = (DURATION_MINUTES_PER_RAD * angular_separation(hour_angle, stop_angle)).round();
    (minutes as i32).rem_euclid(MINUTES_PER_REVOLUTION) as u32
}

/// Snap an angle to the nearest multiple of `step`.
///
/// Ties round away from zero (`f32::round`).
pub fn quantize(angle: f32, step: f32) -> f32 {
    (angle / step).round() * step
}

/// Bring an hour that drifted out of range back into `[0, 23]`
pub fn wrap_hour(hour: i32) -> i32 {
    hour.rem_euclid(24)
}

/// Hour of day for a face angle of the hour hand.
///
/// The angle is rounded to the nearest hour mark, so a hand just short of 12
/// reads 12 in the morning half and 0 in the afternoon half. Both agree with
/// the value on the far side of the 12 o'clock flip.
pub fn hour_from_face(face: f32, pm: bool) -> i32 {
    let hour = (HOURS_PER_RAD * face).round() as i32;
    (hour + if pm { 12 } else { 0 }) % 24
}

/// Minute for a face angle of the minute hand (always rounds down)
pub fn minute_from_face(face: f32) -> i32 {
    ((MINUTES_PER_RAD * face).floor() as i32).rem_euclid(60)
}

/// Detect whether a hand moving from `last` to `current` (both face angles)
/// passed through 12 o'clock.
///
/// The direction of travel is the short way around the dial. A crossing
/// happened when that direction disagrees with the plain numeric order of
/// the two angles, i.e. the move went through the wrap point.
pub fn twelve_crossing(last: f32, current: f32) -> Option<Crossing> {
    let raw = current - last;
    let distance = raw.abs();
    let short_way = if TAU - distance < distance { -raw } else { raw };

    if short_way > 0.0 && last > current {
        Some(Crossing::Forward)
    } else if short_way < 0.0 && last < current {
        Some(Crossing::Backward)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    /// Equality on the dial, so 0 and a hair below TAU compare equal
    fn close(a: f32, b: f32) -> bool {
        let d = normalize(a - b);
        d < EPS || TAU - d < EPS
    }

    #[test]
    fn test_normalize_range() {
        for &a in &[-1000.0, -TAU, -0.001, 0.0, 1.0, TAU, TAU + 0.5, 12345.6] {
            let n = normalize(a);
            assert!((0.0..TAU).contains(&n), "normalize({}) = {}", a, n);
        }
    }

    #[test]
    fn test_normalize_negative_inputs() {
        assert!(close(normalize(-HALF_PI), 3.0 * HALF_PI));
        assert!(close(normalize(-3.0 * TAU - 1.0), TAU - 1.0));
        assert_eq!(normalize(-1e-9), 0.0);
    }

    #[test]
    fn test_normalize_idempotent() {
        for &a in &[-50.0, -3.3, 0.25, 7.0, 99.9] {
            let once = normalize(a);
            assert_eq!(normalize(once), once);
        }
    }

    #[test]
    fn test_normalize_non_finite() {
        assert_eq!(normalize(f32::NAN), 0.0);
        assert_eq!(normalize(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_clock_angle_twelve_is_zero() {
        assert!(close(clock_angle(-HALF_PI), 0.0));
        assert!(close(clock_angle(0.0), HALF_PI));
    }

    #[test]
    fn test_hour_angle_positions() {
        assert!(close(clock_angle(hour_angle(0, 0)), 0.0));
        assert!(close(clock_angle(hour_angle(3, 0)), HALF_PI));
        assert!(close(hour_angle(15, 0), hour_angle(3, 0)));
        assert!(close(hour_angle(12, 0), hour_angle(0, 0)));
        // 0.5 degrees per minute
        let half_past = clock_angle(hour_angle(6, 30));
        assert!(close(half_past, (195.0f32).to_radians()));
    }

    #[test]
    fn test_minute_angle_positions() {
        assert!(close(clock_angle(minute_angle(0)), 0.0));
        assert!(close(clock_angle(minute_angle(15)), HALF_PI));
        assert!(close(clock_angle(minute_angle(45)), 3.0 * HALF_PI));
    }

    #[test]
    fn test_duration_from_equal_angles_is_zero() {
        for &a in &[0.0, 1.0, 3.0, 6.2] {
            assert_eq!(duration_from_angles(a, a), 0);
        }
    }

    #[test]
    fn test_duration_is_clockwise_sweep() {
        let start = hour_angle(2, 50);
        let stop = normalize(start + duration_angle(120));
        assert_eq!(duration_from_angles(start, stop), 120);
        // Reversed hands give the complementary sweep, never a negative one
        assert_eq!(duration_from_angles(stop, start), 600);
    }

    #[test]
    fn test_duration_stays_below_full_revolution() {
        let start = 1.0;
        let stop = start - 1e-5;
        assert!(duration_from_angles(start, stop) < 720);
    }

    #[test]
    fn test_duration_angle_wraps() {
        assert!(close(duration_angle(720), 0.0));
        assert!(close(duration_angle(-60), duration_angle(660)));
    }

    #[test]
    fn test_quantize_ties_round_away_from_zero() {
        assert_eq!(quantize(2.5, 1.0), 3.0);
        assert_eq!(quantize(-2.5, 1.0), -3.0);
        assert_eq!(quantize(121.0, 5.0), 120.0);
        assert_eq!(quantize(122.5, 5.0), 125.0);
    }

    #[test]
    fn test_wrap_hour() {
        assert_eq!(wrap_hour(-1), 23);
        assert_eq!(wrap_hour(24), 0);
        assert_eq!(wrap_hour(49), 1);
        for h in -100..100 {
            let w = wrap_hour(h);
            assert!((0..24).contains(&w));
            assert_eq!(wrap_hour(w), w);
        }
    }

    #[test]
    fn test_hour_from_face() {
        assert_eq!(hour_from_face(HALF_PI, false), 3);
        assert_eq!(hour_from_face(HALF_PI, true), 15);
        // just short of 12 o'clock
        assert_eq!(hour_from_face(TAU - 0.05, false), 12);
        assert_eq!(hour_from_face(TAU - 0.05, true), 0);
    }

    #[test]
    fn test_minute_from_face_rounds_down() {
        assert_eq!(minute_from_face(0.0), 0);
        assert_eq!(minute_from_face(RAD_PER_MINUTE * 7.9), 7);
        assert_eq!(minute_from_face(TAU - 1e-4), 59);
    }

    #[test]
    fn test_twelve_crossing_forward() {
        assert_eq!(twelve_crossing(TAU - 0.1, 0.1), Some(Crossing::Forward));
    }

    #[test]
    fn test_twelve_crossing_backward() {
        assert_eq!(twelve_crossing(0.1, TAU - 0.1), Some(Crossing::Backward));
    }

    #[test]
    fn test_twelve_crossing_ignores_normal_moves() {
        assert_eq!(twelve_crossing(1.0, 1.2), None);
        assert_eq!(twelve_crossing(1.2, 1.0), None);
        // Crossing 6 o'clock is not a crossing of 12
        assert_eq!(twelve_crossing(3.0, 3.3), None);
        assert_eq!(twelve_crossing(3.3, 3.0), None);
    }
}
