//! Touch clock control - the drag interaction state machine
//!
//! [`TouchClock`] owns the committed time (hour, minute, duration) and the
//! angles of the three hands. Every mutating operation returns a
//! [`TouchResult`] describing what the host and the renderer need to do;
//! nothing is called back from inside the control.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::angle::{
    angular_separation, clock_angle, duration_angle, duration_from_angles, hour_angle,
    hour_from_face, minute_angle, minute_from_face, normalize, quantize, twelve_crossing,
    wrap_hour, Crossing, DURATION_STEP_MINUTES, RAD_PER_DURATION_MINUTE,
};
use crate::geometry::{ClockGeometry, Point};
use crate::hand::{Hand, HandKind};
use crate::time_engine::{Meridiem, TimeOfDay};

/// Duration used when nothing else is known
pub const DEFAULT_DURATION: u32 = 120;

/// Which hand, if any, is captured by the pointer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingHour,
    DraggingMinute,
    DraggingStop,
}

impl DragState {
    fn capturing(kind: HandKind) -> Self {
        match kind {
            HandKind::Hour => DragState::DraggingHour,
            HandKind::Minute => DragState::DraggingMinute,
            HandKind::Stop => DragState::DraggingStop,
        }
    }

    /// The captured hand
    pub fn hand(self) -> Option<HandKind> {
        match self {
            DragState::Idle => None,
            DragState::DraggingHour => Some(HandKind::Hour),
            DragState::DraggingMinute => Some(HandKind::Minute),
            DragState::DraggingStop => Some(HandKind::Stop),
        }
    }
}

/// The committed state visible to the host.
///
/// Also the snapshot a host persists to rebuild the control later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeUpdate {
    /// Hour in 24-hour format (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Duration in minutes (0-719)
    pub duration: u32,
}

impl TimeUpdate {
    pub fn start(&self) -> TimeOfDay {
        TimeOfDay::new(self.hour as i32, self.minute as i32)
    }

    pub fn end(&self) -> TimeOfDay {
        self.start().plus_minutes(self.duration)
    }
}

/// Effects requested by one operation on the control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchResult {
    /// The hands moved and should be drawn again
    pub redraw: bool,
    /// The committed state changed; notify the host
    pub time_update: Option<TimeUpdate>,
}

impl TouchResult {
    /// Nothing happened
    pub fn is_empty(&self) -> bool {
        !self.redraw && self.time_update.is_none()
    }

    /// Combine two results, keeping the newest update
    pub fn merge(self, later: TouchResult) -> TouchResult {
        TouchResult {
            redraw: self.redraw || later.redraw,
            time_update: later.time_update.or(self.time_update),
        }
    }

    /// Hand the update (if any) to `listener`, then report whether a redraw
    /// was requested.
    pub fn dispatch<L: TimeUpdateListener + ?Sized>(self, listener: &mut L) -> bool {
        if let Some(update) = self.time_update {
            listener.on_time_update(update);
        }
        self.redraw
    }
}

/// Receiver of committed time changes.
///
/// Listeners only ever see values. The control has already finished its
/// transition by the time a listener runs, and the listener cannot reach
/// back into it. Receiving the same values twice must be harmless.
pub trait TimeUpdateListener {
    fn on_time_update(&mut self, update: TimeUpdate);
}

impl<F: FnMut(TimeUpdate)> TimeUpdateListener for F {
    fn on_time_update(&mut self, update: TimeUpdate) {
        self(update)
    }
}

/// An analog clock with draggable hour, minute and stop hands
#[derive(Debug, Clone)]
pub struct TouchClock {
    hour: Hand,
    minute: Hand,
    stop: Hand,
    geometry: Option<ClockGeometry>,
    drag: DragState,
    /// Face angle of the hour hand after the previous transition
    hour_last_angle: f32,
    /// Face angle of the minute hand after the previous transition
    minute_last_angle: f32,
    hour_value: i32,
    minute_value: i32,
    /// Which half of the day the hour hand is in
    pm: bool,
    use_duration: bool,
    last_update: Option<TimeUpdate>,
}

impl TouchClock {
    /// Create a control showing `start` with a duration of `duration` minutes.
    ///
    /// The control ignores pointer input until [`TouchClock::resize`] supplies
    /// a valid geometry.
    pub fn new(start: TimeOfDay, duration: u32) -> Self {
        let mut clock = Self {
            hour: Hand::new(HandKind::Hour),
            minute: Hand::new(HandKind::Minute),
            stop: Hand::new(HandKind::Stop),
            geometry: None,
            drag: DragState::Idle,
            hour_last_angle: 0.0,
            minute_last_angle: 0.0,
            hour_value: 0,
            minute_value: 0,
            pm: false,
            use_duration: true,
            last_update: None,
        };
        clock.set_time(start.hour as i32, start.minute as i32);
        clock.set_duration(duration as i32);
        clock
    }

    /// Rebuild a control from a persisted snapshot
    pub fn from_snapshot(snapshot: TimeUpdate) -> Self {
        Self::new(snapshot.start(), snapshot.duration)
    }

    // ----- inbound: host -----

    /// Set the start time, keeping the current duration.
    ///
    /// Any hour/minute pair is accepted and wrapped around the day. An active
    /// drag is abandoned.
    pub fn set_time(&mut self, hour: i32, minute: i32) -> TouchResult {
        let sweep = self.duration_sweep();
        let time = TimeOfDay::new(hour, minute);

        self.hour_value = time.hour as i32;
        self.minute_value = time.minute as i32;
        self.drag = DragState::Idle;
        self.snap_hands(sweep);

        self.commit(true)
    }

    /// Set the duration in minutes.
    ///
    /// Durations wrap every 720 minutes (one turn of the 12-hour dial). An
    /// active drag is abandoned.
    pub fn set_duration(&mut self, minutes: i32) -> TouchResult {
        self.drag = DragState::Idle;
        self.snap_hands(duration_angle(minutes));

        self.commit(true)
    }

    /// Restore a persisted snapshot
    pub fn restore(&mut self, snapshot: TimeUpdate) -> TouchResult {
        let time = self.set_time(snapshot.hour as i32, snapshot.minute as i32);
        time.merge(self.set_duration(snapshot.duration as i32))
    }

    /// Show or hide the stop hand. A hidden stop hand cannot be grabbed.
    pub fn set_use_duration(&mut self, use_duration: bool) -> TouchResult {
        let mut result = TouchResult::default();
        if !use_duration && self.drag == DragState::DraggingStop {
            result = self.release();
        }
        self.use_duration = use_duration;
        result.merge(TouchResult {
            redraw: true,
            time_update: None,
        })
    }

    // ----- inbound: rendering layer -----

    /// Supply the dial layout used for hit testing and angle math.
    ///
    /// An unusable layout (zero size, not laid out yet) disables pointer
    /// input and releases any captured hand.
    pub fn resize(&mut self, geometry: ClockGeometry) -> TouchResult {
        if !geometry.is_valid() {
            warn!(?geometry, "ignoring pointer input until the dial has a valid size");
            let released = self.release();
            self.geometry = None;
            return released;
        }

        for hand in [&mut self.hour, &mut self.minute, &mut self.stop] {
            hand.apply_geometry(&geometry);
        }
        self.geometry = Some(geometry);

        TouchResult {
            redraw: true,
            time_update: None,
        }
    }

    /// Capture the hand under `point`, if any.
    ///
    /// Overlapping targets resolve in [`HandKind::PRIORITY`] order.
    pub fn pointer_down(&mut self, point: Point) -> TouchResult {
        // A down without a matching up means we missed the release
        let released = self.release();

        let Some(geometry) = self.geometry else {
            return released;
        };
        if !point.is_finite() {
            return released;
        }

        let captured = HandKind::PRIORITY
            .into_iter()
            .filter(|kind| *kind != HandKind::Stop || self.use_duration)
            .find(|kind| {
                self.hand(*kind)
                    .hit(geometry.center, point, geometry.touch_radius)
            });

        match captured {
            Some(kind) => {
                debug!(hand = %kind, x = point.x, y = point.y, "captured hand");
                self.drag = DragState::capturing(kind);
                released.merge(TouchResult {
                    redraw: true,
                    time_update: None,
                })
            }
            None => released,
        }
    }

    /// Move the captured hand towards `point`
    pub fn pointer_move(&mut self, point: Point) -> TouchResult {
        let Some(kind) = self.drag.hand() else {
            return TouchResult::default();
        };
        let Some(geometry) = self.geometry else {
            return TouchResult::default();
        };
        if !point.is_finite() {
            return TouchResult::default();
        }

        let angle = normalize(point.angle_from(geometry.center));
        let sweep = self.duration_sweep();

        match kind {
            HandKind::Hour => self.drag_hour(angle, sweep),
            HandKind::Minute => self.drag_minute(angle, sweep),
            HandKind::Stop => self.drag_stop(angle),
        }

        self.commit(false)
    }

    /// Release the captured hand
    pub fn pointer_up(&mut self, _point: Point) -> TouchResult {
        self.release()
    }

    /// Release the captured hand without a pointer position
    pub fn cancel_drag(&mut self) -> TouchResult {
        self.release()
    }

    // ----- outbound: readers -----

    /// Hour in 24-hour format (0-23)
    pub fn hour(&self) -> u32 {
        self.hour_value as u32
    }

    /// Minute (0-59)
    pub fn minute(&self) -> u32 {
        self.minute_value as u32
    }

    /// Clockwise minutes from the hour hand to the stop hand (0-719)
    pub fn duration(&self) -> u32 {
        duration_from_angles(self.hour.angle, self.stop.angle)
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::new(self.hour_value, self.minute_value)
    }

    /// Time of day at the stop hand
    pub fn end_time(&self) -> TimeOfDay {
        self.time_of_day().plus_minutes(self.duration())
    }

    pub fn meridiem(&self) -> Meridiem {
        Meridiem::of_hour(self.hour())
    }

    /// Which half of the day the hour hand is currently in.
    ///
    /// Matches [`TouchClock::meridiem`] except transiently while the hour
    /// hand is dragged through the half hour before 12.
    pub fn is_pm(&self) -> bool {
        self.pm
    }

    pub fn snapshot(&self) -> TimeUpdate {
        TimeUpdate {
            hour: self.hour(),
            minute: self.minute(),
            duration: self.duration(),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn hand(&self, kind: HandKind) -> &Hand {
        match kind {
            HandKind::Hour => &self.hour,
            HandKind::Minute => &self.minute,
            HandKind::Stop => &self.stop,
        }
    }

    /// All hands in drawing order
    pub fn hands(&self) -> [&Hand; 3] {
        [&self.hour, &self.minute, &self.stop]
    }

    pub fn geometry(&self) -> Option<&ClockGeometry> {
        self.geometry.as_ref()
    }

    pub fn use_duration(&self) -> bool {
        self.use_duration
    }

    /// Clockwise sweep from the hour hand to the stop hand, in radians
    pub fn duration_sweep(&self) -> f32 {
        angular_separation(self.hour.angle, self.stop.angle)
    }

    // ----- transitions -----

    fn drag_hour(&mut self, angle: f32, sweep: f32) {
        self.hour.angle = angle;
        self.stop.angle = normalize(angle + sweep);

        let face = clock_angle(angle);
        if let Some(crossing) = twelve_crossing(self.hour_last_angle, face) {
            self.pm = !self.pm;
            debug!(?crossing, pm = self.pm, "hour hand passed 12");
        }
        self.hour_last_angle = face;

        self.hour_value = hour_from_face(face, self.pm);
    }

    fn drag_minute(&mut self, angle: f32, sweep: f32) {
        self.minute.angle = angle;

        let face = clock_angle(angle);
        match twelve_crossing(self.minute_last_angle, face) {
            Some(Crossing::Forward) => self.set_hour_value(self.hour_value + 1),
            Some(Crossing::Backward) => self.set_hour_value(self.hour_value - 1),
            None => {}
        }
        self.minute_last_angle = face;

        self.minute_value = minute_from_face(face);
        self.hour.angle = hour_angle(self.hour_value, self.minute_value);
        self.stop.angle = normalize(self.hour.angle + sweep);
    }

    fn drag_stop(&mut self, angle: f32) {
        let step = DURATION_STEP_MINUTES as f32 * RAD_PER_DURATION_MINUTE;
        let sweep = quantize(angular_separation(self.hour.angle, angle), step);
        self.stop.angle = normalize(self.hour.angle + sweep);
    }

    fn set_hour_value(&mut self, hour: i32) {
        self.hour_value = wrap_hour(hour);
        self.pm = self.hour_value > 11;
        debug!(hour = self.hour_value, "minute hand passed 12");
    }

    fn release(&mut self) -> TouchResult {
        let Some(kind) = self.drag.hand() else {
            return TouchResult::default();
        };

        if kind != HandKind::Stop {
            self.snap_hands(self.duration_sweep());
        }
        self.drag = DragState::Idle;
        debug!(hand = %kind, hour = self.hour_value, minute = self.minute_value, "released hand");

        self.commit(false)
    }

    /// Put the hour and minute hands exactly where the committed values say,
    /// keep the stop hand `sweep` ahead of the hour hand, and re-seed the
    /// 12 o'clock crossing detection from the new positions.
    fn snap_hands(&mut self, sweep: f32) {
        self.hour.angle = hour_angle(self.hour_value, self.minute_value);
        self.minute.angle = minute_angle(self.minute_value);
        self.stop.angle = normalize(self.hour.angle + sweep);

        self.hour_last_angle = clock_angle(self.hour.angle);
        self.minute_last_angle = clock_angle(self.minute.angle);
        self.pm = self.hour_value > 11;
    }

    fn commit(&mut self, always_notify: bool) -> TouchResult {
        let update = self.snapshot();
        let changed = self.last_update != Some(update);
        if changed {
            trace!(?update, "committed");
            self.last_update = Some(update);
        }

        TouchResult {
            redraw: true,
            time_update: (changed || always_notify).then_some(update),
        }
    }
}

impl Default for TouchClock {
    fn default() -> Self {
        Self::new(TimeOfDay::new(0, 0), DEFAULT_DURATION)
    }
}
