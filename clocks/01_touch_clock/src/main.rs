//! Touch Clock
//!
//! Set a start time and a duration by dragging the hour, minute and stop
//! hands around an analog face. The committed time is shown as
//! "HH:MM - HH:MM" and restored on the next launch.

mod drawing;
mod ui;

use chrono_tz::Tz;
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use touchclock::{TimeUpdate, TouchClock, TouchResult, DEFAULT_DURATION};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::drawing::{accepts_press, colors, dial_geometry, dial_rect, draw_clock, to_control};
use crate::ui::{draw_controls, draw_readout_bar, Readout};

const CLOCK_NAME: &str = "touch_clock";
const DEFAULT_LOG_FILTER: &str = "info,touch_clock=debug,touchclock=info";

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Touch Clock v{}", env!("CARGO_PKG_VERSION"));
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    use_duration: bool,
    /// IANA zone used to seed the start time when nothing was saved
    timezone: Option<String>,
    /// Committed time from the previous session
    saved: Option<TimeUpdate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_duration: true,
            timezone: None,
            saved: None,
        }
    }
}

/// Application state
struct Model {
    /// The clock control
    clock: TouchClock,
    /// Host-side readout of the committed time
    readout: Readout,
    /// Zone for "Now", if configured
    timezone: Option<Tz>,
    /// Window area the dial is laid out in
    dial_rect: Rect,
    /// egui integration
    egui: Egui,
}

impl Model {
    /// Apply the effects of one clock operation. Returns whether the clock
    /// asked for a redraw.
    fn apply(&mut self, result: TouchResult) -> bool {
        result.dispatch(&mut self.readout)
    }

    fn set_now(&mut self) {
        let now = touchclock::now(self.timezone);
        let result = self.clock.set_time(now.hour as i32, now.minute as i32);
        self.apply(result);
        save_config(self);
    }

    fn toggle_duration(&mut self) {
        let use_duration = !self.clock.use_duration();
        let result = self.clock.set_use_duration(use_duration);
        self.apply(result);
        save_config(self);
    }

    /// Lay the dial out again if the window changed size
    fn relayout(&mut self, window_rect: Rect) {
        let rect = dial_rect(window_rect);
        if rect == self.dial_rect && self.clock.geometry().is_some() {
            return;
        }
        self.dial_rect = rect;
        let result = self.clock.resize(dial_geometry(rect));
        self.apply(result);
    }
}

fn save_config(model: &Model) {
    let config = Config {
        use_duration: model.clock.use_duration(),
        timezone: model.timezone.map(|tz| tz.name().to_string()),
        saved: Some(model.clock.snapshot()),
    };
    if let Err(e) = touchclock::save_config(CLOCK_NAME, &config) {
        warn!("Failed to save config: {}", e);
    }
}

fn load_config() -> Config {
    match touchclock::load_config(CLOCK_NAME) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Touch Clock")
        .size(480, 600)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_released(mouse_released)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config = load_config();

    let timezone = config.timezone.as_deref().and_then(|name| {
        touchclock::parse_timezone(name)
            .map_err(|e| warn!("{}", e))
            .ok()
    });

    let mut clock = match config.saved {
        Some(snapshot) => {
            info!(?snapshot, "restoring saved time");
            TouchClock::from_snapshot(snapshot)
        }
        None => TouchClock::new(touchclock::now(timezone), DEFAULT_DURATION),
    };
    clock.set_use_duration(config.use_duration);

    let readout = Readout::new(clock.snapshot());
    let dial_rect = dial_rect(app.window_rect());

    let mut model = Model {
        clock,
        readout,
        timezone,
        dial_rect,
        egui,
    };
    model.relayout(app.window_rect());
    model
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.relayout(app.window_rect());

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let mut use_duration = model.clock.use_duration();
    draw_readout_bar(&ctx, &model.readout, use_duration);
    let ui_result = draw_controls(&ctx, &mut use_duration);

    // Apply UI results after the egui frame is done
    drop(ctx);

    if ui_result.toggle_duration {
        model.toggle_duration();
    }
    if ui_result.set_now {
        model.set_now();
    }
    if ui_result.reset_duration {
        let result = model.clock.set_duration(DEFAULT_DURATION as i32);
        model.apply(result);
        save_config(model);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    // Clear background
    draw.background().color(colors::BACKGROUND);

    draw_clock(&draw, model.dial_rect, &model.clock);

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let pos = app.mouse.position();
    let over_panel = model.egui.ctx().wants_pointer_input();
    if !accepts_press(model.dial_rect, pos, over_panel) {
        return;
    }
    let point = to_control(model.dial_rect, pos);
    let result = model.clock.pointer_down(point);
    model.apply(result);
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let point = to_control(model.dial_rect, pos);
    let result = model.clock.pointer_move(point);
    model.apply(result);
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let point = to_control(model.dial_rect, app.mouse.position());
    let result = model.clock.pointer_up(point);
    // Only a captured hand asks for a redraw on release
    if model.apply(result) {
        save_config(model);
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Escape drops the captured hand
        Key::Escape => {
            let result = model.clock.cancel_drag();
            if model.apply(result) {
                save_config(model);
            }
        }
        // D toggles the stop hand
        Key::D => model.toggle_duration(),
        // N sets the start time to now
        Key::N => model.set_now(),
        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}
