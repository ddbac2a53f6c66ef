//! UI module - egui readout bar and controls panel

use nannou_egui::egui;
use touchclock::{format_span, TimeUpdate, TimeUpdateListener};

/// The host-side view of the committed time
pub struct Readout {
    /// Last committed state
    pub update: TimeUpdate,
    /// "HH:MM - HH:MM"
    pub span: String,
}

impl Readout {
    pub fn new(update: TimeUpdate) -> Self {
        Self {
            span: format_span(update.start(), update.duration),
            update,
        }
    }
}

impl TimeUpdateListener for Readout {
    fn on_time_update(&mut self, update: TimeUpdate) {
        if update == self.update {
            return;
        }
        self.span = format_span(update.start(), update.duration);
        self.update = update;
        tracing::debug!(
            hour = update.hour,
            minute = update.minute,
            duration = update.duration,
            "time updated"
        );
    }
}

/// Result of UI interactions
#[derive(Default)]
pub struct UiResult {
    /// If true, the "use duration" checkbox changed
    pub toggle_duration: bool,
    /// If true, reseed the start time from the wall clock
    pub set_now: bool,
    /// If true, reset the duration to its default
    pub reset_duration: bool,
}

/// Format a duration as "2h 05m"
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Draw the readout bar (top)
pub fn draw_readout_bar(ctx: &egui::Context, readout: &Readout, use_duration: bool) {
    egui::TopBottomPanel::top("readout_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let start = readout.update.start();
                if use_duration {
                    ui.heading(readout.span.as_str());
                    ui.label(format!(
                        "{} · {}",
                        start.meridiem(),
                        format_duration(readout.update.duration)
                    ));
                } else {
                    ui.heading(start.to_string());
                    ui.label(start.meridiem().to_string());
                }
            });
        });
}

/// Draw the controls panel (bottom)
pub fn draw_controls(ctx: &egui::Context, use_duration: &mut bool) -> UiResult {
    let mut result = UiResult::default();

    egui::TopBottomPanel::bottom("controls_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.checkbox(use_duration, "Use duration").changed() {
                    result.toggle_duration = true;
                }
                ui.separator();
                if ui
                    .button("Now")
                    .on_hover_text("Set the start time to the current time (N)")
                    .clicked()
                {
                    result.set_now = true;
                }
                if ui.button("Reset duration").clicked() {
                    result.reset_duration = true;
                }
                ui.separator();
                ui.label("Drag the hands · D toggles duration · Esc cancels a drag");
            });
        });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0h 00m");
        assert_eq!(format_duration(125), "2h 05m");
        assert_eq!(format_duration(719), "11h 59m");
    }

    #[test]
    fn test_readout_follows_updates() {
        let mut readout = Readout::new(TimeUpdate {
            hour: 2,
            minute: 50,
            duration: 120,
        });
        assert_eq!(readout.span, "02:50 - 04:50");

        readout.on_time_update(TimeUpdate {
            hour: 23,
            minute: 30,
            duration: 45,
        });
        assert_eq!(readout.span, "23:30 - 00:15");
    }
}
