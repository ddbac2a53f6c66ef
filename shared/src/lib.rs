//! Touch clock core
//!
//! The angle model, dial geometry and drag state machine behind a clock
//! whose hour, minute and stop hands are set by dragging, plus the
//! configuration persistence shared by clock front-ends.

pub mod angle;
pub mod config;
pub mod control;
pub mod geometry;
pub mod hand;
pub mod time_engine;

pub use config::{
    config_dir, config_path, load_config, load_config_from, save_config,
    save_config_to, ConfigError,
};
pub use control::{
    DragState, TimeUpdate, TimeUpdateListener, TouchClock, TouchResult, DEFAULT_DURATION,
};
pub use geometry::{ClockGeometry, Point};
pub use hand::{Hand, HandKind};
pub use time_engine::{format_span, now, parse_timezone, Meridiem, TimeOfDay};
