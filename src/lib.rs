pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod orbit;
pub mod recorder;
pub mod session;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};

pub use config::SimulationConfig;

pub use error::{Error, Result};

pub use geometry::{
    direction_to_light, panel_tilt, panel_tilt_with_cap, scene_brightness, sunlight_strength,
    zenith_angle, DAY_BRIGHTNESS, MAX_TILT_DEGREES, NIGHT_BRIGHTNESS, PANEL_NORMAL,
};

pub use layout::{default_panel_grid, panel_count, panel_grid, MAX_GRID_PANELS};

pub use orbit::{
    light_position, orbit_angle, time_of_day_from_elapsed, wrap_time_of_day, DayCycle,
    HORIZONTAL_MS_PER_CYCLE, HORIZONTAL_ORBIT_HEIGHT, HORIZONTAL_ORBIT_RADIUS,
    VERTICAL_MS_PER_CYCLE, VERTICAL_ORBIT_RADIUS,
};

pub use recorder::{
    FileSink, LogSink, MemorySink, PanelLogRecorder, DEFAULT_LOG_PATH, OVERLAY_LIMIT,
    SAMPLE_INTERVAL_SECS,
};

pub use session::SolarFarm;

pub use types::{
    FlushOutcome, FlushPolicy, Frame, GridLayout, OverlayOrder, Panel, PanelLogEntry, PanelState,
    SampleReport, SunOrbit, TimeOfDayPreset,
};
