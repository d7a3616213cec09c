//! Frame-by-frame driver owning the panels, the day cycle and the recorder.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::geometry;
use crate::layout;
use crate::orbit::{self, DayCycle};
use crate::recorder::{FileSink, LogSink, PanelLogRecorder};
use crate::types::{Frame, Panel, PanelLogEntry, PanelState, TimeOfDayPreset};

pub struct SolarFarm<S> {
    config: SimulationConfig,
    panels: Vec<Panel>,
    cycle: DayCycle,
    recorder: PanelLogRecorder<S>,
}

impl SolarFarm<FileSink> {
    /// Session persisting samples to `config.log_path`.
    pub fn with_file_sink(config: SimulationConfig) -> Result<Self> {
        let sink = FileSink::new(&config.log_path);
        Self::new(config, sink)
    }
}

impl<S: LogSink> SolarFarm<S> {
    pub fn new(config: SimulationConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let panels = layout::panel_grid(&config.grid);
        let recorder = PanelLogRecorder::new(sink)
            .with_interval(config.sample_interval_secs)
            .with_policy(config.flush_policy);
        log::info!(
            "solar farm ready: {} panels, orbit {:?}, {} ms per cycle",
            panels.len(),
            config.orbit,
            config.ms_per_cycle
        );
        Ok(Self {
            cycle: DayCycle::new(config.ms_per_cycle),
            config,
            panels,
            recorder,
        })
    }

    /// Advance to `elapsed_ms` since start and evaluate every panel.
    pub fn advance(&mut self, elapsed_ms: u64) -> Frame {
        let time_of_day = self.cycle.update(elapsed_ms);
        let light_position = orbit::light_position(time_of_day, &self.config.orbit);

        let panels = self
            .panels
            .iter()
            .map(|panel| PanelState {
                id: panel.id,
                position: panel.position,
                tilt_degrees: geometry::panel_tilt_with_cap(
                    panel.position,
                    light_position,
                    self.config.max_tilt_degrees,
                ),
                sunlight_strength: geometry::sunlight_strength(panel.position, light_position),
            })
            .collect();

        let elapsed_secs = elapsed_ms as f32 / 1000.0;
        let sample = self.recorder.poll(elapsed_secs, &self.panels, light_position);

        Frame {
            time_of_day,
            light_position,
            brightness: geometry::scene_brightness(light_position),
            panels,
            sample,
        }
    }

    pub fn hold_time_of_day(&mut self, time_of_day: f32) {
        self.cycle.hold(time_of_day);
    }

    pub fn hold_preset(&mut self, preset: TimeOfDayPreset) {
        self.cycle.hold_preset(preset);
    }

    pub fn resume_auto_rotate(&mut self) {
        self.cycle.resume();
    }

    pub fn time_of_day(&self) -> f32 {
        self.cycle.time_of_day()
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.cycle.is_auto_rotating()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn history(&self) -> &[PanelLogEntry] {
        self.recorder.history()
    }

    /// Overlay text lines using the configured limit and order.
    pub fn overlay(&self) -> Vec<String> {
        self.recorder
            .overlay(self.config.overlay_limit, self.config.overlay_order)
    }

    pub fn recorder(&self) -> &PanelLogRecorder<S> {
        &self.recorder
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
