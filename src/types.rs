use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum SunOrbit {
    /// Sun travels the X/Y plane, rising and setting.
    VerticalPlane { radius: f32 },
    /// Sun circles overhead at a constant height and never sets.
    HorizontalCircle { radius: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDayPreset {
    Sunrise,
    Noon,
    Sunset,
}

impl TimeOfDayPreset {
    pub fn time_of_day(self) -> f32 {
        match self {
            TimeOfDayPreset::Sunrise => 0.0,
            TimeOfDayPreset::Noon => 0.25,
            TimeOfDayPreset::Sunset => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Persist only entries appended since the last successful flush.
    #[default]
    Incremental,
    /// Re-append the whole history on every flush.
    FullHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub rows: u32,
    pub columns: u32,
    pub spacing: f32,
    pub height: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            spacing: 2.0,
            height: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub id: u32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLogEntry {
    pub panel_id: u32,
    pub position: Vec3,
    pub timestamp: f32,
    pub sunlight_strength: f32,
}

impl PanelLogEntry {
    /// Fixed two-decimal rendering used by the on-screen overlay.
    pub fn overlay_line(&self) -> String {
        format!(
            "Panel ID: {}, Time: {:.2}s, Pos:({:.2}, {:.2}, {:.2}), Sunlight: {:.2}",
            self.panel_id,
            self.timestamp,
            self.position.x,
            self.position.y,
            self.position.z,
            self.sunlight_strength
        )
    }
}

impl fmt::Display for PanelLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Panel ID: {}, Time: {}s, Position: ({}, {}, {}), Sunlight Strength: {}",
            self.panel_id,
            self.timestamp,
            self.position.x,
            self.position.y,
            self.position.z,
            self.sunlight_strength
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    pub id: u32,
    pub position: Vec3,
    pub tilt_degrees: f32,
    pub sunlight_strength: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    Written { lines: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub timestamp: f32,
    pub recorded: usize,
    pub flush: FlushOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time_of_day: f32,
    pub light_position: Vec3,
    pub brightness: f32,
    pub panels: Vec<PanelState>,
    pub sample: Option<SampleReport>,
}
