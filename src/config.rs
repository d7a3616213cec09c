//! Simulation tunables, loadable from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::MAX_TILT_DEGREES;
use crate::layout::{self, MAX_GRID_PANELS};
use crate::orbit::{
    HORIZONTAL_MS_PER_CYCLE, HORIZONTAL_ORBIT_HEIGHT, HORIZONTAL_ORBIT_RADIUS,
    VERTICAL_MS_PER_CYCLE, VERTICAL_ORBIT_RADIUS,
};
use crate::recorder::{DEFAULT_LOG_PATH, OVERLAY_LIMIT, SAMPLE_INTERVAL_SECS};
use crate::types::{FlushPolicy, GridLayout, OverlayOrder, SunOrbit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub orbit: SunOrbit,
    /// Real milliseconds for one full sun orbit.
    pub ms_per_cycle: u64,
    pub sample_interval_secs: f32,
    pub max_tilt_degrees: f32,
    pub grid: GridLayout,
    pub log_path: PathBuf,
    pub overlay_limit: usize,
    pub overlay_order: OverlayOrder,
    pub flush_policy: FlushPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::vertical_plane()
    }
}

impl SimulationConfig {
    /// Sun rises and sets in the X/Y plane over 30 seconds.
    pub fn vertical_plane() -> Self {
        Self {
            orbit: SunOrbit::VerticalPlane {
                radius: VERTICAL_ORBIT_RADIUS,
            },
            ms_per_cycle: VERTICAL_MS_PER_CYCLE,
            sample_interval_secs: SAMPLE_INTERVAL_SECS,
            max_tilt_degrees: MAX_TILT_DEGREES,
            grid: GridLayout::default(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            overlay_limit: OVERLAY_LIMIT,
            overlay_order: OverlayOrder::default(),
            flush_policy: FlushPolicy::default(),
        }
    }

    /// Sun circles overhead at a fixed height, one lap every 10 seconds.
    pub fn horizontal_circle() -> Self {
        Self {
            orbit: SunOrbit::HorizontalCircle {
                radius: HORIZONTAL_ORBIT_RADIUS,
                height: HORIZONTAL_ORBIT_HEIGHT,
            },
            ms_per_cycle: HORIZONTAL_MS_PER_CYCLE,
            ..Self::vertical_plane()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded simulation config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ms_per_cycle == 0 {
            return Err(Error::InvalidConfig("ms_per_cycle must be non-zero".into()));
        }
        if !self.sample_interval_secs.is_finite() || self.sample_interval_secs <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sample_interval_secs must be positive, got {}",
                self.sample_interval_secs
            )));
        }
        if !self.max_tilt_degrees.is_finite() || self.max_tilt_degrees < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_tilt_degrees must be a non-negative angle, got {}",
                self.max_tilt_degrees
            )));
        }
        if self.grid.rows == 0 || self.grid.columns == 0 {
            return Err(Error::InvalidConfig("panel grid is empty".into()));
        }
        if layout::panel_count(&self.grid).is_none() {
            return Err(Error::InvalidConfig(format!(
                "panel grid {}x{} exceeds {} panels",
                self.grid.rows, self.grid.columns, MAX_GRID_PANELS
            )));
        }
        let span = self.grid.rows.max(self.grid.columns).saturating_sub(1) as f32;
        if !self.grid.spacing.is_finite()
            || !self.grid.height.is_finite()
            || !(span * self.grid.spacing).is_finite()
        {
            return Err(Error::InvalidConfig(
                "panel grid spacing and height must be finite".into(),
            ));
        }
        let orbit_ok = match self.orbit {
            SunOrbit::VerticalPlane { radius } => radius.is_finite(),
            SunOrbit::HorizontalCircle { radius, height } => {
                radius.is_finite() && height.is_finite()
            }
        };
        if !orbit_ok {
            return Err(Error::InvalidConfig("orbit parameters must be finite".into()));
        }
        Ok(())
    }
}
