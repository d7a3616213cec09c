use std::f32::consts::TAU;

use glam::Vec3;

use crate::types::{SunOrbit, TimeOfDayPreset};

pub const VERTICAL_ORBIT_RADIUS: f32 = 15.0;
pub const VERTICAL_MS_PER_CYCLE: u64 = 30_000;
pub const HORIZONTAL_ORBIT_RADIUS: f32 = 5.0;
pub const HORIZONTAL_ORBIT_HEIGHT: f32 = 3.0;
pub const HORIZONTAL_MS_PER_CYCLE: u64 = 10_000;

pub fn wrap_time_of_day(time_of_day: f32) -> f32 {
    let wrapped = time_of_day.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

pub fn orbit_angle(time_of_day: f32) -> f32 {
    wrap_time_of_day(time_of_day) * TAU
}

pub fn light_position(time_of_day: f32, orbit: &SunOrbit) -> Vec3 {
    let angle = orbit_angle(time_of_day);
    let (sin, cos) = angle.sin_cos();
    match *orbit {
        SunOrbit::VerticalPlane { radius } => Vec3::new(cos * radius, sin * radius, 0.0),
        SunOrbit::HorizontalCircle { radius, height } => {
            Vec3::new(cos * radius, height, sin * radius)
        }
    }
}

pub fn time_of_day_from_elapsed(elapsed_ms: u64, ms_per_cycle: u64) -> f32 {
    if ms_per_cycle == 0 {
        return 0.0;
    }
    (elapsed_ms % ms_per_cycle) as f32 / ms_per_cycle as f32
}

/// Time-of-day state: either following the wall clock around the cycle or
/// held at a fixed value until resumed.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCycle {
    time_of_day: f32,
    auto_rotate: bool,
    ms_per_cycle: u64,
}

impl DayCycle {
    pub fn new(ms_per_cycle: u64) -> Self {
        Self {
            time_of_day: 0.0,
            auto_rotate: true,
            ms_per_cycle,
        }
    }

    pub fn update(&mut self, elapsed_ms: u64) -> f32 {
        if self.auto_rotate {
            self.time_of_day = time_of_day_from_elapsed(elapsed_ms, self.ms_per_cycle);
        }
        self.time_of_day
    }

    pub fn hold(&mut self, time_of_day: f32) {
        self.time_of_day = wrap_time_of_day(time_of_day);
        self.auto_rotate = false;
    }

    pub fn hold_preset(&mut self, preset: TimeOfDayPreset) {
        self.hold(preset.time_of_day());
    }

    pub fn resume(&mut self) {
        self.auto_rotate = true;
    }

    #[inline]
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    #[inline]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    #[inline]
    pub fn ms_per_cycle(&self) -> u64 {
        self.ms_per_cycle
    }
}
