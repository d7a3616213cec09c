use glam::{Vec2, Vec3};

/// Panels are modeled flat, facing straight up. Tilt is cosmetic and never
/// changes this normal.
pub const PANEL_NORMAL: Vec3 = Vec3::Y;
pub const MAX_TILT_DEGREES: f32 = 75.0;
pub const DAY_BRIGHTNESS: f32 = 1.0;
pub const NIGHT_BRIGHTNESS: f32 = 0.3;

/// Unit vector from the panel toward the light, or `None` when the two
/// coincide (or the offset is not finite).
pub fn direction_to_light(panel: Vec3, light: Vec3) -> Option<Vec3> {
    (light - panel).try_normalize()
}

pub fn sunlight_strength(panel: Vec3, light: Vec3) -> f32 {
    match direction_to_light(panel, light) {
        Some(dir) => PANEL_NORMAL.dot(dir).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// Angle in degrees between the panel normal and the direction to the light,
/// taken as `atan2(horizontal, vertical)` of the unit direction.
pub fn zenith_angle(panel: Vec3, light: Vec3) -> Option<f32> {
    let dir = direction_to_light(panel, light)?;
    let horizontal = Vec2::new(dir.x, dir.z).length();
    Some(horizontal.atan2(dir.y).to_degrees())
}

pub fn panel_tilt(panel: Vec3, light: Vec3) -> f32 {
    panel_tilt_with_cap(panel, light, MAX_TILT_DEGREES)
}

pub fn panel_tilt_with_cap(panel: Vec3, light: Vec3, max_tilt: f32) -> f32 {
    let Some(angle) = zenith_angle(panel, light) else {
        return 0.0;
    };
    let capped = angle.min(max_tilt);
    // sign follows the X offset only
    if light.x - panel.x > 0.0 {
        -capped
    } else {
        capped
    }
}

pub fn scene_brightness(light: Vec3) -> f32 {
    if light.y > 0.0 {
        DAY_BRIGHTNESS
    } else {
        NIGHT_BRIGHTNESS
    }
}
