use glam::Vec3;

use crate::types::{GridLayout, Panel};

pub const MAX_GRID_PANELS: u32 = 10_000;

/// Number of slots in `layout`, or `None` when it overflows or exceeds
/// [`MAX_GRID_PANELS`].
pub fn panel_count(layout: &GridLayout) -> Option<u32> {
    layout
        .rows
        .checked_mul(layout.columns)
        .filter(|&count| count <= MAX_GRID_PANELS)
}

/// Lay panels out on a grid centered at the origin.
///
/// Slots are filled row by row (Z outer, X inner) and numbered from 1, so the
/// default 3x3 layout puts panel 1 at (-2, 0.5, -2) and panel 9 at (2, 0.5, 2).
/// A layout rejected by [`panel_count`] yields no panels.
pub fn panel_grid(layout: &GridLayout) -> Vec<Panel> {
    let Some(count) = panel_count(layout) else {
        return Vec::new();
    };
    let x_offset = (layout.columns.saturating_sub(1)) as f32 * layout.spacing / 2.0;
    let z_offset = (layout.rows.saturating_sub(1)) as f32 * layout.spacing / 2.0;

    let mut panels = Vec::with_capacity(count as usize);
    for row in 0..layout.rows {
        for col in 0..layout.columns {
            let id = row * layout.columns + col + 1;
            let position = Vec3::new(
                col as f32 * layout.spacing - x_offset,
                layout.height,
                row as f32 * layout.spacing - z_offset,
            );
            panels.push(Panel { id, position });
        }
    }
    panels
}

pub fn default_panel_grid() -> Vec<Panel> {
    panel_grid(&GridLayout::default())
}
