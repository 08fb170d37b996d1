use glam::Vec2;

use crate::types::Viewport;

/// Width (in columns) of the right-hand parameter panel.
pub const RIGHT_PANEL_WIDTH: u16 = 28;
/// Rows below the canvas for the help text.
const HELP_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub right_panel_width: u16,
    pub canvas_x: u16,
    pub canvas_y: u16,
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub help_y: u16,
    pub term_width: u16,
    pub menu_h: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16) -> Self {
        // The panel goes away on narrow terminals.
        let right = if term_width >= RIGHT_PANEL_WIDTH * 3 {
            RIGHT_PANEL_WIDTH
        } else {
            0
        };
        let menu_h: u16 = 1;
        Layout {
            right_panel_width: right,
            canvas_x: 0,
            canvas_y: menu_h,
            canvas_width: term_width.saturating_sub(right),
            canvas_height: term_height.saturating_sub(HELP_ROWS + menu_h),
            help_y: term_height.saturating_sub(HELP_ROWS),
            term_width,
            menu_h,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    /// Canvas point at the centre of a terminal cell, or `None` outside the
    /// canvas.
    pub fn to_canvas(&self, column: u16, row: u16) -> Option<Vec2> {
        let x = column.checked_sub(self.canvas_x)?;
        let y = row.checked_sub(self.canvas_y)?;
        if x >= self.canvas_width || y >= self.canvas_height {
            return None;
        }
        Some(Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_sits_between_menu_and_help() {
        let layout = Layout::compute(120, 40);
        assert_eq!(layout.canvas_y, 1);
        assert_eq!(layout.canvas_width, 92);
        assert_eq!(layout.canvas_height, 37);
        assert_eq!(layout.help_y, 38);

        let narrow = Layout::compute(60, 20);
        assert_eq!(narrow.right_panel_width, 0);
        assert_eq!(narrow.canvas_width, 60);
    }

    #[test]
    fn mouse_cells_map_to_canvas_points() {
        let layout = Layout::compute(120, 40);
        assert_eq!(layout.to_canvas(0, 0), None);
        assert_eq!(layout.to_canvas(10, 1), Some(Vec2::new(10.5, 0.5)));
        assert_eq!(layout.to_canvas(92, 5), None);
        assert_eq!(layout.to_canvas(5, 38), None);
    }
}
