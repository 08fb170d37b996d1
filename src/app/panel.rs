use std::io;

use crossterm::{cursor, queue, style};

use super::ui::Layout;
use crate::settings::{Settings, Tunable};
use crate::universe::Universe;

const MOVIE_BOX_GROUP: &str = "Movie box parameters";
const UNIVERSE_GROUP: &str = "Universe parameters";

/// Cursor over the tunables of the right-hand panel.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    cursor: usize,
}

impl Panel {
    pub fn title(inside: bool) -> &'static str {
        if inside { MOVIE_BOX_GROUP } else { UNIVERSE_GROUP }
    }

    /// Tunables listed in the panel. The universe group has none.
    pub fn rows(inside: bool) -> &'static [Tunable] {
        if inside { &Tunable::ALL[..] } else { &[] }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: i32, inside: bool) {
        let len = Self::rows(inside).len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as i64 + delta as i64;
        self.cursor = next.clamp(0, len as i64 - 1) as usize;
    }

    /// Step the tunable under the cursor. Returns it, or `None` when the
    /// group is empty.
    pub fn adjust(&mut self, settings: &mut Settings, steps: i32, inside: bool) -> Option<Tunable> {
        let rows = Self::rows(inside);
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));
        let tunable = *rows.get(self.cursor)?;
        tunable.adjust(settings, steps);
        Some(tunable)
    }
}

pub fn render_right_panel(
    stdout: &mut io::Stdout,
    layout: &Layout,
    panel: &Panel,
    universe: &Universe,
) -> anyhow::Result<()> {
    if layout.right_panel_width == 0 {
        return Ok(());
    }

    let panel_x = layout.canvas_x + layout.canvas_width;
    let pw = layout.right_panel_width;
    let cy = layout.canvas_y;
    let max_width = (pw - 3) as usize;
    let selected = universe.selected();
    let inside = selected.is_some();

    for y in 0..layout.canvas_height {
        queue!(
            stdout,
            cursor::MoveTo(panel_x, cy + y),
            style::Print("\u{2502}"),
            style::Print(" ".repeat((pw - 1) as usize)),
        )?;
    }
    let title: String = Panel::title(inside).chars().take(max_width).collect();
    queue!(
        stdout,
        cursor::MoveTo(panel_x + 2, cy),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(title),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    queue!(stdout, cursor::MoveTo(panel_x, cy + 1), style::Print("\u{253c}"))?;
    for _ in 1..pw {
        queue!(stdout, style::Print("\u{2500}"))?;
    }

    let mut y = cy + 2;
    if let Some(film) = selected.and_then(|i| universe.film(i)) {
        let name: String = film.display_name().chars().take(max_width).collect();
        queue!(
            stdout,
            cursor::MoveTo(panel_x + 2, y),
            style::SetAttribute(style::Attribute::Dim),
            style::Print(name),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        y += 2;
    }

    for (i, tunable) in Panel::rows(inside).iter().enumerate() {
        if y >= cy + layout.canvas_height {
            break;
        }
        let line = format!("{}: {}", tunable.label(), tunable.value(universe.settings()));
        let line: String = line.chars().take(max_width).collect();
        queue!(stdout, cursor::MoveTo(panel_x + 2, y))?;
        if i == panel.cursor() {
            queue!(
                stdout,
                style::SetAttribute(style::Attribute::Reverse),
                style::Print(format!("{:<width$}", line, width = max_width)),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        } else {
            queue!(stdout, style::Print(line))?;
        }
        y += 1;
    }
    Ok(())
}
