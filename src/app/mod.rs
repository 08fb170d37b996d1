//! Terminal front end: the frame loop around a [`Universe`].
//!
//! Each frame drains pending input within the frame budget, advances the
//! universe, rasterizes the scene and writes only the cells that changed
//! since the previous frame.

mod fps;
mod input;
mod panel;
mod state;
mod ui;

pub use fps::FpsCounter;
pub use panel::Panel;
pub use state::Session;
pub use ui::{Layout, RIGHT_PANEL_WIDTH};

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::{cursor, event, execute, queue, style, terminal};
use log::info;

use crate::config::KeyBindings;
use crate::menubar::{menu_items, render_menubar};
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::types::{Cell, Color, Grid, NamedColor, Style};
use crate::universe::Universe;
use input::Action;

/// About 30 frames per second.
const FRAME_BUDGET: Duration = Duration::from_millis(33);
/// Smallest canvas the scene still makes sense on.
const MIN_CANVAS: (u16, u16) = (40, 12);

pub struct App {
    session: Session,
    scene: Scene,
    grid: Option<Grid>,
    fps: FpsCounter,
    fullscreen: bool,
}

impl App {
    pub fn new(universe: Universe, bindings: KeyBindings) -> Self {
        App {
            session: Session::new(universe, bindings),
            scene: Scene::new(),
            grid: None,
            fps: FpsCounter::default(),
            fullscreen: false,
        }
    }

    /// Run the session in the terminal.
    ///
    /// Sets up the terminal, enters the frame loop, and restores the terminal
    /// on exit (even on error).
    pub fn run(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let layout = Layout::compute(term_w, term_h);
        if layout.canvas_width < MIN_CANVAS.0 || layout.canvas_height < MIN_CANVAS.1 {
            bail!(
                "Terminal too small: need a {}x{} canvas, have {}x{}",
                MIN_CANVAS.0,
                MIN_CANVAS.1,
                layout.canvas_width,
                layout.canvas_height,
            );
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.main_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Frame loop
    // -----------------------------------------------------------------------

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let mut last = Instant::now();
        loop {
            let (term_w, term_h) = terminal::size()?;
            let layout = Layout::compute(term_w, term_h);
            self.session.universe.set_viewport(layout.viewport());

            let deadline = last + FRAME_BUDGET;
            loop {
                let timeout = deadline.saturating_duration_since(Instant::now());
                if !event::poll(timeout)? {
                    break;
                }
                match input::handle_event(&mut self.session, event::read()?, &layout) {
                    Action::Continue => {}
                    Action::Redraw => self.invalidate(stdout)?,
                    Action::ToggleFullscreen => {
                        self.fullscreen = !self.fullscreen;
                        if self.fullscreen {
                            stdout.write_all(b"\x1b[10;1t")?;
                        } else {
                            stdout.write_all(b"\x1b[10;0t")?;
                        }
                        stdout.flush()?;
                        self.invalidate(stdout)?;
                    }
                    Action::Quit => {
                        info!("quit");
                        return Ok(());
                    }
                }
            }

            let now = Instant::now();
            let dt = now - last;
            last = now;
            self.fps.tick(dt);

            // A resize in this frame is picked up at the top of the next one.
            let viewport = self.session.universe.camera().viewport();
            self.session.universe.frame(dt, &mut self.scene);
            let ops = self.scene.rasterize(self.session.universe.camera());
            let grid = Renderer::rasterize(&ops, viewport);
            self.render_canvas(stdout, &layout, grid)?;
            self.render_chrome(stdout, &layout)?;
            stdout.flush()?;
        }
    }

    /// Forget the previous frame so the next one is drawn in full.
    fn invalidate(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.grid = None;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_canvas(&mut self, stdout: &mut io::Stdout, layout: &Layout, grid: Grid) -> Result<()> {
        let same_size = self.grid.as_ref().is_some_and(|prev| {
            prev.len() == grid.len() && prev.first().map(Vec::len) == grid.first().map(Vec::len)
        });
        match &self.grid {
            Some(prev) if same_size => {
                for change in Renderer::diff(prev, &grid) {
                    put_cell(stdout, layout, change.x, change.y, &change.cell)?;
                }
            }
            _ => {
                for (y, row) in grid.iter().enumerate() {
                    queue!(stdout, cursor::MoveTo(layout.canvas_x, y as u16 + layout.canvas_y))?;
                    for cell in row {
                        let cs = to_content_style(&cell.style);
                        queue!(
                            stdout,
                            style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                        )?;
                    }
                }
            }
        }
        self.grid = Some(grid);
        Ok(())
    }

    fn render_chrome(&self, stdout: &mut io::Stdout, layout: &Layout) -> Result<()> {
        let inside = self.session.inside();
        let items = menu_items(&self.session.bindings, inside);
        render_menubar(stdout, self.fps.fps(), &items)?;
        panel::render_right_panel(stdout, layout, &self.session.panel, &self.session.universe)?;

        let help = self.session.universe.help_text().unwrap_or_default();
        let mut lines = help.lines();
        for row in 0..2 {
            queue!(
                stdout,
                cursor::MoveTo(0, layout.help_y + row),
                terminal::Clear(terminal::ClearType::CurrentLine),
            )?;
            if let Some(line) = lines.next() {
                let mut cs = style::ContentStyle::default();
                cs.attributes.set(style::Attribute::Dim);
                queue!(
                    stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, format!(" {line}"))),
                )?;
            }
        }
        Ok(())
    }
}

fn put_cell(stdout: &mut io::Stdout, layout: &Layout, x: u16, y: u16, cell: &Cell) -> Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(
        stdout,
        cursor::MoveTo(x + layout.canvas_x, y + layout.canvas_y),
        style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_convert_to_crossterm() {
        let cs = to_content_style(&Style {
            fg: Some(Color::Rgb { r: 255, g: 215, b: 0 }),
            bg: Some(Color::Named(NamedColor::Blue)),
            bold: true,
            dim: false,
        });
        assert_eq!(
            cs.foreground_color,
            Some(style::Color::Rgb { r: 255, g: 215, b: 0 })
        );
        assert_eq!(cs.background_color, Some(style::Color::Blue));
        assert!(cs.attributes.has(style::Attribute::Bold));
        assert!(!cs.attributes.has(style::Attribute::Dim));
    }
}
