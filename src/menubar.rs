use std::io;

use crossterm::{cursor, queue, style, terminal};

use crate::config::KeyBindings;

/// Key hints for the menu bar, `[key] action` each.
pub fn menu_items(bindings: &KeyBindings, inside: bool) -> Vec<String> {
    let mut items = Vec::new();
    if inside {
        items.push(format!("[{}][{}] rotate", bindings.rotate_left, bindings.rotate_right));
        items.push(format!("[{}] exit box", bindings.exit_box));
        items.push("[click] trailer".to_string());
    } else {
        items.push("[click] enter box".to_string());
    }
    items.push(format!("[{}][{}] panel", bindings.panel_up, bindings.panel_down));
    items.push(format!("[{}][{}] adjust", bindings.decrease, bindings.increase));
    items.push(format!("[{}] help", bindings.toggle_help));
    items.push(format!("[{}] full", bindings.fullscreen));
    items.push(format!("[{}] quit", bindings.quit));
    items
}

/// Draw the FPS counter and the key hints on the top row.
pub fn render_menubar(stdout: &mut io::Stdout, fps: u32, items: &[String]) -> anyhow::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::SetAttribute(style::Attribute::Bold),
        style::Print(format!(" {fps:>3} fps ")),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    for item in items {
        queue!(stdout, style::Print("  "))?;
        print_menu_item(stdout, item)?;
    }
    Ok(())
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        if let Some(open) = rest.find('[') {
            if open > 0 {
                queue!(
                    stdout,
                    style::SetAttribute(style::Attribute::Dim),
                    style::Print(&rest[..open]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
            }
            rest = &rest[open..];
            if let Some(close) = rest.find(']') {
                queue!(
                    stdout,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            } else {
                queue!(stdout, style::Print(rest))?;
                break;
            }
        } else {
            queue!(
                stdout,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        }
    }
    Ok(())
}
