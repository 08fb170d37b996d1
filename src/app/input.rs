use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::debug;

use super::state::Session;
use super::ui::Layout;
use crate::config::matches_binding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Quit,
    ToggleFullscreen,
}

pub fn handle_event(state: &mut Session, event: Event, layout: &Layout) -> Action {
    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse, layout),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Continue,
    }
}

fn handle_key(state: &mut Session, key: KeyEvent) -> Action {
    // Terminals reporting both edges would fire every binding twice.
    if key.kind == KeyEventKind::Release {
        return Action::Continue;
    }
    let inside = state.inside();
    let bindings = &state.bindings;

    if matches_binding(&bindings.quit, &key) {
        return Action::Quit;
    }
    if matches_binding(&bindings.fullscreen, &key) {
        return Action::ToggleFullscreen;
    }
    if matches_binding(&bindings.toggle_help, &key) {
        let settings = state.universe.settings_mut();
        settings.set_show_help(!settings.show_help());
        return Action::Continue;
    }
    if matches_binding(&bindings.panel_up, &key) {
        state.panel.move_cursor(-1, inside);
        return Action::Continue;
    }
    if matches_binding(&bindings.panel_down, &key) {
        state.panel.move_cursor(1, inside);
        return Action::Continue;
    }
    for (binding, steps) in [(&bindings.increase, 1), (&bindings.decrease, -1)] {
        if matches_binding(binding, &key) {
            if let Some(tunable) =
                state.panel.adjust(state.universe.settings_mut(), steps, inside)
            {
                debug!("{} set to {}", tunable.label(), tunable.value(state.universe.settings()));
            }
            return Action::Continue;
        }
    }
    if let Some(command) = bindings.command(&key) {
        state.universe.key_released(command);
    }
    Action::Continue
}

fn handle_mouse(state: &mut Session, mouse: MouseEvent, layout: &Layout) -> Action {
    let point = layout.to_canvas(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => match point {
            Some(p) => state.universe.pointer_moved(p),
            None => state.universe.pointer_left(),
        },
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(p) = point {
                state.universe.pointer_released(p);
            }
        }
        _ => {}
    }
    Action::Continue
}
