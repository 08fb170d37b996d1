use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::universe::{Command, UniverseParams};

/// User configuration, read from `~/.config/oscar-universe/config.json`.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub key_bindings: KeyBindings,
    /// Tunables the session starts with.
    pub settings: Settings,
    pub universe: UniverseParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub rotate_right: String,
    pub rotate_left: String,
    pub exit_box: String,
    pub quit: String,
    pub toggle_help: String,
    pub panel_up: String,
    pub panel_down: String,
    pub increase: String,
    pub decrease: String,
    pub fullscreen: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            rotate_right: "Right".into(),
            rotate_left: "Left".into(),
            exit_box: "q".into(),
            quit: "Ctrl-c".into(),
            toggle_help: "h".into(),
            panel_up: "Up".into(),
            panel_down: "Down".into(),
            increase: "+".into(),
            decrease: "-".into(),
            fullscreen: "F11".into(),
        }
    }
}

impl KeyBindings {
    /// The universe command bound to `event`, if any.
    pub fn command(&self, event: &KeyEvent) -> Option<Command> {
        if matches_binding(&self.rotate_right, event) {
            Some(Command::RotateRight)
        } else if matches_binding(&self.rotate_left, event) {
            Some(Command::RotateLeft)
        } else if matches_binding(&self.exit_box, event) {
            Some(Command::ExitBox)
        } else {
            None
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppConfig>(&json) {
                Ok(mut config) => {
                    config.settings = config.settings.clamped();
                    config.universe = config.universe.clamped();
                    config
                }
                Err(e) => {
                    warn!("invalid config {} ({e}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("oscar-universe");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config,
/// such as `"Right"`, `"q"`, `"Ctrl-c"`, `"Alt-Enter"` or `"F11"`.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    let (required, key) = if let Some(rest) = binding.strip_prefix("Ctrl-") {
        (KeyModifiers::CONTROL, rest)
    } else if let Some(rest) = binding.strip_prefix("Alt-") {
        (KeyModifiers::ALT, rest)
    } else {
        (KeyModifiers::NONE, binding)
    };

    // Plain bindings must not fire on Ctrl or Alt chords.
    let held = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
    if held != required {
        return false;
    }

    match key {
        "Right" => event.code == KeyCode::Right,
        "Left" => event.code == KeyCode::Left,
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        s => {
            if let Some(n) = s.strip_prefix('F').and_then(|r| r.parse::<u8>().ok()) {
                return event.code == KeyCode::F(n);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => event.code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}
