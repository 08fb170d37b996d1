//! Process-wide tunables shared by every film box.
//!
//! The universe owns one `Settings` value and lends it to each box on
//! `update` and `rotate_box`, so every trailer and soundtrack responds the
//! same way when the user moves a slider.

use serde::{Deserialize, Serialize};

pub const MIN_ROTATION_SPEED: u8 = 1;
pub const MAX_ROTATION_SPEED: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    soundtrack_volume: f32,
    trailer_volume: f32,
    rotation_speed: u8,
    show_help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            soundtrack_volume: 0.5,
            trailer_volume: 0.5,
            rotation_speed: 3,
            show_help: false,
        }
    }
}

impl Settings {
    /// Re-apply the ranges after deserializing a hand-edited file.
    pub fn clamped(self) -> Self {
        let mut s = Settings::default();
        s.set_soundtrack_volume(self.soundtrack_volume);
        s.set_trailer_volume(self.trailer_volume);
        s.set_rotation_speed(self.rotation_speed);
        s.show_help = self.show_help;
        s
    }

    pub fn soundtrack_volume(&self) -> f32 {
        self.soundtrack_volume
    }

    pub fn set_soundtrack_volume(&mut self, v: f32) {
        self.soundtrack_volume = v.clamp(0.0, 1.0);
    }

    pub fn trailer_volume(&self) -> f32 {
        self.trailer_volume
    }

    pub fn set_trailer_volume(&mut self, v: f32) {
        self.trailer_volume = v.clamp(0.0, 1.0);
    }

    pub fn rotation_speed(&self) -> u8 {
        self.rotation_speed
    }

    pub fn set_rotation_speed(&mut self, speed: u8) {
        self.rotation_speed = speed.clamp(MIN_ROTATION_SPEED, MAX_ROTATION_SPEED);
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn set_show_help(&mut self, show: bool) {
        self.show_help = show;
    }
}

/// One row of the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tunable {
    SoundtrackVolume,
    TrailerVolume,
    RotationSpeed,
    Help,
}

impl Tunable {
    pub const ALL: [Tunable; 4] = [
        Tunable::SoundtrackVolume,
        Tunable::TrailerVolume,
        Tunable::RotationSpeed,
        Tunable::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tunable::SoundtrackVolume => "Soundtrack volume",
            Tunable::TrailerVolume => "Trailer volume",
            Tunable::RotationSpeed => "Rotation speed",
            Tunable::Help => "Help",
        }
    }

    pub fn value(self, settings: &Settings) -> String {
        match self {
            Tunable::SoundtrackVolume => format!("{:.2}", settings.soundtrack_volume),
            Tunable::TrailerVolume => format!("{:.2}", settings.trailer_volume),
            Tunable::RotationSpeed => settings.rotation_speed.to_string(),
            Tunable::Help => if settings.show_help { "on" } else { "off" }.to_string(),
        }
    }

    /// Nudge the value by `steps` (negative to decrease). Volumes move in
    /// tenths, the speed by one, the help toggle flips on any step.
    pub fn adjust(self, settings: &mut Settings, steps: i32) {
        match self {
            Tunable::SoundtrackVolume => {
                settings.set_soundtrack_volume(settings.soundtrack_volume + steps as f32 * 0.1)
            }
            Tunable::TrailerVolume => {
                settings.set_trailer_volume(settings.trailer_volume + steps as f32 * 0.1)
            }
            Tunable::RotationSpeed => {
                let speed = (settings.rotation_speed as i32 + steps)
                    .clamp(MIN_ROTATION_SPEED as i32, MAX_ROTATION_SPEED as i32);
                settings.set_rotation_speed(speed as u8);
            }
            Tunable::Help => {
                if steps != 0 {
                    settings.show_help = !settings.show_help;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_to_range() {
        let mut s = Settings::default();
        s.set_rotation_speed(9);
        assert_eq!(s.rotation_speed(), 5);
        s.set_rotation_speed(0);
        assert_eq!(s.rotation_speed(), 1);
        s.set_trailer_volume(3.0);
        assert_eq!(s.trailer_volume(), 1.0);
    }

    #[test]
    fn adjust_moves_volume_in_tenths() {
        let mut s = Settings::default();
        Tunable::SoundtrackVolume.adjust(&mut s, 2);
        assert!((s.soundtrack_volume() - 0.7).abs() < 1e-6);
        Tunable::SoundtrackVolume.adjust(&mut s, 10);
        assert_eq!(s.soundtrack_volume(), 1.0);
    }

    #[test]
    fn adjust_speed_saturates() {
        let mut s = Settings::default();
        Tunable::RotationSpeed.adjust(&mut s, -10);
        assert_eq!(s.rotation_speed(), 1);
        Tunable::RotationSpeed.adjust(&mut s, 1);
        assert_eq!(s.rotation_speed(), 2);
    }

    #[test]
    fn hand_edited_values_are_clamped() {
        let s: Settings =
            serde_json::from_str(r#"{"rotation_speed": 40, "trailer_volume": -1.0}"#).unwrap();
        let s = s.clamped();
        assert_eq!(s.rotation_speed(), 5);
        assert_eq!(s.trailer_volume(), 0.0);
        assert_eq!(s.soundtrack_volume(), 0.5);
    }
}
