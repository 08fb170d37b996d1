//! Playback state for a film's trailer and soundtrack.
//!
//! Decoding is not done here: a player tracks its transport state, its
//! position and its volume, and advances the position by the frame time
//! on every update. Both players share a [`Transport`] and differ in what
//! `play` means: the video resumes where it was paused, the sound always
//! restarts from the beginning.

use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
struct Transport {
    source: Option<PathBuf>,
    state: PlaybackState,
    position: Duration,
    length: Option<Duration>,
    volume: f32,
    looping: bool,
}

impl Transport {
    fn new(looping: bool) -> Self {
        Transport {
            source: None,
            state: PlaybackState::Stopped,
            position: Duration::ZERO,
            length: None,
            volume: 1.0,
            looping,
        }
    }

    fn advance(&mut self, dt: Duration) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.position += dt;
        let Some(length) = self.length else {
            return;
        };
        if self.position < length {
            return;
        }
        if self.looping && !length.is_zero() {
            let wrapped = self.position.as_nanos() % length.as_nanos();
            self.position = Duration::from_nanos(wrapped as u64);
        } else {
            self.position = length;
            self.state = PlaybackState::Stopped;
        }
    }

    fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
    }

    fn set_paused(&mut self, paused: bool) {
        self.state = match (self.state, paused) {
            (PlaybackState::Playing, true) => PlaybackState::Paused,
            (PlaybackState::Paused, false) => PlaybackState::Playing,
            (state, _) => state,
        };
    }
}

macro_rules! transport_accessors {
    () => {
        pub fn load(&mut self, source: &Path) {
            self.transport.source = Some(source.to_path_buf());
        }

        pub fn source(&self) -> Option<&Path> {
            self.transport.source.as_deref()
        }

        pub fn state(&self) -> PlaybackState {
            self.transport.state
        }

        pub fn is_playing(&self) -> bool {
            self.transport.state == PlaybackState::Playing
        }

        pub fn is_paused(&self) -> bool {
            self.transport.state == PlaybackState::Paused
        }

        pub fn position(&self) -> Duration {
            self.transport.position
        }

        pub fn length(&self) -> Option<Duration> {
            self.transport.length
        }

        pub fn set_length(&mut self, length: Option<Duration>) {
            self.transport.length = length;
        }

        pub fn volume(&self) -> f32 {
            self.transport.volume
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.transport.volume = volume.clamp(0.0, 1.0);
        }

        pub fn set_paused(&mut self, paused: bool) {
            self.transport.set_paused(paused);
        }

        pub fn stop(&mut self) {
            self.transport.stop();
        }

        /// Advance playback by one frame.
        pub fn update(&mut self, dt: Duration) {
            self.transport.advance(dt);
        }
    };
}

/// Trailer player. Plays once and stops at its end.
#[derive(Debug, Clone)]
pub struct VideoPlayer {
    transport: Transport,
}

impl Default for VideoPlayer {
    fn default() -> Self {
        VideoPlayer {
            transport: Transport::new(false),
        }
    }
}

impl VideoPlayer {
    transport_accessors!();

    /// Start playback, resuming from the paused position if there is one.
    pub fn play(&mut self) {
        if self.transport.state == PlaybackState::Stopped {
            self.transport.position = Duration::ZERO;
        }
        self.transport.state = PlaybackState::Playing;
    }
}

/// Soundtrack player.
#[derive(Debug, Clone)]
pub struct SoundPlayer {
    transport: Transport,
}

impl Default for SoundPlayer {
    fn default() -> Self {
        SoundPlayer {
            transport: Transport::new(false),
        }
    }
}

impl SoundPlayer {
    transport_accessors!();

    pub fn set_loop(&mut self, looping: bool) {
        self.transport.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.transport.looping
    }

    /// Start playback from the beginning.
    pub fn play(&mut self) {
        self.transport.position = Duration::ZERO;
        self.transport.state = PlaybackState::Playing;
    }
}
