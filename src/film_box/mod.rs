//! FilmBox: one film rendered as a box with four information faces.
//!
//! The outer box is wrapped in the poster. Inside it sits a slightly
//! smaller box wrapped in the film's background, and on its walls four
//! faces: the poster in front, the metadata panel on the right, the awards
//! panel on the left and the trailer at the back. Turning the box by
//! quarter turns brings each face in front of a camera placed inside.

mod geometry;
mod rotation;

pub use geometry::{BoxGeometry, FACE_OFFSET, INNER_MARGIN, TRAILER_ASPECT};
pub use rotation::{Direction, QUARTER_TURN, TurnState};

use std::path::Path;
use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};
use log::{debug, warn};

use crate::assets::{self, AssetKind, AssetReport, Texture, TextureKind};
use crate::geometry::{Aabb, placement};
use crate::media::{SoundPlayer, VideoPlayer};
use crate::scene::{Cull, Scene, Surface};
use crate::settings::Settings;
use crate::types::{Color, NamedColor, Style};

/// Width of every box in world units.
pub const BOX_WIDTH: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct FilmBox {
    id: String,
    title: Option<String>,
    geometry: BoxGeometry,

    poster: Texture,
    info: Texture,
    awards: Texture,
    background: Texture,
    trailer: VideoPlayer,
    soundtrack: SoundPlayer,

    world_pos: Vec3,
    screen_pos: Option<Vec2>,

    /// Degrees around the vertical axis, kept in `0..360`.
    rotation: i32,
    turn: TurnState,

    /// Trailer rectangle in world space: top-left, bottom-right.
    trailer_coords: [Vec3; 2],
}

impl Default for FilmBox {
    fn default() -> Self {
        Self::new(BOX_WIDTH)
    }
}

impl FilmBox {
    pub fn new(width: f32) -> Self {
        FilmBox {
            id: String::new(),
            title: None,
            geometry: BoxGeometry::new(width),
            poster: Texture::missing(TextureKind::Poster),
            info: Texture::missing(TextureKind::Info),
            awards: Texture::missing(TextureKind::Awards),
            background: Texture::missing(TextureKind::Background),
            trailer: VideoPlayer::default(),
            soundtrack: SoundPlayer::default(),
            world_pos: Vec3::ZERO,
            screen_pos: None,
            rotation: 0,
            turn: TurnState::Idle,
            trailer_coords: [Vec3::ZERO; 2],
        }
    }

    /// Bind the film `id`, resolving its assets under `root`.
    ///
    /// Every asset that cannot be found is listed in the returned report and
    /// replaced by a placeholder; the box stays usable either way.
    pub fn set_id(&mut self, id: &str, root: &Path) -> AssetReport {
        self.id = id.to_string();
        let mut report = AssetReport {
            id: id.to_string(),
            ..Default::default()
        };

        for kind in AssetKind::ALL {
            let path = match assets::resolve(root, id, kind) {
                Ok(path) => path,
                Err(e) => {
                    warn!("{e}");
                    report.errors.push(e);
                    continue;
                }
            };
            match kind {
                AssetKind::Poster => {
                    self.poster = Texture::from_file(TextureKind::Poster, path.clone())
                }
                AssetKind::Info => self.info = Texture::from_file(TextureKind::Info, path.clone()),
                AssetKind::Awards => {
                    self.awards = Texture::from_file(TextureKind::Awards, path.clone())
                }
                AssetKind::Background => {
                    // Seen from inside the box, i.e. from its back.
                    let mut background = Texture::from_file(TextureKind::Background, path.clone());
                    background.mirror();
                    self.background = background;
                }
                AssetKind::Trailer => self.trailer.load(&path),
                AssetKind::Soundtrack => self.soundtrack.load(&path),
            }
            report.resolved.push((kind, path));
        }
        self.soundtrack.set_loop(true);

        let name = self.display_name();
        self.poster.set_caption(name);
        self.info.set_caption("ABOUT");
        self.awards.set_caption("AWARDS");

        debug!(
            "film `{id}`: {} assets resolved, {} missing",
            report.resolved.len(),
            report.errors.len()
        );
        report
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
        let name = self.display_name();
        self.poster.set_caption(name);
    }

    pub fn set_media_lengths(&mut self, trailer: Option<Duration>, soundtrack: Option<Duration>) {
        self.trailer.set_length(trailer);
        self.soundtrack.set_length(soundtrack);
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// Push this box into `scene` and refresh the trailer rectangle.
    ///
    /// `play_icon` is shown on the trailer while it is not playing, only from
    /// outside the box. `lit` is false when no light reaches the box.
    pub fn display(&mut self, scene: &mut Scene, play_icon: &Texture, lit: bool) {
        let shade = |surface: Surface| if lit { surface } else { surface.unlit() };
        let g = self.geometry;
        let local = placement(self.world_pos, self.rotation as f32);

        scene.push_box(&local, g.outer, &shade(Surface::from_texture(&self.poster)));
        scene.push_box(&local, g.inner, &shade(Surface::from_texture(&self.background)));

        let faces = [
            (0.0, &self.poster),
            (-90.0, &self.info),
            (90.0, &self.awards),
        ];
        for (degrees, texture) in faces {
            let frame = local * Mat4::from_rotation_y(f32::to_radians(degrees));
            scene.push_rect(
                &frame,
                g.texture_pos,
                g.texture_size.x,
                g.texture_size.y,
                shade(Surface::from_texture(texture)),
                Cull::None,
            );
        }

        // The trailer hangs on the back wall, facing the centre.
        let frame = local
            * Mat4::from_rotation_y(180_f32.to_radians())
            * Mat4::from_translation(Vec3::new(0.0, 0.0, g.face_depth()));
        let size = g.trailer_size;
        scene.push_rect(
            &frame,
            Vec3::new(-size.x / 2.0, -size.y / 2.0, 0.0),
            size.x,
            size.y,
            shade(self.trailer_surface()),
            Cull::None,
        );

        if !self.trailer.is_playing() {
            let icon = size.y / 2.0;
            // Culled from inside the box.
            scene.push_rect(
                &frame,
                Vec3::new(-icon / 2.0, -icon / 2.0, 0.2),
                icon,
                icon,
                Surface::from_texture(play_icon),
                Cull::Front,
            );
        }

        let z = self.world_pos.z + g.face_depth();
        self.trailer_coords = [
            Vec3::new(
                self.world_pos.x - size.x / 2.0,
                self.world_pos.y + size.y / 2.0,
                z,
            ),
            Vec3::new(
                self.world_pos.x + size.x / 2.0,
                self.world_pos.y - size.y / 2.0,
                z,
            ),
        ];
    }

    fn trailer_surface(&self) -> Surface {
        let playing = self.trailer.is_playing();
        let style = Style::fg(Color::Named(NamedColor::Magenta));
        if !playing {
            return Surface::new('░', style).with_label("TRAILER");
        }
        let millis = self.trailer.position().as_millis();
        let ch = if (millis / 250) % 2 == 0 { '▚' } else { '▞' };
        let secs = self.trailer.position().as_secs();
        Surface::new(ch, style).with_label(format!("TRAILER {:02}:{:02}", secs / 60, secs % 60))
    }

    // -----------------------------------------------------------------------
    // Animation and playback
    // -----------------------------------------------------------------------

    /// Advance the current quarter turn by `speed` degrees.
    pub fn rotate_box(&mut self, direction: Direction, speed: u8) {
        let delta = self.turn.advance(direction, speed as u32);
        self.rotation = (self.rotation + delta).rem_euclid(360);
    }

    /// Advance trailer and soundtrack and apply the shared volumes.
    pub fn update(&mut self, settings: &Settings, dt: Duration) {
        self.trailer.update(dt);
        self.trailer.set_volume(settings.trailer_volume());
        self.soundtrack.update(dt);
        self.soundtrack.set_volume(settings.soundtrack_volume());
    }

    /// Play or pause the trailer. The soundtrack pauses while the trailer
    /// plays and resumes when it is paused.
    pub fn setting_video_controls(&mut self) {
        if !self.trailer.is_playing() {
            self.trailer.play();
            self.soundtrack.set_paused(true);
            debug!("film `{}`: trailer playing", self.id);
        } else {
            self.trailer.set_paused(true);
            self.soundtrack.set_paused(false);
            debug!("film `{}`: trailer paused", self.id);
        }
    }

    /// Start the soundtrack if it is not playing, or stop it entirely.
    pub fn setting_audio_controls(&mut self, enable: bool) {
        if enable {
            if !self.soundtrack.is_playing() {
                self.soundtrack.play();
            }
        } else {
            self.soundtrack.stop();
        }
    }

    pub fn stop_trailer(&mut self) {
        self.trailer.stop();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn display_name(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.id.clone())
    }

    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    pub fn world_pos(&self) -> Vec3 {
        self.world_pos
    }

    pub fn set_world_pos(&mut self, pos: Vec3) {
        self.world_pos = pos;
    }

    pub fn screen_pos(&self) -> Option<Vec2> {
        self.screen_pos
    }

    pub fn set_screen_pos(&mut self, pos: Option<Vec2>) {
        self.screen_pos = pos;
    }

    /// World-space bounds of the outer box. Width equals depth, so quarter
    /// turns leave the bounds unchanged.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.world_pos, self.geometry.outer)
    }

    pub fn rotation_angle(&self) -> i32 {
        self.rotation
    }

    pub fn set_rotation_angle(&mut self, degrees: i32) {
        self.rotation = degrees.rem_euclid(360);
    }

    pub fn rotation_step(&self) -> u32 {
        self.turn.progress()
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// Re-arm the next quarter turn.
    pub fn reset_rotation_step(&mut self) {
        self.turn.reset();
    }

    /// The trailer wall is in front of a camera placed inside the box.
    pub fn is_trailer_facing(&self) -> bool {
        self.rotation == 180
    }

    pub fn trailer_coords(&self) -> [Vec3; 2] {
        self.trailer_coords
    }

    pub fn trailer(&self) -> &VideoPlayer {
        &self.trailer
    }

    pub fn soundtrack(&self) -> &SoundPlayer {
        &self.soundtrack
    }

    pub fn poster(&self) -> &Texture {
        &self.poster
    }

    pub fn info(&self) -> &Texture {
        &self.info
    }

    pub fn awards(&self) -> &Texture {
        &self.awards
    }

    pub fn background(&self) -> &Texture {
        &self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::PlaybackState;
    use std::fs;

    fn inside_box() -> FilmBox {
        let mut film = FilmBox::default();
        film.setting_audio_controls(true);
        film
    }

    #[test]
    fn set_id_resolves_the_naming_convention() {
        let dir = tempfile::tempdir().unwrap();
        let film_dir = dir.path().join("lalaland");
        fs::create_dir(&film_dir).unwrap();
        for name in ["lalaland.jpg", "lalaland1.png", "lalaland2.png", "lalalandb.jpg", "lalaland.mp4"] {
            fs::write(film_dir.join(name), b"x").unwrap();
        }

        let mut film = FilmBox::default();
        let report = film.set_id("lalaland", dir.path());

        assert_eq!(report.resolved.len(), 5);
        assert_eq!(report.missing().collect::<Vec<_>>(), vec![AssetKind::Soundtrack]);
        assert!(film.poster().is_loaded());
        assert!(film.background().is_mirrored());
        assert!(!film.poster().is_mirrored());
        assert!(film.trailer().source().is_some());
        assert!(film.soundtrack().source().is_none());
        assert!(film.soundtrack().is_looping());
    }

    #[test]
    fn missing_assets_leave_a_working_box() {
        let dir = tempfile::tempdir().unwrap();
        let mut film = FilmBox::default();
        let report = film.set_id("moonlight", dir.path());
        assert_eq!(report.errors.len(), 6);
        assert_eq!(film.poster().caption(), Some("moonlight"));

        let mut scene = Scene::new();
        film.display(&mut scene, &Texture::missing(TextureKind::PlayIcon), true);
        assert!(!scene.quads.is_empty());
    }

    #[test]
    fn rotation_never_overshoots() {
        for speed in 1..=5 {
            let mut film = FilmBox::default();
            for _ in 0..100 {
                film.rotate_box(Direction::Right, speed);
                assert!(film.rotation_step() <= 90);
            }
            assert_eq!(film.rotation_step(), 90);
            assert_eq!(film.rotation_angle(), 90);
        }
    }

    #[test]
    fn left_turn_wraps_the_angle() {
        let mut film = FilmBox::default();
        for _ in 0..30 {
            film.rotate_box(Direction::Left, 3);
        }
        assert_eq!(film.rotation_angle(), 270);
        film.reset_rotation_step();
        for _ in 0..30 {
            film.rotate_box(Direction::Left, 3);
        }
        assert_eq!(film.rotation_angle(), 180);
        assert!(film.is_trailer_facing());
    }

    #[test]
    fn video_toggle_twice_restores_soundtrack() {
        let mut film = inside_box();
        let before = film.soundtrack().is_paused();

        film.setting_video_controls();
        assert!(film.trailer().is_playing());
        assert!(film.soundtrack().is_paused());

        film.setting_video_controls();
        assert!(film.trailer().is_paused());
        assert_eq!(film.soundtrack().is_paused(), before);
        assert!(film.soundtrack().is_playing());
    }

    #[test]
    fn trailer_and_soundtrack_never_play_together() {
        let mut film = inside_box();
        for _ in 0..5 {
            film.setting_video_controls();
            assert!(!(film.trailer().is_playing() && film.soundtrack().is_playing()));
        }
    }

    #[test]
    fn disabling_audio_stops_rather_than_pauses() {
        let mut film = inside_box();
        film.update(&Settings::default(), Duration::from_secs(3));
        assert_eq!(film.soundtrack().position(), Duration::from_secs(3));

        film.setting_audio_controls(false);
        assert_eq!(film.soundtrack().state(), PlaybackState::Stopped);

        film.setting_audio_controls(true);
        assert!(film.soundtrack().is_playing());
        assert_eq!(film.soundtrack().position(), Duration::ZERO);
    }

    #[test]
    fn update_applies_shared_volumes() {
        let mut film = FilmBox::default();
        let mut settings = Settings::default();
        settings.set_trailer_volume(0.2);
        settings.set_soundtrack_volume(0.9);
        film.update(&settings, Duration::from_millis(16));
        assert_eq!(film.trailer().volume(), 0.2);
        assert_eq!(film.soundtrack().volume(), 0.9);
    }

    #[test]
    fn display_refreshes_trailer_rectangle() {
        let mut film = FilmBox::default();
        film.set_world_pos(Vec3::new(450.0, 0.0, 0.0));
        let mut scene = Scene::new();
        film.display(&mut scene, &Texture::missing(TextureKind::PlayIcon), true);

        let [tl, br] = film.trailer_coords();
        let size = film.geometry().trailer_size;
        assert!((tl.x - (450.0 - size.x / 2.0)).abs() < 1e-3);
        assert!((tl.y - size.y / 2.0).abs() < 1e-3);
        assert!((br.x - (450.0 + size.x / 2.0)).abs() < 1e-3);
        assert!((tl.z - film.geometry().face_depth()).abs() < 1e-3);
        assert_eq!(tl.z, br.z);
    }

    #[test]
    fn play_icon_whenever_the_trailer_is_not_playing() {
        let icon = Texture::missing(TextureKind::PlayIcon);
        let mut film = inside_box();
        let mut scene = Scene::new();
        // Two boxes, three faces, one trailer and the icon.
        film.display(&mut scene, &icon, true);
        assert_eq!(scene.quads.len(), 17);
        assert_eq!(scene.quads[16].cull, Cull::Front);

        film.setting_video_controls();
        scene.clear();
        film.display(&mut scene, &icon, true);
        assert_eq!(scene.quads.len(), 16);

        film.setting_video_controls();
        scene.clear();
        film.display(&mut scene, &icon, true);
        assert_eq!(scene.quads.len(), 17);

        film.stop_trailer();
        scene.clear();
        film.display(&mut scene, &icon, true);
        assert_eq!(scene.quads.len(), 17);
        assert_eq!(scene.quads[16].cull, Cull::Front);
    }
}
