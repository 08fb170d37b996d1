//! The universe: boxes on a ring around the statuette, the camera flying
//! between them, and the input handling that drives both.
//!
//! Input callbacks (`pointer_moved`, `pointer_released`, `key_released`)
//! only change state. [`Universe::update`] advances animations and
//! [`Universe::draw`] lays out the ring and picks the hovered box, once per
//! frame in that order.

mod interaction;
mod layout;
mod lighting;
mod statuette;

pub use interaction::{Command, Interaction};
pub use layout::{RING_RADIUS, RingLayout};
pub use lighting::{Lighting, PointLight, SPOTLIGHT_CUTOFF, Spotlight};
pub use statuette::Statuette;

use std::path::Path;
use std::time::Duration;

use glam::{Vec2, Vec3};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::assets::{AssetReport, Texture};
use crate::camera::{Camera, CameraTween};
use crate::catalog::Catalog;
use crate::film_box::{BOX_WIDTH, Direction, FilmBox, QUARTER_TURN};
use crate::scene::Scene;
use crate::settings::Settings;
use crate::types::{Style, Viewport, GOLD};

pub const HELP_TEXT: &str =
    "Press RIGHT ARROW or LEFT ARROW to rotate the box \nPress 'Q' to exit from the box";

/// Fixed numbers of the universe, overridable from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseParams {
    pub box_width: f32,
    pub ring_radius: f32,
    /// Camera distance from the statuette in the overview.
    pub camera_depth: f32,
    /// Camera distance from a box centre once inside it.
    pub inside_depth: f32,
    pub tween_factor: f32,
    pub tween_epsilon: f32,
}

impl Default for UniverseParams {
    fn default() -> Self {
        UniverseParams {
            box_width: BOX_WIDTH,
            ring_radius: RING_RADIUS,
            camera_depth: 1000.0,
            inside_depth: 56.0,
            tween_factor: 0.3,
            tween_epsilon: 0.01,
        }
    }
}

impl UniverseParams {
    /// Replace values the universe cannot work with by their defaults.
    /// The tween factor is capped at 1 and every length must be positive.
    pub fn clamped(self) -> Self {
        let defaults = UniverseParams::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        UniverseParams {
            box_width: positive(self.box_width, defaults.box_width),
            ring_radius: positive(self.ring_radius, defaults.ring_radius),
            camera_depth: positive(self.camera_depth, defaults.camera_depth),
            inside_depth: positive(self.inside_depth, defaults.inside_depth),
            tween_factor: positive(self.tween_factor, defaults.tween_factor).min(1.0),
            tween_epsilon: positive(self.tween_epsilon, defaults.tween_epsilon),
        }
    }

    pub fn camera_origin(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.camera_depth)
    }
}

pub struct Universe {
    films: Vec<FilmBox>,
    interaction: Interaction,
    camera: Camera,
    tween: CameraTween,
    lighting: Lighting,
    layout: RingLayout,
    statuette: Statuette,
    play_icon: Texture,
    settings: Settings,
    params: UniverseParams,
    pointer: Option<Vec2>,
    hovered: Option<usize>,
}

impl Universe {
    pub fn new(
        films: Vec<FilmBox>,
        play_icon: Texture,
        params: UniverseParams,
        settings: Settings,
        viewport: Viewport,
    ) -> Self {
        let params = params.clamped();
        let origin = params.camera_origin();
        Universe {
            films,
            interaction: Interaction::Overview,
            camera: Camera::new(origin, viewport),
            tween: CameraTween::new(origin, params.tween_factor, params.tween_epsilon),
            lighting: Lighting::default(),
            layout: RingLayout::new(params.ring_radius),
            statuette: Statuette,
            play_icon,
            settings: settings.clamped(),
            params,
            pointer: None,
            hovered: None,
        }
    }

    /// One box per catalog entry, with assets resolved under `root`.
    pub fn from_catalog(
        catalog: &Catalog,
        root: &Path,
        params: UniverseParams,
        settings: Settings,
        viewport: Viewport,
    ) -> (Self, Vec<AssetReport>) {
        let params = params.clamped();
        let mut films = Vec::with_capacity(catalog.movies.len());
        let mut reports = Vec::with_capacity(catalog.movies.len());
        for record in &catalog.movies {
            let mut film = FilmBox::new(params.box_width);
            reports.push(film.set_id(&record.id, root));
            if let Some(title) = &record.title {
                film.set_title(title.clone());
            }
            film.set_media_lengths(record.trailer_length(), record.soundtrack_length());
            films.push(film);
        }
        let play_icon = Texture::play_icon(root);
        info!(
            "universe ready: {} films, {} with missing assets",
            films.len(),
            reports.iter().filter(|r| !r.is_complete()).count()
        );
        (Self::new(films, play_icon, params, settings, viewport), reports)
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    pub fn update(&mut self, dt: Duration) {
        if self.tween.step(&mut self.camera) {
            self.interaction.camera_arrived();
            debug!("camera arrived: {}", self.interaction);
        }

        if let (Some(selected), Some(direction)) =
            (self.interaction.selected(), self.interaction.pending_turn())
        {
            let film = &mut self.films[selected];
            film.rotate_box(direction, self.settings.rotation_speed());
            if film.rotation_step() == QUARTER_TURN {
                film.reset_rotation_step();
                self.interaction.set_turn(None);
                debug!("film `{}` settled at {}°", film.id(), film.rotation_angle());
            }
        }

        if let Some(selected) = self.interaction.selected() {
            self.films[selected].update(&self.settings, dt);
        }
        self.layout.end_frame();
    }

    /// Lay out the ring, push every box into `scene` and pick the box
    /// under the pointer.
    pub fn draw(&mut self, scene: &mut Scene) {
        let ambient = self.lighting.ambient_enabled();
        let selected = self.interaction.selected();
        self.statuette.draw(scene, ambient);

        let positions = self.layout.positions(self.films.len());
        let ray = self.pointer.map(|p| self.camera.screen_ray(p));
        let mut hit = None;
        for (i, (film, pos)) in self.films.iter_mut().zip(positions).enumerate() {
            film.set_world_pos(pos);
            film.set_screen_pos(self.camera.world_to_screen(pos));
            // Inside a box only the spotlight reaches the wall in front of the camera.
            let wall = pos + Vec3::new(0.0, 0.0, film.geometry().face_depth());
            let lit = ambient || (selected == Some(i) && self.lighting.spotlight().illuminates(wall));
            film.display(scene, &self.play_icon, lit);
            if let Some(ray) = &ray {
                if ray.intersect_aabb(&film.bounds()).is_some() {
                    hit = Some(i);
                }
            }
        }
        self.hovered = hit;

        if let (Some(i), None) = (hit, selected) {
            let style = Style {
                fg: Some(GOLD),
                bold: true,
                ..Default::default()
            };
            for corner in self.films[i].bounds().corners() {
                scene.push_marker(corner, '●', style.clone());
            }
        }
    }

    /// `update` then a fresh `draw`.
    pub fn frame(&mut self, dt: Duration, scene: &mut Scene) {
        self.update(dt);
        scene.clear();
        self.draw(scene);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    pub fn pointer_released(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        match (self.interaction, self.hovered) {
            (Interaction::Overview, Some(i)) if !self.layout.is_scrolling() => self.select(i),
            _ => {
                if let Some(i) = self.interaction.selected() {
                    self.click_trailer(i, pos);
                }
            }
        }
    }

    pub fn key_released(&mut self, command: Command) {
        match command {
            Command::RotateRight => {
                self.request_turn(Direction::Right);
            }
            Command::RotateLeft => {
                self.request_turn(Direction::Left);
            }
            Command::ExitBox => {
                self.exit_box();
            }
        }
    }

    fn select(&mut self, index: usize) {
        let film = &mut self.films[index];
        let center = film.world_pos();
        self.interaction = Interaction::ZoomingIn {
            selected: index,
            turn: None,
        };
        self.tween.start(Vec3::new(
            center.x,
            center.y,
            center.z + self.params.inside_depth,
        ));
        self.lighting.enter_box(center);
        film.setting_audio_controls(true);
        info!("entering film `{}`", film.id());
    }

    fn click_trailer(&mut self, index: usize, pos: Vec2) {
        let film = &mut self.films[index];
        if !film.is_trailer_facing() {
            return;
        }
        let [tl, br] = film.trailer_coords();
        let (Some(a), Some(b)) = (self.camera.world_to_screen(tl), self.camera.world_to_screen(br))
        else {
            return;
        };
        if pos.x >= a.x && pos.x <= b.x && pos.y >= a.y && pos.y <= b.y {
            film.setting_video_controls();
        }
    }

    /// Start a quarter turn of the selected box. Refused while a turn is
    /// queued or still in progress.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        let Some(selected) = self.interaction.selected() else {
            return false;
        };
        if self.interaction.pending_turn().is_some() || self.films[selected].rotation_step() != 0 {
            debug!("turn refused: box {selected} is still turning");
            return false;
        }
        self.interaction.set_turn(Some(direction));
        true
    }

    /// Leave the selected box and fly back to the overview. Refused while
    /// a turn is queued or the box is turning.
    pub fn exit_box(&mut self) -> bool {
        let Some(selected) = self.interaction.selected() else {
            return false;
        };
        let queued = self.interaction.pending_turn().is_some();
        let film = &mut self.films[selected];
        if queued || film.rotation_step() != 0 {
            debug!("exit refused: film `{}` is turning", film.id());
            return false;
        }

        self.tween.start(self.params.camera_origin());
        self.lighting.leave_box();
        film.set_rotation_angle(0);
        if film.trailer().is_playing() {
            film.setting_video_controls();
        }
        film.setting_audio_controls(false);
        film.stop_trailer();
        self.interaction = Interaction::ZoomingOut;
        info!("leaving film `{}`", film.id());
        true
    }

    /// Turn the whole ring by `degrees`. Not bound to any input.
    pub fn scroll_by(&mut self, degrees: f32) {
        self.layout.scroll_by(degrees);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn selected(&self) -> Option<usize> {
        self.interaction.selected()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn films(&self) -> &[FilmBox] {
        &self.films
    }

    pub fn film(&self, index: usize) -> Option<&FilmBox> {
        self.films.get(index)
    }

    pub fn film_mut(&mut self, index: usize) -> Option<&mut FilmBox> {
        self.films.get_mut(index)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
    }

    pub fn camera_target(&self) -> Vec3 {
        self.tween.target()
    }

    pub fn is_camera_moving(&self) -> bool {
        self.tween.is_moving()
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn params(&self) -> &UniverseParams {
        &self.params
    }

    /// Help lines to show, if enabled and the camera is in a box.
    pub fn help_text(&self) -> Option<&'static str> {
        (self.settings.show_help() && self.interaction.selected().is_some()).then_some(HELP_TEXT)
    }
}
