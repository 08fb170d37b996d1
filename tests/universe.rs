use std::fs;
use std::path::Path;
use std::time::Duration;

use glam::{Vec2, Vec3};

use oscar_universe::assets::AssetKind;
use oscar_universe::catalog::Catalog;
use oscar_universe::film_box::{Direction, TurnState};
use oscar_universe::media::PlaybackState;
use oscar_universe::scene::{Cull, Scene};
use oscar_universe::settings::Settings;
use oscar_universe::types::Viewport;
use oscar_universe::universe::{Command, Interaction, RingLayout, Universe, UniverseParams};

const DT: Duration = Duration::from_millis(33);

fn viewport() -> Viewport {
    Viewport {
        width: 120,
        height: 40,
    }
}

/// A catalog of `ids` next to a full set of assets for the first film only.
fn fixture(dir: &Path, ids: &[&str]) -> Catalog {
    let movies: Vec<_> = ids.iter().map(|id| format!(r#"{{"ID": "{id}"}}"#)).collect();
    let path = dir.join("movies.json");
    fs::write(&path, format!(r#"{{"movies": [{}]}}"#, movies.join(","))).unwrap();

    let first = ids[0];
    fs::create_dir_all(dir.join(first)).unwrap();
    for kind in AssetKind::ALL {
        fs::write(kind.path(dir, first), b"").unwrap();
    }
    Catalog::load(&path).unwrap()
}

fn universe(count: usize) -> Universe {
    let dir = tempfile::tempdir().unwrap();
    let ids: Vec<String> = (0..count).map(|i| format!("film{i}")).collect();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    let catalog = fixture(dir.path(), &ids);
    let (universe, _) = Universe::from_catalog(
        &catalog,
        dir.path(),
        UniverseParams::default(),
        Settings::default(),
        viewport(),
    );
    universe
}

fn run_frames(u: &mut Universe, n: usize) {
    let mut scene = Scene::new();
    for _ in 0..n {
        u.frame(DT, &mut scene);
    }
}

/// Run frames until `done` holds, at most `limit`.
fn run_until(u: &mut Universe, limit: usize, done: impl Fn(&Universe) -> bool) -> usize {
    let mut scene = Scene::new();
    for i in 0..limit {
        if done(&*u) {
            return i;
        }
        u.frame(DT, &mut scene);
    }
    panic!("not reached after {limit} frames: {}", u.interaction());
}

/// Hover box `index` and click it.
fn click_box(u: &mut Universe, index: usize) {
    let mut scene = Scene::new();
    u.draw(&mut scene);
    let target = u.film(index).and_then(|f| f.screen_pos()).unwrap();
    u.pointer_moved(target);
    u.draw(&mut scene);
    u.pointer_released(target);
}

fn enter_box(u: &mut Universe, index: usize) {
    click_box(u, index);
    run_until(u, 200, |u| matches!(u.interaction(), Interaction::Inside { .. }));
}

fn quarter_turn(u: &mut Universe, command: Command) {
    u.key_released(command);
    run_until(u, 200, |u| u.interaction().pending_turn().is_none());
}

#[test]
fn catalog_reports_missing_assets_per_film() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = fixture(dir.path(), &["coco", "dunkirk"]);
    let (universe, reports) = Universe::from_catalog(
        &catalog,
        dir.path(),
        UniverseParams::default(),
        Settings::default(),
        viewport(),
    );
    assert_eq!(universe.films().len(), 2);
    assert!(reports[0].is_complete());
    assert_eq!(reports[1].missing().count(), AssetKind::ALL.len());
    assert!(universe.film(0).unwrap().poster().is_loaded());
    assert!(!universe.film(1).unwrap().poster().is_loaded());
}

#[test]
fn selecting_a_box_zooms_in() {
    let mut u = universe(4);
    click_box(&mut u, 0);

    assert!(matches!(
        u.interaction(),
        Interaction::ZoomingIn { selected: 0, .. }
    ));
    let center = u.film(0).unwrap().world_pos();
    assert_eq!(u.camera_target(), Vec3::new(center.x, center.y, center.z + 56.0));
    assert!(u.is_camera_moving());
    assert!(!u.lighting().ambient_enabled());
    assert!(u.lighting().spotlight().enabled);
    assert_eq!(
        u.film(0).unwrap().soundtrack().state(),
        PlaybackState::Playing
    );
}

#[test]
fn camera_arrival_moves_inside() {
    let mut u = universe(3);
    click_box(&mut u, 1);

    let mut scene = Scene::new();
    let mut frames = 0;
    while u.is_camera_moving() {
        assert!(matches!(u.interaction(), Interaction::ZoomingIn { .. }));
        u.frame(DT, &mut scene);
        frames += 1;
        assert!(frames < 200);
    }
    assert!(matches!(u.interaction(), Interaction::Inside { selected: 1, .. }));
    let gap = (u.camera().position() - u.camera_target()).abs();
    assert!(gap.max_element() < 0.01);
}

#[test]
fn exit_is_refused_mid_turn() {
    let mut u = universe(2);
    u.settings_mut().set_rotation_speed(5);
    enter_box(&mut u, 0);

    u.key_released(Command::RotateRight);
    run_frames(&mut u, 9);
    assert_eq!(u.film(0).unwrap().rotation_step(), 45);

    let target = u.camera_target();
    u.key_released(Command::ExitBox);
    assert_eq!(u.camera_target(), target);
    assert_eq!(u.selected(), Some(0));
    assert!(!u.lighting().ambient_enabled());

    // A second turn cannot start until the first settles.
    assert!(!u.request_turn(Direction::Left));

    run_frames(&mut u, 9);
    assert_eq!(u.film(0).unwrap().rotation_angle(), 90);
    assert_eq!(u.film(0).unwrap().turn_state(), TurnState::Idle);
    assert!(u.exit_box());
}

#[test]
fn queued_turn_holds_off_exit() {
    let mut u = universe(2);
    enter_box(&mut u, 1);

    u.key_released(Command::RotateLeft);
    u.key_released(Command::RotateRight);
    u.key_released(Command::ExitBox);
    assert_eq!(
        u.interaction(),
        Interaction::Inside {
            selected: 1,
            turn: Some(Direction::Left)
        }
    );
    assert!(!u.lighting().ambient_enabled());

    run_until(&mut u, 200, |u| u.interaction().pending_turn().is_none());
    assert_eq!(u.film(1).unwrap().rotation_angle(), 270);
    u.key_released(Command::ExitBox);
    assert_eq!(u.interaction(), Interaction::ZoomingOut);
}

#[test]
fn turns_land_on_quarter_angles() {
    for speed in 1..=5u8 {
        let mut u = universe(1);
        u.settings_mut().set_rotation_speed(speed);
        enter_box(&mut u, 0);

        quarter_turn(&mut u, Command::RotateLeft);
        assert_eq!(u.film(0).unwrap().rotation_angle(), 270);
        quarter_turn(&mut u, Command::RotateRight);
        quarter_turn(&mut u, Command::RotateRight);
        assert_eq!(u.film(0).unwrap().rotation_angle(), 90);
    }
}

#[test]
fn selecting_one_box_leaves_another_turning() {
    let mut u = universe(3);
    {
        let other = u.film_mut(2).unwrap();
        other.rotate_box(Direction::Right, 5);
        other.rotate_box(Direction::Right, 5);
    }
    let before = u.film(2).unwrap().turn_state();
    assert_eq!(
        before,
        TurnState::Turning {
            direction: Direction::Right,
            progress: 10
        }
    );

    click_box(&mut u, 0);
    u.key_released(Command::RotateRight);
    run_frames(&mut u, 5);

    assert_eq!(u.film(2).unwrap().turn_state(), before);
    assert_eq!(u.film(2).unwrap().rotation_angle(), 10);
    assert!(u.film(0).unwrap().rotation_step() > 0);
}

#[test]
fn trailer_click_toggles_playback() {
    let mut u = universe(2);
    enter_box(&mut u, 0);
    let centre = Vec2::new(60.0, 20.0);

    // The poster faces the camera: clicks are ignored.
    u.pointer_released(centre);
    assert_eq!(u.film(0).unwrap().trailer().state(), PlaybackState::Stopped);

    quarter_turn(&mut u, Command::RotateRight);
    quarter_turn(&mut u, Command::RotateRight);
    assert!(u.film(0).unwrap().is_trailer_facing());
    run_frames(&mut u, 1);

    u.pointer_released(centre);
    let film = u.film(0).unwrap();
    assert_eq!(film.trailer().state(), PlaybackState::Playing);
    assert_eq!(film.soundtrack().state(), PlaybackState::Paused);

    // Outside the trailer rectangle.
    u.pointer_released(Vec2::new(1.0, 1.0));
    assert_eq!(u.film(0).unwrap().trailer().state(), PlaybackState::Playing);

    u.pointer_released(centre);
    let film = u.film(0).unwrap();
    assert_eq!(film.trailer().state(), PlaybackState::Paused);
    assert_eq!(film.soundtrack().state(), PlaybackState::Playing);
}

#[test]
fn exit_returns_to_overview() {
    let mut u = universe(2);
    enter_box(&mut u, 1);
    quarter_turn(&mut u, Command::RotateLeft);
    quarter_turn(&mut u, Command::RotateLeft);
    run_frames(&mut u, 1);
    u.pointer_released(Vec2::new(60.0, 20.0));
    assert!(u.film(1).unwrap().trailer().is_playing());

    u.key_released(Command::ExitBox);
    assert_eq!(u.interaction(), Interaction::ZoomingOut);
    assert_eq!(u.selected(), None);
    assert_eq!(u.camera_target(), Vec3::new(0.0, 0.0, 1000.0));
    assert!(u.lighting().ambient_enabled());
    assert!(!u.lighting().spotlight().enabled);

    let film = u.film(1).unwrap();
    assert_eq!(film.rotation_angle(), 0);
    assert_eq!(film.trailer().state(), PlaybackState::Stopped);
    assert_eq!(film.soundtrack().state(), PlaybackState::Stopped);
    assert_eq!(film.soundtrack().position(), Duration::ZERO);

    // The stopped trailer shows its play icon again.
    let mut scene = Scene::new();
    u.draw(&mut scene);
    let icons = scene.quads.iter().filter(|q| q.cull == Cull::Front).count();
    assert_eq!(icons, 2);

    run_until(&mut u, 200, |u| u.interaction() == Interaction::Overview);
    assert!(!u.is_camera_moving());

    // Rotation keys do nothing without a selection.
    u.key_released(Command::RotateRight);
    run_frames(&mut u, 3);
    assert_eq!(u.film(1).unwrap().rotation_angle(), 0);
}

#[test]
fn layout_spreads_boxes_evenly() {
    for count in [1usize, 3, 7] {
        let mut u = universe(count);
        run_frames(&mut u, 1);
        let angles: Vec<f32> = u
            .films()
            .iter()
            .map(|f| f.world_pos().y.atan2(f.world_pos().x).to_degrees().rem_euclid(360.0))
            .collect();
        let expected = RingLayout::new(450.0).angles(count);
        for (a, e) in angles.iter().zip(&expected) {
            assert!((a - e.rem_euclid(360.0)).abs() < 1e-2, "{a} vs {e}");
        }
    }
}
