use glam::{Mat4, Vec3};

use crate::scene::{Scene, Surface};
use crate::types::{Style, GOLD};

/// The statuette at the centre of the ring, built from stacked boxes:
/// (centre, size) of the base, the body and the head.
const PARTS: [(Vec3, Vec3); 3] = [
    (Vec3::new(0.0, -230.0, 0.0), Vec3::new(160.0, 50.0, 160.0)),
    (Vec3::new(0.0, -60.0, 0.0), Vec3::new(50.0, 290.0, 50.0)),
    (Vec3::new(0.0, 120.0, 0.0), Vec3::new(70.0, 70.0, 70.0)),
];

#[derive(Debug, Clone, Default)]
pub struct Statuette;

impl Statuette {
    pub fn draw(&self, scene: &mut Scene, lit: bool) {
        let mut surface = Surface::new(
            '█',
            Style {
                fg: Some(GOLD),
                bold: true,
                ..Default::default()
            },
        );
        if !lit {
            surface = surface.unlit();
        }
        for (center, size) in PARTS {
            scene.push_box(&Mat4::from_translation(center), size, &surface);
        }
    }
}
