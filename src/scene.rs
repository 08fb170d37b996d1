//! Scene: the per-frame draw list.
//!
//! Objects push textured quads and point markers in world space; the scene
//! then projects them through the camera into `DrawOp`s, one per covered
//! cell, each carrying the depth of the surface under that cell.

use glam::{Mat4, Vec2, Vec3};

use crate::assets::Texture;
use crate::camera::Camera;
use crate::types::{DrawOp, Style};

/// Labels sit this far in front of their own surface.
const LABEL_BIAS: f32 = 0.01;
/// Markers sit this far in front of whatever they mark.
const MARKER_BIAS: f32 = 0.5;

/// Which side of a quad is discarded. The front side is the one from which
/// the corners appear counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cull {
    None,
    Back,
    Front,
}

/// What a quad looks like on the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub ch: char,
    pub style: Style,
    pub label: Option<String>,
}

impl Surface {
    pub fn new(ch: char, style: Style) -> Self {
        Surface {
            ch,
            style,
            label: None,
        }
    }

    pub fn from_texture(texture: &Texture) -> Self {
        let (ch, style) = texture.fill();
        Surface {
            ch,
            style,
            label: texture.caption().map(str::to_string),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Surface as seen without any light on it.
    pub fn unlit(mut self) -> Self {
        self.style.dim = true;
        self.style.bold = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Quad {
    pub corners: [Vec3; 4],
    pub surface: Surface,
    pub cull: Cull,
}

#[derive(Debug, Clone)]
pub struct Marker {
    pub position: Vec3,
    pub ch: char,
    pub style: Style,
}

#[derive(Debug, Default)]
pub struct Scene {
    pub quads: Vec<Quad>,
    pub markers: Vec<Marker>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
        self.markers.clear();
    }

    /// Push a `width` × `height` rectangle lying in the local XY plane with
    /// its lower-left corner at `origin`, facing local +Z.
    pub fn push_rect(
        &mut self,
        transform: &Mat4,
        origin: Vec3,
        width: f32,
        height: f32,
        surface: Surface,
        cull: Cull,
    ) {
        let local = [
            origin,
            origin + Vec3::new(width, 0.0, 0.0),
            origin + Vec3::new(width, height, 0.0),
            origin + Vec3::new(0.0, height, 0.0),
        ];
        self.quads.push(Quad {
            corners: local.map(|p| transform.transform_point3(p)),
            surface,
            cull,
        });
    }

    /// Push the six faces of a box of `size` centred on the local origin.
    /// Only the +Z face carries the surface's label.
    pub fn push_box(&mut self, transform: &Mat4, size: Vec3, surface: &Surface) {
        let h = size * 0.5;
        let faces = [
            // +Z
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
            ],
            // -Z
            [
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
            ],
            // +X
            [
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, h.z),
            ],
            // -X
            [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, -h.z),
            ],
            // +Y
            [
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
            ],
            // -Y
            [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(-h.x, -h.y, h.z),
            ],
        ];
        for (i, face) in faces.into_iter().enumerate() {
            let mut surface = surface.clone();
            if i > 0 {
                surface.label = None;
            }
            self.quads.push(Quad {
                corners: face.map(|p| transform.transform_point3(p)),
                surface,
                cull: Cull::None,
            });
        }
    }

    pub fn push_marker(&mut self, position: Vec3, ch: char, style: Style) {
        self.markers.push(Marker {
            position,
            ch,
            style,
        });
    }

    /// Project everything through `camera`.
    pub fn rasterize(&self, camera: &Camera) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        for quad in &self.quads {
            rasterize_quad(quad, camera, &mut ops);
        }
        for marker in &self.markers {
            if let Some(p) = camera.project(marker.position) {
                if let Some((x, y)) = cell_of(p.screen, camera) {
                    ops.push(DrawOp {
                        x,
                        y,
                        ch: marker.ch,
                        style: marker.style.clone(),
                        depth: p.depth - MARKER_BIAS,
                    });
                }
            }
        }
        ops
    }
}

fn cell_of(screen: Vec2, camera: &Camera) -> Option<(u16, u16)> {
    let vp = camera.viewport();
    if screen.x < 0.0 || screen.y < 0.0 {
        return None;
    }
    let (x, y) = (screen.x.floor(), screen.y.floor());
    if x >= vp.width as f32 || y >= vp.height as f32 {
        return None;
    }
    Some((x as u16, y as u16))
}

/// Shoelace area in screen space (y down): negative when the corners run
/// counter-clockwise in world space, i.e. the front side faces the camera.
fn signed_area(points: &[Vec2; 4]) -> f32 {
    let mut sum = 0.0;
    for i in 0..4 {
        let a = points[i];
        let b = points[(i + 1) % 4];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

fn contains(points: &[Vec2; 4], p: Vec2) -> bool {
    let mut sign = 0.0_f32;
    for i in 0..4 {
        let a = points[i];
        let b = points[(i + 1) % 4];
        let cross = (b - a).perp_dot(p - a);
        if cross.abs() < f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Depth of the quad's plane under a canvas point.
fn depth_at(quad: &Quad, camera: &Camera, screen: Vec2) -> Option<f32> {
    let [c0, c1, _, c3] = quad.corners;
    let normal = (c1 - c0).cross(c3 - c0);
    let ray = camera.view_direction(screen);
    let denom = normal.dot(ray);
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let t = normal.dot(c0 - camera.position()) / denom;
    (t > 0.0).then_some(t)
}

fn rasterize_quad(quad: &Quad, camera: &Camera, ops: &mut Vec<DrawOp>) {
    let mut screen = [Vec2::ZERO; 4];
    for (i, corner) in quad.corners.iter().enumerate() {
        match camera.project(*corner) {
            Some(p) => screen[i] = p.screen,
            None => return,
        }
    }

    let area = signed_area(&screen);
    if area.abs() < 1e-3 {
        return;
    }
    match quad.cull {
        Cull::Back if area > 0.0 => return,
        Cull::Front if area < 0.0 => return,
        _ => {}
    }

    let vp = camera.viewport();
    let min = screen.iter().fold(Vec2::splat(f32::MAX), |m, p| m.min(*p));
    let max = screen.iter().fold(Vec2::splat(f32::MIN), |m, p| m.max(*p));
    let x0 = min.x.floor().max(0.0) as u16;
    let y0 = min.y.floor().max(0.0) as u16;
    let x1 = (max.x.ceil().min(vp.width as f32)).max(0.0) as u16;
    let y1 = (max.y.ceil().min(vp.height as f32)).max(0.0) as u16;

    for y in y0..y1 {
        for x in x0..x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if !contains(&screen, p) {
                continue;
            }
            if let Some(depth) = depth_at(quad, camera, p) {
                ops.push(DrawOp {
                    x,
                    y,
                    ch: quad.surface.ch,
                    style: quad.surface.style.clone(),
                    depth,
                });
            }
        }
    }

    if let Some(label) = &quad.surface.label {
        let centre = screen.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / 4.0;
        let len = label.chars().count() as f32;
        let row = centre.y.floor();
        let start = (centre.x - len / 2.0).floor();
        for (i, ch) in label.chars().enumerate() {
            let p = Vec2::new(start + i as f32 + 0.5, row + 0.5);
            if !contains(&screen, p) {
                continue;
            }
            let Some((x, y)) = cell_of(p, camera) else {
                continue;
            };
            if let Some(depth) = depth_at(quad, camera, p) {
                ops.push(DrawOp {
                    x,
                    y,
                    ch,
                    style: Style {
                        bold: true,
                        ..quad.surface.style.clone()
                    },
                    depth: depth - LABEL_BIAS,
                });
            }
        }
    }
}
