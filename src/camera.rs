//! Perspective camera projecting world space onto the character grid.
//!
//! The camera never turns: it always looks down the negative Z axis with Y
//! up, so moving it is the only way to change the view. Screen coordinates
//! are canvas cells, x to the right and y downwards, measured to cell
//! corners (the centre of cell `(c, r)` is `(c + 0.5, r + 0.5)`).

use glam::{Vec2, Vec3};

use crate::geometry::Ray;
use crate::types::Viewport;

/// Vertical field of view in degrees.
const FOV_Y: f32 = 60.0;
/// Geometry nearer than this (along the view axis) is not drawn.
pub const NEAR_PLANE: f32 = 10.0;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// A point projected onto the canvas, with its distance along the view axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    pub depth: f32,
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    viewport: Viewport,
}

impl Camera {
    pub fn new(position: Vec3, viewport: Viewport) -> Self {
        Camera { position, viewport }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Rows per world unit at distance 1.
    fn focal(&self) -> f32 {
        (self.viewport.height as f32 / 2.0) / (FOV_Y.to_radians() / 2.0).tan()
    }

    fn center(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width as f32 / 2.0,
            self.viewport.height as f32 / 2.0,
        )
    }

    /// Project a world point. Points behind the near plane yield `None`.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        let rel = world - self.position;
        let depth = -rel.z;
        if depth < NEAR_PLANE {
            return None;
        }
        let f = self.focal();
        let c = self.center();
        Some(Projected {
            screen: Vec2::new(
                c.x + rel.x / depth * f * CELL_ASPECT,
                c.y - rel.y / depth * f,
            ),
            depth,
        })
    }

    pub fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        self.project(world).map(|p| p.screen)
    }

    /// Direction through a canvas point, scaled so that it advances one unit
    /// along the view axis.
    pub fn view_direction(&self, screen: Vec2) -> Vec3 {
        let f = self.focal();
        let c = self.center();
        Vec3::new(
            (screen.x - c.x) / (f * CELL_ASPECT),
            -(screen.y - c.y) / f,
            -1.0,
        )
    }

    /// Ray from the camera through a canvas point.
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        Ray::new(self.position, self.view_direction(screen))
    }
}

/// Exponential approach of the camera towards a target, one step per frame.
#[derive(Debug, Clone)]
pub struct CameraTween {
    target: Vec3,
    factor: f32,
    epsilon: f32,
    moving: bool,
}

impl CameraTween {
    pub fn new(target: Vec3, factor: f32, epsilon: f32) -> Self {
        CameraTween {
            target,
            factor,
            epsilon,
            moving: false,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn start(&mut self, target: Vec3) {
        self.target = target;
        self.moving = true;
    }

    /// Move the camera one step towards the target. Returns `true` on the
    /// frame where every axis first falls within epsilon of the target.
    pub fn step(&mut self, camera: &mut Camera) -> bool {
        if !self.moving {
            return false;
        }
        let next = camera.position().lerp(self.target, self.factor);
        camera.set_position(next);

        let gap = (next - self.target).abs();
        if gap.x < self.epsilon && gap.y < self.epsilon && gap.z < self.epsilon {
            self.moving = false;
            return true;
        }
        false
    }
}
