use glam::{Vec2, Vec3};

/// Gap between the outer and the inner box, on every axis.
pub const INNER_MARGIN: f32 = 0.2;
/// Face textures sit this far in front of the inner box's wall.
pub const FACE_OFFSET: f32 = 0.3;
/// Height of the trailer relative to its width.
pub const TRAILER_ASPECT: f32 = 0.56;

/// Dimensions of a film box, derived once from its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub outer: Vec3,
    pub inner: Vec3,
    /// Lower-left corner of every face texture, in the face's own frame.
    pub texture_pos: Vec3,
    pub texture_size: Vec2,
    pub trailer_size: Vec2,
}

impl BoxGeometry {
    pub fn new(width: f32) -> Self {
        let outer = Vec3::new(width, width * 1.5, width);
        let inner = outer - Vec3::splat(INNER_MARGIN);
        BoxGeometry {
            outer,
            inner,
            texture_pos: Vec3::new(
                -inner.x / 2.0 * 0.8,
                -inner.y / 2.0 * 0.8,
                FACE_OFFSET - inner.z / 2.0,
            ),
            texture_size: Vec2::new(inner.x * 0.8, inner.y * 0.8),
            trailer_size: Vec2::new(inner.x, inner.x * TRAILER_ASPECT),
        }
    }

    /// Distance from the box centre to the plane of the face textures.
    pub fn face_depth(&self) -> f32 {
        self.texture_pos.z
    }
}
