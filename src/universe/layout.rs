use glam::Vec3;

/// Distance of the boxes from the statuette.
pub const RING_RADIUS: f32 = 450.0;

/// Boxes spread evenly on a circle in the XY plane around the origin.
#[derive(Debug, Clone)]
pub struct RingLayout {
    radius: f32,
    /// Rotation of the whole ring in degrees.
    scroll_step: f32,
    scrolling: bool,
}

impl RingLayout {
    pub fn new(radius: f32) -> Self {
        RingLayout {
            radius,
            scroll_step: 0.0,
            scrolling: false,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn angle_offset(count: usize) -> f32 {
        if count == 0 { 0.0 } else { 360.0 / count as f32 }
    }

    /// Angle in degrees of each box, in draw order.
    pub fn angles(&self, count: usize) -> Vec<f32> {
        let offset = Self::angle_offset(count);
        let mut angle = self.scroll_step;
        let mut angles = Vec::with_capacity(count);
        for _ in 0..count {
            angles.push(angle);
            angle += offset;
        }
        angles
    }

    pub fn positions(&self, count: usize) -> Vec<Vec3> {
        self.angles(count)
            .into_iter()
            .map(|a| {
                let rad = a.to_radians();
                Vec3::new(rad.cos() * self.radius, rad.sin() * self.radius, 0.0)
            })
            .collect()
    }

    pub fn scroll_step(&self) -> f32 {
        self.scroll_step
    }

    /// Turn the ring. Selection is held off until the next frame.
    pub fn scroll_by(&mut self, degrees: f32) {
        self.scroll_step = (self.scroll_step + degrees).rem_euclid(360.0);
        self.scrolling = true;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn end_frame(&mut self) {
        self.scrolling = false;
    }
}
