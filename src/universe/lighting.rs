use glam::Vec3;

/// Opening angle of the spotlight placed inside a selected box, in degrees.
pub const SPOTLIGHT_CUTOFF: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct PointLight {
    pub name: &'static str,
    pub position: Vec3,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct Spotlight {
    pub position: Vec3,
    pub target: Vec3,
    pub cutoff: f32,
    pub enabled: bool,
}

impl Spotlight {
    /// Whether `point` lies inside the cone.
    pub fn illuminates(&self, point: Vec3) -> bool {
        if !self.enabled {
            return false;
        }
        let axis = (self.target - self.position).normalize_or_zero();
        let to_point = (point - self.position).normalize_or_zero();
        if to_point == Vec3::ZERO {
            return true;
        }
        axis.angle_between(to_point).to_degrees() <= self.cutoff
    }
}

/// Lights around the statuette, plus the spotlight used inside a box.
#[derive(Debug, Clone)]
pub struct Lighting {
    statuette: Vec<PointLight>,
    spotlight: Spotlight,
}

impl Default for Lighting {
    fn default() -> Self {
        let light = |name, x, y, z| PointLight {
            name,
            position: Vec3::new(x, y, z),
            enabled: true,
        };
        Lighting {
            statuette: vec![
                light("face", 0.0, 160.0, 300.0),
                light("body", 0.0, 0.0, 300.0),
                light("head right", 100.0, 250.0, 100.0),
                light("head left", -100.0, 250.0, 100.0),
                light("body right", 150.0, 30.0, 50.0),
                light("body left", -150.0, 30.0, 50.0),
                light("base", 200.0, -200.0, 100.0),
            ],
            spotlight: Spotlight {
                position: Vec3::ZERO,
                target: Vec3::NEG_Z,
                cutoff: SPOTLIGHT_CUTOFF,
                enabled: false,
            },
        }
    }
}

impl Lighting {
    /// Statuette lights off, spotlight at the box centre aimed at its front face.
    pub fn enter_box(&mut self, box_center: Vec3) {
        for light in &mut self.statuette {
            light.enabled = false;
        }
        self.spotlight.position = box_center;
        self.spotlight.target = box_center - Vec3::Z;
        self.spotlight.enabled = true;
    }

    pub fn leave_box(&mut self) {
        for light in &mut self.statuette {
            light.enabled = true;
        }
        self.spotlight.enabled = false;
    }

    pub fn ambient_enabled(&self) -> bool {
        self.statuette.iter().any(|l| l.enabled)
    }

    pub fn statuette_lights(&self) -> &[PointLight] {
        &self.statuette
    }

    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_a_box_swaps_lights() {
        let mut lighting = Lighting::default();
        assert!(lighting.ambient_enabled());
        assert!(!lighting.spotlight().enabled);

        let center = Vec3::new(450.0, 0.0, 0.0);
        lighting.enter_box(center);
        assert!(!lighting.ambient_enabled());
        assert!(lighting.spotlight().enabled);
        assert_eq!(lighting.spotlight().position, center);
        assert!(lighting.spotlight().illuminates(center + Vec3::new(0.0, 0.0, -50.0)));
        assert!(!lighting.spotlight().illuminates(center + Vec3::new(0.0, 0.0, 50.0)));

        lighting.leave_box();
        assert!(lighting.statuette_lights().iter().all(|l| l.enabled));
        assert!(!lighting.spotlight().enabled);
    }
}
