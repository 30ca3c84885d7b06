//! Simulation world: cylindrical pillars on an open floor.
//!
//! All world coordinates are millimeters; angles are radians, CCW from +X.

/// A cylindrical obstacle.
#[derive(Debug, Clone, Copy)]
pub struct Pillar {
    pub x_mm: f32,
    pub y_mm: f32,
    pub radius_mm: f32,
}

impl Pillar {
    pub fn new(x_mm: f32, y_mm: f32, radius_mm: f32) -> Self {
        Self {
            x_mm,
            y_mm,
            radius_mm,
        }
    }
}

/// Static obstacle map for the mock robot.
#[derive(Debug, Clone, Default)]
pub struct SimWorld {
    pillars: Vec<Pillar>,
}

impl SimWorld {
    pub fn new(pillars: Vec<Pillar>) -> Self {
        Self { pillars }
    }

    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    /// Cast a ray from `(x, y)` along `angle_rad` and return the distance to
    /// the first pillar surface, or `max_range_mm` on a miss.
    pub fn ray_cast(&self, x: f32, y: f32, angle_rad: f32, max_range_mm: f32) -> f32 {
        let (dir_x, dir_y) = (angle_rad.cos(), angle_rad.sin());
        let mut nearest = max_range_mm;

        for pillar in &self.pillars {
            let oc_x = pillar.x_mm - x;
            let oc_y = pillar.y_mm - y;

            // Project pillar center onto the ray
            let along = oc_x * dir_x + oc_y * dir_y;
            if along < 0.0 {
                continue; // Behind the ray origin
            }

            let center_sq = oc_x * oc_x + oc_y * oc_y;
            let perp_sq = center_sq - along * along;
            let r_sq = pillar.radius_mm * pillar.radius_mm;
            if perp_sq > r_sq {
                continue; // Ray passes beside the pillar
            }

            let hit = along - (r_sq - perp_sq).sqrt();
            if hit >= 0.0 && hit < nearest {
                nearest = hit;
            }
        }

        nearest
    }

    /// Find the pillar whose surface is within `clearance_mm` of `(x, y)`,
    /// if any. Returns the pillar and the center-to-center distance.
    pub fn contact(&self, x: f32, y: f32, clearance_mm: f32) -> Option<(&Pillar, f32)> {
        let mut best: Option<(&Pillar, f32)> = None;

        for pillar in &self.pillars {
            let dx = pillar.x_mm - x;
            let dy = pillar.y_mm - y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < pillar.radius_mm + clearance_mm {
                match best {
                    Some((_, d)) if d <= dist => {}
                    _ => best = Some((pillar, dist)),
                }
            }
        }

        best
    }
}
