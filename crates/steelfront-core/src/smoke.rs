use steelfront_protocol::Vec2;

/// A time-bounded smoke cloud.
#[derive(Clone, Debug)]
pub struct SmokeCloud {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub remaining: f32,
}

/// Owns every active smoke cloud of one match.
#[derive(Debug, Default)]
pub struct SmokeManager {
    clouds: Vec<SmokeCloud>,
    next_id: u32,
}

impl SmokeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy(&mut self, center: Vec2, radius: f32, duration: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.clouds.push(SmokeCloud {
            id,
            center,
            radius,
            remaining: duration,
        });
        id
    }

    /// Decay cloud lifetimes and drop expired clouds.
    pub fn update(&mut self, dt: f32) {
        for cloud in &mut self.clouds {
            cloud.remaining -= dt;
        }
        self.clouds.retain(|c| c.remaining > 0.0);
    }

    pub fn is_point_obscured(&self, p: Vec2) -> bool {
        self.clouds.iter().any(|c| c.center.distance(p) <= c.radius)
    }

    /// Coarse line-of-fire check: either endpoint or the midpoint sitting in
    /// smoke obscures the shot.
    pub fn is_line_obscured(&self, from: Vec2, to: Vec2) -> bool {
        self.is_point_obscured(from)
            || self.is_point_obscured(to)
            || self.is_point_obscured(from.midpoint(to))
    }

    pub fn clouds(&self) -> &[SmokeCloud] {
        &self.clouds
    }
}
