use rand::Rng;

/// Position in canvas logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    /// Random particle inside a `width` x `height` canvas.
    pub fn spawn<R: Rng + ?Sized>(cfg: &ParticleConfig, width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: (rng.gen::<f64>() - 0.5) * cfg.max_speed * 2.0,
            vy: (rng.gen::<f64>() - 0.5) * cfg.max_speed * 2.0,
            size: lerp(cfg.min_size, cfg.max_size, rng.gen()),
            opacity: lerp(cfg.min_opacity, cfg.max_opacity, rng.gen()),
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        (p.x - self.x).hypot(p.y - self.y)
    }
}

fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo + t * (hi - lo)
}

/// Per-viewport particle parameters. Compact viewports get fewer, larger and
/// more opaque particles with shorter link radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub max_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub connect_distance: f64,
    pub pointer_radius: f64,
}

impl ParticleConfig {
    pub const DESKTOP: ParticleConfig = ParticleConfig {
        count: 80,
        max_speed: 0.4,
        min_size: 1.5,
        max_size: 3.0,
        min_opacity: 0.3,
        max_opacity: 0.8,
        connect_distance: 150.0,
        pointer_radius: 200.0,
    };

    pub const COMPACT: ParticleConfig = ParticleConfig {
        count: 35,
        max_speed: 0.35,
        min_size: 2.0,
        max_size: 3.5,
        min_opacity: 0.45,
        max_opacity: 0.9,
        connect_distance: 110.0,
        pointer_radius: 140.0,
    };

    pub fn for_viewport(compact: bool) -> Self {
        if compact {
            Self::COMPACT
        } else {
            Self::DESKTOP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn spawned_particles_respect_config_ranges() {
        let mut rng = SmallRng::seed_from_u64(11);
        for cfg in [ParticleConfig::DESKTOP, ParticleConfig::COMPACT] {
            for _ in 0..500 {
                let p = Particle::spawn(&cfg, 640.0, 360.0, &mut rng);
                assert!((0.0..=640.0).contains(&p.x));
                assert!((0.0..=360.0).contains(&p.y));
                assert!(p.vx.abs() <= cfg.max_speed);
                assert!(p.vy.abs() <= cfg.max_speed);
                assert!(p.size >= cfg.min_size && p.size <= cfg.max_size);
                assert!(p.opacity >= cfg.min_opacity && p.opacity <= cfg.max_opacity);
            }
        }
    }

    #[test]
    fn compact_table_is_sparser_and_bolder() {
        let d = ParticleConfig::for_viewport(false);
        let c = ParticleConfig::for_viewport(true);
        assert_eq!(d.count, 80);
        assert!(c.count < d.count);
        assert!(c.min_size > d.min_size);
        assert!(c.min_opacity > d.min_opacity);
        assert!(c.connect_distance < d.connect_distance);
        assert!(c.pointer_radius < d.pointer_radius);
    }
}
