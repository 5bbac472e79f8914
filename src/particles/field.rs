use rand::Rng;

use super::particle::{Particle, ParticleConfig, Point};

/// The particle set plus the bounds and pointer it moves against.
#[derive(Debug, Clone)]
pub struct Field {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: ParticleConfig,
    attraction: f64,
    pointer: Option<Point>,
}

impl Field {
    pub fn new(config: ParticleConfig, attraction: f64, width: f64, height: f64) -> Self {
        Self {
            particles: Vec::with_capacity(config.count),
            width,
            height,
            config,
            attraction,
            pointer: None,
        }
    }

    /// Replace the particle set with `config.count` fresh particles for the
    /// given canvas size. The pointer is kept.
    pub fn populate<R: Rng + ?Sized>(&mut self, config: ParticleConfig, width: f64, height: f64, rng: &mut R) {
        self.config = config;
        self.width = width;
        self.height = height;
        self.particles = (0..config.count)
            .map(|_| Particle::spawn(&config, width, height, &mut *rng))
            .collect();
    }

    pub fn from_particles(config: ParticleConfig, attraction: f64, width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            width,
            height,
            config,
            attraction,
            pointer: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Advance every particle by one frame: integrate, reflect at the bounds,
    /// pull toward the pointer, then clamp speed.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        let max_speed = self.config.max_speed;
        let radius = self.config.pointer_radius;

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;

            if p.x < 0.0 {
                p.x = 0.0;
                p.vx = -p.vx;
            }
            if p.x > w {
                p.x = w;
                p.vx = -p.vx;
            }
            if p.y < 0.0 {
                p.y = 0.0;
                p.vy = -p.vy;
            }
            if p.y > h {
                p.y = h;
                p.vy = -p.vy;
            }

            if let Some(ptr) = self.pointer {
                let dx = ptr.x - p.x;
                let dy = ptr.y - p.y;
                let dist = dx.hypot(dy);
                if dist > 0.0 && dist < radius {
                    let force = (radius - dist) / radius * self.attraction;
                    p.vx += dx / dist * force;
                    p.vy += dy / dist * force;
                }
            }

            let speed = p.speed();
            if speed > max_speed {
                p.vx = p.vx / speed * max_speed;
                p.vy = p.vy / speed * max_speed;
            }
        }
    }
}
