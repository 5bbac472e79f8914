use std::fmt;

use super::field::Field;
use super::particle::Point;

const PARTICLE_RGB: (u8, u8, u8) = (100, 180, 255);
const POINTER_LINK_RGB: (u8, u8, u8) = (150, 210, 255);
const LINK_ALPHA: f64 = 0.3;
const LINK_WIDTH: f64 = 0.8;
const POINTER_LINK_ALPHA: f64 = 0.5;
const POINTER_LINK_WIDTH: f64 = 1.0;
const GLOW_SCALE: f64 = 2.0;
const GLOW_ALPHA: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    fn new((r, g, b): (u8, u8, u8), a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// CSS `rgba()` notation, ready for `fillStyle` / `strokeStyle`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Something that can take 2D drawing in logical pixels.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64);
    fn disc(&mut self, center: Point, radius: f64, color: Rgba);
}

/// Logical canvas size and the device pixel ratio used for the backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl CanvasGeometry {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        // Some embedded browsers report 0.
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { width, height, dpr }
    }

    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round().max(0.0) as u32,
            (self.height * self.dpr).round().max(0.0) as u32,
        )
    }
}

/// Draw one frame: pair links, pointer links, then glow and core discs.
pub fn draw<S: Surface + ?Sized>(field: &Field, surface: &mut S) {
    let (w, h) = field.size();
    surface.clear(w, h);

    let cfg = field.config();
    let ps = field.particles();

    for (i, a) in ps.iter().enumerate() {
        for b in &ps[i + 1..] {
            let dist = a.distance_to(b.pos());
            if dist < cfg.connect_distance {
                let alpha = (1.0 - dist / cfg.connect_distance) * LINK_ALPHA;
                surface.line(a.pos(), b.pos(), Rgba::new(PARTICLE_RGB, alpha), LINK_WIDTH);
            }
        }
    }

    if let Some(ptr) = field.pointer() {
        for p in ps {
            let dist = p.distance_to(ptr);
            if dist < cfg.pointer_radius {
                let alpha = (1.0 - dist / cfg.pointer_radius) * POINTER_LINK_ALPHA;
                surface.line(p.pos(), ptr, Rgba::new(POINTER_LINK_RGB, alpha), POINTER_LINK_WIDTH);
            }
        }
    }

    for p in ps {
        surface.disc(p.pos(), p.size * GLOW_SCALE, Rgba::new(PARTICLE_RGB, p.opacity * GLOW_ALPHA));
        surface.disc(p.pos(), p.size, Rgba::new(PARTICLE_RGB, p.opacity));
    }
}
