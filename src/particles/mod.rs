//! Decorative particle network drawn behind the hero section.

mod animation;
mod field;
mod particle;
mod render;

pub use animation::{Animation, FrameScheduler, LoopState};
pub use field::Field;
pub use particle::{Particle, ParticleConfig, Point};
pub use render::{draw, CanvasGeometry, Rgba, Surface};
