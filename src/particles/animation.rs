use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::field::Field;
use super::particle::{ParticleConfig, Point};
use super::render::{self, CanvasGeometry, Surface};

/// Source of animation-frame callbacks. In the browser this wraps
/// `requestAnimationFrame` / `cancelAnimationFrame`.
pub trait FrameScheduler {
    type Handle;

    /// Schedule the next tick. `None` means the host refused.
    fn request(&mut self) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug, PartialEq)]
pub enum LoopState<H> {
    Stopped,
    Running(H),
}

/// Particle network driver: owns the field, the render loop state and the
/// scheduler. At most one frame is pending while running.
pub struct Animation<S: FrameScheduler> {
    field: Field,
    geometry: CanvasGeometry,
    state: LoopState<S::Handle>,
    scheduler: S,
    rng: SmallRng,
}

impl<S: FrameScheduler> Animation<S> {
    pub fn new(scheduler: S, geometry: CanvasGeometry, compact: bool, attraction: f64, seed: u64) -> Self {
        let config = ParticleConfig::for_viewport(compact);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut field = Field::new(config, attraction, geometry.width, geometry.height);
        field.populate(config, geometry.width, geometry.height, &mut rng);
        Self {
            field,
            geometry,
            state: LoopState::Stopped,
            scheduler,
            rng,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.schedule();
    }

    pub fn stop(&mut self) {
        if let LoopState::Running(handle) = std::mem::replace(&mut self.state, LoopState::Stopped) {
            self.scheduler.cancel(handle);
        }
    }

    /// Intersection callback: run only while the hero is on screen.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.field.set_pointer(pointer);
    }

    /// Rebuild the particle set for a new canvas size. The loop keeps its
    /// running/stopped state.
    pub fn rebuild(&mut self, geometry: CanvasGeometry, compact: bool) {
        self.geometry = geometry;
        let config = ParticleConfig::for_viewport(compact);
        self.field
            .populate(config, geometry.width, geometry.height, &mut self.rng);
        log::debug!(
            "particle field rebuilt: {} particles at {}x{}",
            config.count,
            geometry.width,
            geometry.height
        );
    }

    /// One animation frame: update, draw, schedule the next. A stale tick
    /// arriving after `stop` is ignored.
    pub fn tick<D: Surface + ?Sized>(&mut self, surface: &mut D) {
        if !self.is_running() {
            return;
        }
        self.field.step();
        render::draw(&self.field, surface);
        self.schedule();
    }

    fn schedule(&mut self) {
        self.state = match self.scheduler.request() {
            Some(handle) => LoopState::Running(handle),
            None => {
                log::warn!("animation frame request refused; particle loop stopped");
                LoopState::Stopped
            }
        };
    }
}
