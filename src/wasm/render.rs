use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, TouchEvent, Window,
};

use super::dom::listen;
use super::timer::Debounce;
use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::particles::{Animation, CanvasGeometry, FrameScheduler, Point, Rgba, Surface};

/// `Surface` backed by a 2d canvas context. Coordinates are logical pixels;
/// the context transform carries the device pixel ratio.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn disc(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.set_fill_style_str(&color.to_string());
            self.ctx.fill();
        }
    }
}

/// `requestAnimationFrame` scheduler. `frame` holds the per-frame closure so
/// it can be created after the animation it drives and re-requested from
/// inside itself.
struct RafScheduler {
    window: Window,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request(&mut self) -> Option<i32> {
        let frame = self.frame.borrow();
        let callback = frame.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        if self.window.cancel_animation_frame(handle).is_err() {
            log::warn!("cancelAnimationFrame failed for frame {handle}");
        }
    }
}

type SharedAnimation = Rc<RefCell<Animation<RafScheduler>>>;

/// Read-only view of a running particle network. The listeners keep the
/// animation alive; dropping this handle does not stop anything.
pub struct ParticleNetwork {
    anim: SharedAnimation,
}

impl ParticleNetwork {
    pub fn pointer(&self) -> Option<Point> {
        self.anim.borrow().field().pointer()
    }

    pub fn particle_count(&self) -> usize {
        self.anim.borrow().field().particles().len()
    }

    pub fn geometry(&self) -> CanvasGeometry {
        self.anim.borrow().geometry()
    }

    pub fn is_running(&self) -> bool {
        self.anim.borrow().is_running()
    }
}

/// Start the hero particle network: size the canvas, build the field, hook up
/// pointer, resize and visibility handling, then start the frame loop.
pub fn start(window: &Window, document: &Document, config: &SiteConfig) -> Result<ParticleNetwork> {
    let sel = &config.selectors;
    let tuning = config.particles;

    let canvas = document
        .get_element_by_id(sel.canvas_id)
        .ok_or(SiteError::MissingElement(sel.canvas_id))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SiteError::MissingElement(sel.canvas_id))?;
    let hero = document
        .get_element_by_id(sel.hero_id)
        .ok_or(SiteError::MissingElement(sel.hero_id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::MissingElement(sel.hero_id))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(SiteError::MissingContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SiteError::MissingContext)?;

    let geometry = measure(window, &hero);
    apply_geometry(&canvas, &ctx, geometry)?;

    let frame = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window: window.clone(),
        frame: frame.clone(),
    };
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let anim: SharedAnimation = Rc::new(RefCell::new(Animation::new(
        scheduler,
        geometry,
        tuning.is_compact(viewport_width(window)),
        tuning.attraction,
        seed,
    )));

    {
        let anim = anim.clone();
        let mut surface = CanvasSurface::new(ctx.clone());
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            anim.borrow_mut().tick(&mut surface);
        }) as Box<dyn FnMut()>));
    }

    watch_pointer(&hero, &canvas, &anim, tuning.touch_release_ms)?;

    // Resize: every event replaces the pending rebuild, so only the last one fires.
    {
        let rebuild = Debounce::new();
        let anim = anim.clone();
        let window_ = window.clone();
        let (hero, canvas, ctx) = (hero.clone(), canvas.clone(), ctx.clone());
        listen(window.as_ref(), "resize", true, move |_| {
            let anim = anim.clone();
            let window = window_.clone();
            let hero = hero.clone();
            let canvas = canvas.clone();
            let ctx = ctx.clone();
            rebuild.schedule(tuning.resize_debounce_ms, move || {
                let geometry = measure(&window, &hero);
                if let Err(err) = apply_geometry(&canvas, &ctx, geometry) {
                    log::warn!("canvas resize failed: {err}");
                }
                anim.borrow_mut()
                    .rebuild(geometry, tuning.is_compact(viewport_width(&window)));
            });
        })?;
    }

    observe_visibility(&hero, &anim)?;

    anim.borrow_mut().start();
    log::info!("Particle network animation initialized.");
    Ok(ParticleNetwork { anim })
}

fn watch_pointer(hero: &HtmlElement, canvas: &HtmlCanvasElement, anim: &SharedAnimation, release_ms: u32) -> Result<()> {
    let release = Debounce::new();

    {
        let anim = anim.clone();
        let canvas = canvas.clone();
        listen(hero.as_ref(), "mousemove", true, move |event: Event| {
            if let Some(e) = event.dyn_ref::<MouseEvent>() {
                let p = to_canvas(&canvas, e.client_x(), e.client_y());
                anim.borrow_mut().set_pointer(Some(p));
            }
        })?;
    }
    {
        let anim = anim.clone();
        listen(hero.as_ref(), "mouseleave", true, move |_| {
            anim.borrow_mut().set_pointer(None);
        })?;
    }

    for name in ["touchstart", "touchmove"] {
        let anim = anim.clone();
        let canvas = canvas.clone();
        let release = release.clone();
        listen(hero.as_ref(), name, true, move |event: Event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.touches().get(0));
            if let Some(t) = touch {
                release.cancel();
                let p = to_canvas(&canvas, t.client_x(), t.client_y());
                anim.borrow_mut().set_pointer(Some(p));
            }
        })?;
    }

    for name in ["touchend", "touchcancel"] {
        let anim = anim.clone();
        let release = release.clone();
        listen(hero.as_ref(), name, true, move |_| {
            let anim = anim.clone();
            release.schedule(release_ms, move || {
                anim.borrow_mut().set_pointer(None);
            });
        })?;
    }
    Ok(())
}

/// Pause the loop while the hero is scrolled out of view.
fn observe_visibility(hero: &HtmlElement, anim: &SharedAnimation) -> Result<()> {
    let anim = anim.clone();
    let on_change = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let latest = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .last();
            if let Some(entry) = latest {
                anim.borrow_mut().set_visible(entry.is_intersecting());
            }
        },
    );

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(0.0));
    let observer = IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &opts)?;
    observer.observe(hero);
    on_change.forget();
    Ok(())
}

fn measure(window: &Window, hero: &HtmlElement) -> CanvasGeometry {
    CanvasGeometry::new(
        hero.offset_width() as f64,
        hero.offset_height() as f64,
        window.device_pixel_ratio(),
    )
}

/// Size the backing store for the pixel ratio and scale drawing back to
/// logical pixels. Setting the size resets the transform, so both go together.
fn apply_geometry(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, g: CanvasGeometry) -> Result<()> {
    let (w, h) = g.backing_size();
    canvas.set_width(w);
    canvas.set_height(h);
    ctx.set_transform(g.dpr, 0.0, 0.0, g.dpr, 0.0, 0.0)?;
    Ok(())
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn to_canvas(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}
