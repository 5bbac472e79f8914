use hero_site::config::ParticleTuning;
use hero_site::particles::{
    draw, Animation, CanvasGeometry, Field, FrameScheduler, Particle, ParticleConfig, Point, Rgba,
    Surface,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Line { from: Point, to: Point, color: Rgba, width: f64 },
    Disc { center: Point, radius: f64, color: Rgba },
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.ops.push(Op::Clear);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.ops.push(Op::Line { from, to, color, width });
    }

    fn disc(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(Op::Disc { center, radius, color });
    }
}

#[derive(Default)]
struct Frames {
    next: u32,
    pending: Option<u32>,
    requests: usize,
}

impl FrameScheduler for Frames {
    type Handle = u32;

    fn request(&mut self) -> Option<u32> {
        self.next += 1;
        self.requests += 1;
        self.pending = Some(self.next);
        Some(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        assert_eq!(self.pending, Some(handle));
        self.pending = None;
    }
}

fn particle(x: f64, y: f64) -> Particle {
    Particle { x, y, vx: 0.0, vy: 0.0, size: 2.0, opacity: 0.6 }
}

#[test]
fn reflection_and_speed_invariants_hold_over_many_frames() {
    let mut rng = SmallRng::seed_from_u64(42);
    for compact in [false, true] {
        let cfg = ParticleConfig::for_viewport(compact);
        let mut field = Field::new(cfg, 0.01, 320.0, 240.0);
        field.populate(cfg, 320.0, 240.0, &mut rng);
        for frame in 0..2_000 {
            if frame % 50 == 0 {
                let p = Point::new(rng.gen_range(-50.0..370.0), rng.gen_range(-50.0..290.0));
                field.set_pointer(Some(p));
            }
            if frame % 333 == 0 {
                field.set_pointer(None);
            }
            field.step();
            for p in field.particles() {
                assert!(p.x >= 0.0 && p.x <= 320.0, "x out of bounds: {}", p.x);
                assert!(p.y >= 0.0 && p.y <= 240.0, "y out of bounds: {}", p.y);
                assert!(p.speed() <= cfg.max_speed + 1e-9);
            }
        }
    }
}

#[test]
fn frame_draws_links_then_discs() {
    let cfg = ParticleConfig::DESKTOP;
    // a-b are 100 apart (linked), c is far from both.
    let field = Field::from_particles(
        cfg,
        0.01,
        800.0,
        600.0,
        vec![particle(100.0, 100.0), particle(200.0, 100.0), particle(700.0, 500.0)],
    );
    let mut rec = Recorder::default();
    draw(&field, &mut rec);

    assert_eq!(rec.ops[0], Op::Clear);
    let lines: Vec<_> = rec.ops.iter().filter(|op| matches!(op, Op::Line { .. })).collect();
    assert_eq!(lines.len(), 1);
    match lines[0] {
        Op::Line { color, width, .. } => {
            assert!((color.a - (1.0 - 100.0 / 150.0) * 0.3).abs() < 1e-12);
            assert_eq!(*width, 0.8);
        }
        _ => unreachable!(),
    }

    let discs: Vec<_> = rec.ops.iter().filter(|op| matches!(op, Op::Disc { .. })).collect();
    assert_eq!(discs.len(), 6);
    // Glow first, then the core on top.
    match (discs[0], discs[1]) {
        (Op::Disc { radius: glow_r, color: glow, .. }, Op::Disc { radius: core_r, color: core, .. }) => {
            assert_eq!(*glow_r, 4.0);
            assert_eq!(*core_r, 2.0);
            assert!((glow.a - 0.6 * 0.15).abs() < 1e-12);
            assert_eq!(core.a, 0.6);
        }
        _ => unreachable!(),
    }
    let first_disc = rec.ops.iter().position(|op| matches!(op, Op::Disc { .. })).unwrap();
    assert!(rec.ops[first_disc..].iter().all(|op| matches!(op, Op::Disc { .. })));
}

#[test]
fn pointer_links_only_when_pointer_present() {
    let cfg = ParticleConfig::DESKTOP;
    let mut field = Field::from_particles(cfg, 0.01, 800.0, 600.0, vec![particle(100.0, 100.0)]);

    let mut rec = Recorder::default();
    draw(&field, &mut rec);
    assert!(!rec.ops.iter().any(|op| matches!(op, Op::Line { .. })));

    field.set_pointer(Some(Point::new(150.0, 100.0)));
    let mut rec = Recorder::default();
    draw(&field, &mut rec);
    let line = rec.ops.iter().find(|op| matches!(op, Op::Line { .. })).unwrap();
    match line {
        Op::Line { to, color, width, .. } => {
            assert_eq!(*to, Point::new(150.0, 100.0));
            assert_eq!((color.r, color.g, color.b), (150, 210, 255));
            assert!((color.a - 0.75 * 0.5).abs() < 1e-12);
            assert_eq!(*width, 1.0);
        }
        _ => unreachable!(),
    }
}

#[test]
fn visibility_pauses_and_resumes_loop() {
    let geometry = CanvasGeometry::new(1024.0, 600.0, 2.0);
    let mut anim = Animation::new(Frames::default(), geometry, false, 0.01, 3);
    let mut rec = Recorder::default();

    anim.start();
    anim.tick(&mut rec);
    anim.tick(&mut rec);
    assert_eq!(anim.scheduler().requests, 3);

    anim.set_visible(false);
    assert!(!anim.is_running());
    assert_eq!(anim.scheduler().pending, None);

    // Late tick after cancellation draws nothing and schedules nothing.
    let drawn = rec.ops.len();
    anim.tick(&mut rec);
    assert_eq!(rec.ops.len(), drawn);
    assert_eq!(anim.scheduler().requests, 3);

    anim.set_visible(true);
    anim.set_visible(true);
    assert!(anim.is_running());
    assert_eq!(anim.scheduler().requests, 4);
}

#[test]
fn resize_to_compact_viewport_rebuilds_with_fewer_particles() {
    let tuning = ParticleTuning::default();
    let desktop = CanvasGeometry::new(1024.0, 768.0, 1.0);
    let mut anim = Animation::new(Frames::default(), desktop, tuning.is_compact(1024.0), tuning.attraction, 9);
    anim.start();
    assert_eq!(anim.field().particles().len(), 80);

    let phone = CanvasGeometry::new(400.0, 700.0, 3.0);
    anim.rebuild(phone, tuning.is_compact(400.0));

    assert_eq!(anim.field().particles().len(), ParticleConfig::COMPACT.count);
    assert_eq!(anim.field().size(), (400.0, 700.0));
    assert_eq!(anim.geometry().backing_size(), (1200, 2100));
    assert!(anim.is_running());
    for p in anim.field().particles() {
        assert!(p.x <= 400.0 && p.y <= 700.0);
    }
}

#[test]
fn rebuild_keeps_stopped_loop_stopped() {
    let mut anim = Animation::new(Frames::default(), CanvasGeometry::new(800.0, 600.0, 1.0), false, 0.01, 5);
    anim.rebuild(CanvasGeometry::new(1280.0, 720.0, 1.0), false);
    assert!(!anim.is_running());
    assert_eq!(anim.scheduler().requests, 0);
}
