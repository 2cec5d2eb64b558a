use nalgebra::Vector2;
use neuralfx::render::DrawCommand;
use neuralfx::world_gen::seeded_rng;
use neuralfx::{
    Dimensions, Effect, EffectError, FieldConfig, FrameScheduler, HostEvents, NodeField,
    PixelCanvas, PointerState, RecordingCanvas, RenderSurface, Scheduler, TicketId,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

const VIEWPORT: Dimensions = Dimensions {
    width: 480,
    height: 360,
};

/// Scheduler whose `cancel` is a no-op, so already-requested ticks still fire.
#[derive(Clone, Default)]
struct StubbornScheduler {
    inner: FrameScheduler,
    cancels: Rc<RefCell<Vec<TicketId>>>,
}

impl Scheduler for StubbornScheduler {
    fn request_tick(&self, callback: neuralfx::scheduler::TickCallback) -> TicketId {
        self.inner.request_tick(callback)
    }

    fn cancel(&self, ticket: TicketId) {
        self.cancels.borrow_mut().push(ticket);
    }
}

fn field(pointer: PointerState, seed: u64) -> NodeField {
    NodeField::new(VIEWPORT, FieldConfig::default(), pointer, seeded_rng(seed))
}

#[test]
fn stale_tick_after_teardown_draws_nothing() {
    let scheduler = StubbornScheduler::default();
    let mut effect = Effect::mount(
        "field",
        field(PointerState::default(), 1),
        RenderSurface::new(VIEWPORT, RecordingCanvas::default()),
        Rc::new(scheduler.clone()),
    );
    scheduler.inner.advance_frame(16.);
    let commands = effect.with_surface(|s| s.canvas().unwrap().commands.len());
    let positions = effect.with_simulation(|f| f.nodes().to_vec());

    effect.teardown();
    assert_eq!(scheduler.cancels.borrow().len(), 1);
    assert_eq!(scheduler.inner.pending(), 1);
    scheduler.inner.advance_frame(32.);

    assert_eq!(effect.ticks(), 1);
    assert_eq!(effect.with_surface(|s| s.canvas().unwrap().commands.len()), commands);
    assert_eq!(effect.with_simulation(|f| f.nodes().to_vec()), positions);
    assert_eq!(scheduler.inner.pending(), 0);
}

#[test]
fn missing_surface_still_steps_physics() {
    let scheduler = FrameScheduler::new();
    let surface = RenderSurface::<PixelCanvas>::acquire(
        VIEWPORT,
        Err(EffectError::SurfaceUnavailable("2d context refused".to_string())),
    );
    let effect = Effect::mount(
        "field",
        field(PointerState::default(), 2),
        surface,
        Rc::new(scheduler.clone()),
    );
    let before = effect.with_simulation(|f| f.nodes().to_vec());
    for frame in 1..=5 {
        scheduler.advance_frame(frame as f64 * 16.);
    }
    let after = effect.with_simulation(|f| f.nodes().to_vec());
    assert_eq!(effect.ticks(), 5);
    assert_ne!(before, after);
    assert!(!effect.with_surface(|s| s.is_available()));
}

#[test]
fn resize_takes_effect_on_the_next_tick() {
    let scheduler = FrameScheduler::new();
    let events = HostEvents::new();
    let mut effect = Effect::mount(
        "field",
        field(PointerState::default(), 3),
        RenderSurface::new(VIEWPORT, RecordingCanvas::default()),
        Rc::new(scheduler.clone()),
    );
    effect.follow_viewport(&events);
    scheduler.advance_frame(16.);

    let smaller = Dimensions::new(120, 90);
    events.dispatch_resize(smaller);
    scheduler.advance_frame(32.);

    let commands = effect.with_surface(|s| s.canvas().unwrap().commands.clone());
    assert_eq!(commands[0], DrawCommand::Reallocate(VIEWPORT));
    assert!(commands.contains(&DrawCommand::Reallocate(smaller)));
    let nodes = effect.with_simulation(|f| f.nodes().to_vec());
    assert_eq!(nodes.len(), 14);
    for node in nodes.iter().filter(|n| n.position.x > 120.) {
        assert!(node.velocity.x <= 0.);
    }
}

#[test]
fn one_pointer_feeds_every_field() {
    let scheduler = FrameScheduler::new();
    let events = HostEvents::new();
    let pointer = PointerState::default();
    let writer = pointer.clone();
    events.on_pointer_move(move |position| writer.move_to(position));

    let corner = vec![neuralfx::node::Node {
        position: Vector2::new(10., 10.),
        velocity: Vector2::zeros(),
        radius: 1.,
        opacity: 1.,
    }];
    let mount = |pointer: PointerState| {
        Effect::mount(
            "field",
            NodeField::from_nodes(corner.clone(), FieldConfig::default(), pointer, seeded_rng(0)),
            RenderSurface::new(VIEWPORT, RecordingCanvas::default()),
            Rc::new(scheduler.clone()) as Rc<dyn Scheduler>,
        )
    };
    let a = mount(pointer.clone());
    let b = mount(pointer);

    events.dispatch_pointer(Vector2::new(20., 20.));
    scheduler.advance_frame(16.);

    for effect in [&a, &b] {
        let node = effect.with_simulation(|f| f.nodes()[0]);
        assert!(node.velocity.x < 0. && node.velocity.y < 0.);
    }
}

#[test]
fn fully_scrolled_field_only_clears() {
    let scheduler = FrameScheduler::new();
    let effect = Effect::mount(
        "field",
        field(PointerState::default(), 4),
        RenderSurface::new(VIEWPORT, RecordingCanvas::default()),
        Rc::new(scheduler.clone()),
    );
    effect.set_scroll_progress(0.5);
    assert_eq!(effect.layer_opacity(), 0.);
    for frame in 1..=3 {
        scheduler.advance_frame(frame as f64 * 16.);
    }
    effect.with_surface(|s| {
        let canvas = s.canvas().unwrap();
        assert_eq!(canvas.draw_calls(), 0);
        assert_eq!(canvas.clears(), 3);
    });
}

#[test]
fn pixel_surface_shows_the_field() {
    let scheduler = FrameScheduler::new();
    let effect = Effect::mount(
        "field",
        field(PointerState::default(), 5),
        RenderSurface::new(VIEWPORT, PixelCanvas::default()),
        Rc::new(scheduler.clone()),
    );
    scheduler.advance_frame(16.);
    let lit = effect.with_surface(|s| s.canvas().unwrap().lit_pixels());
    assert!(lit > 0);
}

#[test]
fn zero_sized_canvas_leaves_the_field_running_undrawn() {
    let scheduler = FrameScheduler::new();
    let empty = Dimensions::new(0, 0);
    let effect = Effect::mount(
        "field",
        field(PointerState::default(), 6),
        RenderSurface::acquire(empty, PixelCanvas::with_dimensions(empty)),
        Rc::new(scheduler.clone()),
    );
    assert!(!effect.with_surface(|s| s.is_available()));
    scheduler.advance_frame(16.);
    assert_eq!(effect.ticks(), 1);
}
