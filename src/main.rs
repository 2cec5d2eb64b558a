#[cfg(feature = "sdl")]
use log::debug;
use log::{info, warn};
use nalgebra::Vector2;
use neuralfx::{
    render::{compose_layers, Layer},
    world_gen::entropy_rng,
    BurstConfig, CountUp, Dimensions, Effect, EffectError, FieldConfig, FramePacer,
    FrameScheduler, HostEvents, NodeField, PacerConfig, ParticleBurst, PixelCanvas, PointerState,
    RenderSurface, Rgb, Scheduler,
};
use std::path::Path;
use std::rc::Rc;
use tiny_skia::Pixmap;

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 800;
const PANEL_HEIGHT: u32 = 320;
const BACKGROUND: Rgb = Rgb::new(5, 5, 15);
#[cfg(not(feature = "sdl"))]
const HEADLESS_FRAMES: u64 = 360;

/// The effects of one page, wired to one scheduler and one pointer.
struct Page {
    scheduler: FrameScheduler,
    events: HostEvents,
    viewport: Dimensions,
    hero: Effect<NodeField, PixelCanvas>,
    contact: Effect<ParticleBurst, PixelCanvas>,
    years: Effect<CountUp, PixelCanvas>,
}

impl Page {
    fn mount(viewport: Dimensions) -> Page {
        let scheduler = FrameScheduler::new();
        let ticks: Rc<dyn Scheduler> = Rc::new(scheduler.clone());
        let events = HostEvents::new();

        let mut hero = Effect::mount(
            "node-field",
            NodeField::new(
                viewport,
                FieldConfig::default(),
                PointerState::default(),
                entropy_rng(),
            ),
            RenderSurface::acquire(viewport, PixelCanvas::with_dimensions(viewport)),
            ticks.clone(),
        );
        hero.follow_viewport(&events);
        hero.follow_pointer(&events);

        let panel = Dimensions::new(viewport.width, PANEL_HEIGHT.min(viewport.height));
        let contact = Effect::mount(
            "particle-burst",
            ParticleBurst::new(BurstConfig::default(), entropy_rng()),
            RenderSurface::acquire(panel, PixelCanvas::with_dimensions(panel)),
            ticks.clone(),
        );

        let years = Effect::mount(
            "count-up",
            CountUp::new(12., neuralfx::countup::DEFAULT_DURATION_MS),
            RenderSurface::unavailable(Dimensions::new(0, 0)),
            ticks,
        );

        Page {
            scheduler,
            events,
            viewport,
            hero,
            contact,
            years,
        }
    }

    fn resize(&mut self, viewport: Dimensions) {
        self.viewport = viewport;
        self.events.dispatch_resize(viewport);
    }

    fn frame(&self, timestamp_ms: f64) -> usize {
        self.scheduler.advance_frame(timestamp_ms)
    }

    fn compose(&self) -> Result<Pixmap, EffectError> {
        let hero_opacity = self.hero.layer_opacity();
        self.hero.with_surface(|hero| {
            self.contact.with_surface(|contact| {
                let mut layers = Vec::new();
                if let Some(canvas) = hero.canvas() {
                    layers.push(Layer {
                        canvas,
                        offset: (0, 0),
                        opacity: hero_opacity,
                    });
                }
                if let Some(canvas) = contact.canvas() {
                    layers.push(Layer {
                        canvas,
                        offset: (
                            0,
                            self.viewport.height as i32 - contact.dimensions().height as i32,
                        ),
                        opacity: 1.,
                    });
                }
                compose_layers(self.viewport, BACKGROUND, &layers)
            })
        })
    }

    fn log_summary(&self, frame: u64) {
        let (nodes, edges, fade) = self.hero.with_simulation(|field| {
            (field.nodes().len(), field.edges().count(), field.fade())
        });
        let (state, alive) = self.contact.with_simulation(|burst| (burst.state(), burst.alive()));
        info!(
            "frame {}: {} nodes, {} edges, fade {:.2}; burst {:?} with {} live particles; count {}",
            frame,
            nodes,
            edges,
            fade,
            state,
            alive,
            self.years.value()
        );
    }

    fn unmount(mut self) {
        self.hero.teardown();
        self.contact.teardown();
        self.years.teardown();
        info!(
            "Unmounted page, {} listeners and {} ticks left",
            self.events.listener_count(),
            self.scheduler.pending()
        );
    }
}

#[cfg(not(feature = "sdl"))]
fn run(viewport: Dimensions) {
    let mut page = Page::mount(viewport);
    let mut pacer = FramePacer::new(PacerConfig::default());
    let center = viewport.center();

    for frame in 0..HEADLESS_FRAMES {
        let angle = frame as f64 / 60.;
        page.events
            .dispatch_pointer(center + Vector2::new(angle.cos(), angle.sin()) * 200.);
        if frame == 60 {
            page.contact.activate();
            page.years.activate();
        }
        if frame == 120 && !page.contact.activate() {
            info!("Second burst activation ignored");
        }
        if frame == 180 {
            page.resize(Dimensions::new(viewport.width * 4 / 5, viewport.height * 9 / 10));
        }
        if frame >= 240 {
            page.hero.set_scroll_progress((frame - 240) as f64 / 120.);
        }
        page.frame(pacer.timestamp_ms());
        if frame % 60 == 0 {
            page.log_summary(frame);
        }
        pacer.wait();
    }

    match page.compose() {
        Ok(composed) => {
            let background = (BACKGROUND.r, BACKGROUND.g, BACKGROUND.b);
            let lit = composed
                .pixels()
                .iter()
                .filter(|p| (p.red(), p.green(), p.blue()) != background)
                .count();
            info!("Last frame lit {} of {} pixels", lit, composed.pixels().len());
        }
        Err(err) => warn!("Could not compose the last frame: {}", err),
    }
    if page.contact.with_simulation(|burst| burst.state()) != neuralfx::BurstState::Completed {
        warn!("Burst still running at exit");
    }
    page.unmount();
}

#[cfg(feature = "sdl")]
fn run(viewport: Dimensions) {
    if let Err(err) = run_windowed(viewport) {
        warn!("Window closed: {}", err);
    }
}

#[cfg(feature = "sdl")]
fn run_windowed(viewport: Dimensions) -> Result<(), neuralfx::EffectError> {
    use neuralfx::render::present::{FrameTexture, Window};
    use neuralfx::DisplayConfig;
    use sdl2::event::{Event, WindowEvent};
    use sdl2::keyboard::Keycode;

    let mut window = Window::open(
        "neuralfx",
        &DisplayConfig {
            width: viewport.width,
            height: viewport.height,
        },
    )?;
    let mut event_pump = window.event_pump()?;
    let texture_creator = window.texture_creator();
    let mut texture = FrameTexture::new(&texture_creator);
    let mut page = Page::mount(viewport);
    let mut pacer = FramePacer::new(PacerConfig::default());
    let mut progress = 0.;
    page.years.activate();

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::B),
                    ..
                } => {
                    if !page.contact.activate() {
                        info!("Burst already fired on this mount");
                    }
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Up),
                    ..
                } => {
                    progress = f64::max(0., progress - 0.05);
                    page.hero.set_scroll_progress(progress);
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Down),
                    ..
                } => {
                    progress = f64::min(1., progress + 0.05);
                    page.hero.set_scroll_progress(progress);
                }
                Event::MouseMotion { x, y, .. } => {
                    page.events.dispatch_pointer(Vector2::new(x as f64, y as f64));
                }
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => {
                    page.resize(Dimensions::new(width.max(0) as u32, height.max(0) as u32));
                }
                _ => {}
            }
        }

        page.frame(pacer.timestamp_ms());
        match page.compose() {
            Ok(composed) => window.present(&mut texture, &composed)?,
            Err(err) => debug!("Skipping frame: {}", err),
        }
        pacer.wait();
    }

    page.unmount();
    Ok(())
}

pub fn main() {
    neuralfx::logging::init(Path::new("log4rs.yaml"));
    run(Dimensions::new(WIDTH, HEIGHT));
}
