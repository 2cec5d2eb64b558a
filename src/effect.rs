//! Mounting a simulation on a surface and driving it from a scheduler.
//!
//! An [`Effect`] keeps at most one tick outstanding. Every tick checks the
//! liveness flag first, reads the surface dimensions fresh, steps the
//! simulation, clears the surface and renders. Tearing an effect down cancels
//! its tick and drops its host listeners before returning; a tick that was
//! already on its way out does nothing.

use crate::{
    bounds::Dimensions,
    burst::ParticleBurst,
    countup::CountUp,
    events::{HostEvents, ListenerId},
    field::NodeField,
    render::{Canvas, RenderSurface},
    scheduler::{Scheduler, TicketId},
    simulation::{Frame, Simulation},
};
use log::debug;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct Scene<S, C> {
    simulation: S,
    surface: RenderSurface<C>,
}

struct Shared<S, C> {
    name: &'static str,
    alive: Cell<bool>,
    ticket: Cell<Option<TicketId>>,
    ticks: Cell<u64>,
    scene: RefCell<Scene<S, C>>,
}

pub struct Effect<S: Simulation + 'static, C: Canvas + 'static> {
    shared: Rc<Shared<S, C>>,
    scheduler: Rc<dyn Scheduler>,
    listeners: Vec<(HostEvents, ListenerId)>,
}

fn schedule<S: Simulation + 'static, C: Canvas + 'static>(
    shared: &Rc<Shared<S, C>>,
    scheduler: &Rc<dyn Scheduler>,
) {
    if !shared.alive.get() || shared.ticket.get().is_some() {
        return;
    }
    if !shared.scene.borrow().simulation.is_active() {
        return;
    }
    let weak = Rc::downgrade(shared);
    let next = scheduler.clone();
    let ticket = scheduler.request_tick(Box::new(move |timestamp_ms: f64| {
        if let Some(shared) = weak.upgrade() {
            tick(&shared, &next, timestamp_ms);
        }
    }));
    shared.ticket.set(Some(ticket));
}

fn tick<S: Simulation + 'static, C: Canvas + 'static>(
    shared: &Rc<Shared<S, C>>,
    scheduler: &Rc<dyn Scheduler>,
    timestamp_ms: f64,
) {
    shared.ticket.set(None);
    if !shared.alive.get() {
        return;
    }
    {
        let mut scene = shared.scene.borrow_mut();
        let scene = &mut *scene;
        let frame = Frame {
            dimensions: scene.surface.dimensions(),
            timestamp_ms,
        };
        scene.simulation.step(&frame);
        scene.surface.clear();
        scene.simulation.render(&mut scene.surface);
    }
    shared.ticks.set(shared.ticks.get() + 1);
    schedule(shared, scheduler);
    if shared.ticket.get().is_none() {
        debug!("{} went idle after {} ticks", shared.name, shared.ticks.get());
    }
}

impl<S: Simulation + 'static, C: Canvas + 'static> Effect<S, C> {
    /// Takes ownership of `simulation` and `surface`. An active simulation
    /// gets its first tick requested right away.
    pub fn mount(
        name: &'static str,
        simulation: S,
        surface: RenderSurface<C>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Effect<S, C> {
        debug!("Mounting {}", name);
        let effect = Effect {
            shared: Rc::new(Shared {
                name,
                alive: Cell::new(true),
                ticket: Cell::new(None),
                ticks: Cell::new(0),
                scene: RefCell::new(Scene {
                    simulation,
                    surface,
                }),
            }),
            scheduler,
            listeners: Vec::new(),
        };
        effect.kick();
        effect
    }

    /// Keeps the surface sized to the viewport for as long as the effect is
    /// mounted.
    pub fn follow_viewport(&mut self, events: &HostEvents) {
        let weak: Weak<Shared<S, C>> = Rc::downgrade(&self.shared);
        let id = events.on_resize(move |dimensions: Dimensions| {
            if let Some(shared) = weak.upgrade() {
                if shared.alive.get() {
                    shared.scene.borrow_mut().surface.resize(dimensions);
                }
            }
        });
        self.listeners.push((events.clone(), id));
    }

    /// Requests a tick unless one is already outstanding, the effect was torn
    /// down or the simulation has nothing to do.
    pub fn kick(&self) {
        schedule(&self.shared, &self.scheduler);
    }

    pub fn is_alive(&self) -> bool {
        self.shared.alive.get()
    }

    pub fn has_pending_tick(&self) -> bool {
        self.shared.ticket.get().is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.shared.ticks.get()
    }

    pub fn with_simulation<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.shared.scene.borrow().simulation)
    }

    /// Runs `f` on the simulation, then kicks in case it became active.
    pub fn with_simulation_mut<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        let result = f(&mut self.shared.scene.borrow_mut().simulation);
        self.kick();
        result
    }

    pub fn with_surface<T>(&self, f: impl FnOnce(&RenderSurface<C>) -> T) -> T {
        f(&self.shared.scene.borrow().surface)
    }

    pub fn resize(&self, dimensions: Dimensions) {
        if self.is_alive() {
            self.shared.scene.borrow_mut().surface.resize(dimensions);
        }
    }

    /// Idempotent. Also runs on drop.
    pub fn teardown(&mut self) {
        if !self.shared.alive.replace(false) {
            return;
        }
        if let Some(ticket) = self.shared.ticket.take() {
            self.scheduler.cancel(ticket);
        }
        for (events, id) in self.listeners.drain(..) {
            events.remove(id);
        }
        debug!("Tore down {} after {} ticks", self.shared.name, self.ticks());
    }
}

impl<S: Simulation + 'static, C: Canvas + 'static> Drop for Effect<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<R: Rng + 'static, C: Canvas + 'static> Effect<NodeField<R>, C> {
    /// Feeds pointer moves into the field's pointer state until teardown.
    pub fn follow_pointer(&mut self, events: &HostEvents) {
        if !self.is_alive() {
            return;
        }
        let pointer = self.with_simulation(|field| field.pointer().clone());
        let id = events.on_pointer_move(move |position| pointer.move_to(position));
        self.listeners.push((events.clone(), id));
    }

    pub fn set_scroll_progress(&self, progress: f64) {
        self.with_simulation_mut(|field| field.set_scroll_progress(progress));
    }

    pub fn layer_opacity(&self) -> f64 {
        self.with_simulation(|field| field.layer_opacity())
    }
}

impl<R: Rng + 'static, C: Canvas + 'static> Effect<ParticleBurst<R>, C> {
    /// Starts the burst at the center of the surface as it is sized now.
    /// Only the first call on a mounted burst does anything.
    pub fn activate(&self) -> bool {
        if !self.is_alive() {
            return false;
        }
        let dimensions = self.with_surface(|surface| surface.dimensions());
        self.with_simulation_mut(|burst| burst.activate(dimensions))
    }
}

impl<C: Canvas + 'static> Effect<CountUp, C> {
    pub fn activate(&self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.with_simulation_mut(|count| count.activate())
    }

    pub fn value(&self) -> f64 {
        self.with_simulation(|count| count.value())
    }
}
