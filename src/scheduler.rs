//! Next-frame callbacks.
//!
//! [`Scheduler`] is the single primitive the effects rely on: run a callback
//! before the next display refresh. [`FrameScheduler`] is the in-process
//! implementation used both by the demo loop and by tests, which step it by
//! hand. [`FramePacer`] keeps the demo loop from spinning faster than the
//! display would.

use fnv::FnvHashMap;
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketId(u64);

/// Receives the frame timestamp in milliseconds.
pub type TickCallback = Box<dyn FnOnce(f64)>;

pub trait Scheduler {
    fn request_tick(&self, callback: TickCallback) -> TicketId;
    /// Cancelling a ticket that already ran or was cancelled does nothing.
    fn cancel(&self, ticket: TicketId);
}

#[derive(Default)]
struct Queue {
    next_ticket: u64,
    frames: u64,
    pending: FnvHashMap<TicketId, TickCallback>,
}

/// Single-threaded frame queue. Clones share the same queue.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl FrameScheduler {
    pub fn new() -> FrameScheduler {
        FrameScheduler::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    pub fn frames(&self) -> u64 {
        self.queue.borrow().frames
    }

    /// Runs the callbacks that were pending when the frame started, oldest
    /// first. Callbacks requested while the frame runs wait for the next one.
    /// Returns how many callbacks ran.
    pub fn advance_frame(&self, timestamp_ms: f64) -> usize {
        let mut due: Vec<TicketId> = {
            let mut queue = self.queue.borrow_mut();
            queue.frames += 1;
            queue.pending.keys().copied().collect()
        };
        due.sort();
        let mut ran = 0;
        for ticket in due {
            // Looked up one at a time so a callback can cancel a later one.
            let callback = self.queue.borrow_mut().pending.remove(&ticket);
            if let Some(callback) = callback {
                callback(timestamp_ms);
                ran += 1;
            }
        }
        trace!("Frame {} ran {} callbacks", self.frames(), ran);
        ran
    }
}

impl Scheduler for FrameScheduler {
    fn request_tick(&self, callback: TickCallback) -> TicketId {
        let mut queue = self.queue.borrow_mut();
        let ticket = TicketId(queue.next_ticket);
        queue.next_ticket += 1;
        queue.pending.insert(ticket, callback);
        ticket
    }

    fn cancel(&self, ticket: TicketId) {
        self.queue.borrow_mut().pending.remove(&ticket);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacerConfig {
    pub frame_time_cap: Duration,
}

impl Default for PacerConfig {
    fn default() -> Self {
        PacerConfig {
            frame_time_cap: Duration::from_millis(16),
        }
    }
}

/// Sleeps out the rest of each frame so frames start at least
/// `frame_time_cap` apart.
pub struct FramePacer {
    config: PacerConfig,
    started: Instant,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(config: PacerConfig) -> FramePacer {
        let now = Instant::now();
        FramePacer {
            config,
            started: now,
            last_frame: now,
        }
    }

    /// Milliseconds since the pacer was created.
    pub fn timestamp_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.
    }

    pub fn wait(&mut self) {
        let frame_time = self.last_frame.elapsed();
        debug!("Frame time: {}", frame_time.as_millis());
        let to_sleep = self.config.frame_time_cap.saturating_sub(frame_time);
        std::thread::sleep(to_sleep);
        self.last_frame = Instant::now();
    }
}
