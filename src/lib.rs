pub mod advance;
pub mod bounds;
pub mod burst;
pub mod countup;
pub mod effect;
pub mod error;
pub mod events;
pub mod field;
pub mod forces;
pub mod logging;
pub mod node;
pub mod particle;
pub mod pointer;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod world_gen;

pub use bounds::Dimensions;
pub use burst::{BurstConfig, BurstState, ParticleBurst};
pub use countup::CountUp;
pub use effect::Effect;
pub use error::EffectError;
pub use events::{HostEvents, ListenerId};
pub use field::{FieldConfig, NodeField};
pub use pointer::PointerState;
pub use render::{Canvas, DisplayConfig, PixelCanvas, RecordingCanvas, RenderSurface, Rgb};
pub use scheduler::{FramePacer, FrameScheduler, PacerConfig, Scheduler, TicketId};
pub use simulation::{Frame, Simulation};
