//! Scheduler Module - host-driven time primitives
//!
//! - **Frames** - per-animation-frame tasks
//! - **Timers** - one-shot deadlines on a millisecond clock
//! - **Debounce** - trailing-edge event coalescing
//!
//! Nothing here spawns threads or reads the wall clock. The host advances
//! time explicitly, which keeps every animation deterministic under test.

mod debounce;
mod frames;
mod timers;

pub use debounce::Debouncer;
pub use frames::{FrameScheduler, FrameStatus, FrameTask};
pub use timers::{TimerId, TimerQueue};
