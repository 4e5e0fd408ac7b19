//! Animation frame scheduling.
//!
//! Tasks run once per host animation frame until they report
//! [`FrameStatus::Done`]. A task that is done is simply never stepped again;
//! there is no separate cancel path.

use crate::dom::Document;

/// Outcome of a single frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Step again on the next frame.
    Continue,
    /// Finished; drop the task.
    Done,
}

/// Work driven by animation frames.
pub trait FrameTask {
    /// Advance the task to `timestamp` (milliseconds, host clock).
    fn step(&mut self, document: &mut Document, timestamp: f64) -> FrameStatus;
}

/// Queue of frame tasks, stepped in request order.
#[derive(Default)]
pub struct FrameScheduler {
    tasks: Vec<Box<dyn FrameTask>>,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to start on the next frame.
    pub fn request(&mut self, task: Box<dyn FrameTask>) {
        self.tasks.push(task);
    }

    /// Number of tasks waiting for a frame.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Step every pending task once.
    ///
    /// Each task runs to completion before the next one starts. Returns the
    /// number of tasks still scheduled afterwards.
    pub fn run_frame(&mut self, document: &mut Document, timestamp: f64) -> usize {
        self.frames += 1;
        let mut tasks = std::mem::take(&mut self.tasks);
        tasks.retain_mut(|task| task.step(document, timestamp) == FrameStatus::Continue);

        // Anything requested while stepping runs next frame, after survivors
        tasks.append(&mut self.tasks);
        self.tasks = tasks;
        self.tasks.len()
    }
}
