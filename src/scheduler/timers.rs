//! One-shot timers on a host-driven millisecond clock.
//!
//! The queue never reads a wall clock. The host calls
//! [`TimerQueue::advance_to`] and receives every payload whose deadline has
//! passed, ordered by deadline and then by scheduling order.

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: u64,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire `payload` once `delay_ms` have elapsed.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due: self.now.saturating_add(delay_ms),
            payload,
        });
        id
    }

    /// Cancel a pending timer, returning its payload.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let position = self.timers.iter().position(|timer| timer.id == id)?;
        Some(self.timers.remove(position).payload)
    }

    /// Move the clock forward and collect due payloads.
    ///
    /// The clock never runs backwards; an earlier `now` is ignored.
    pub fn advance_to(&mut self, now: u64) -> Vec<T> {
        self.now = self.now.max(now);

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|timer| timer.due <= self.now);
        self.timers = pending;

        due.sort_by_key(|timer| (timer.due, timer.id));
        due.into_iter().map(|timer| timer.payload).collect()
    }

    /// Pop the earliest payload due at or before `until`, moving the clock
    /// to its deadline. Once nothing is due the clock rests at `until`.
    ///
    /// Lets a handler schedule follow-ups that still fire within the same
    /// advance, timed from the deadline that triggered them.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index);

        match position {
            Some(index) => {
                let timer = self.timers.remove(index);
                self.now = self.now.max(timer.due);
                Some(timer.payload)
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}
