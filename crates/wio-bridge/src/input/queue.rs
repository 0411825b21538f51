use std::collections::VecDeque;

use crate::bridge::protocol::Event;

/// The flat scalar queue the guest drains.
/// Host callbacks push whole events; the guest pulls one scalar at a time.
pub struct EventQueue {
    scalars: VecDeque<f64>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scalars: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an event: its tag, then all of its operands.
    pub fn push(&mut self, event: Event) {
        log::trace!("enqueue {:?}", event);
        event.encode(&mut self.scalars);
    }

    /// Take the next scalar, tag or operand alike.
    pub fn pull(&mut self) -> Option<f64> {
        self.scalars.pop_front()
    }

    /// Take the next scalar as an integer. An empty queue yields 0.
    pub fn pull_int(&mut self) -> i32 {
        self.pull().map_or(0, |v| v as i32)
    }

    /// Take the next scalar as a float. An empty queue yields NaN.
    pub fn pull_float(&mut self) -> f32 {
        self.pull().map_or(f32::NAN, |v| v as f32)
    }

    /// Remove and return every pending scalar.
    pub fn drain(&mut self) -> Vec<f64> {
        self.scalars.drain(..).collect()
    }

    /// Iterate over pending scalars without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.scalars.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Number of pending scalars (not events).
    pub fn len(&self) -> usize {
        self.scalars.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
