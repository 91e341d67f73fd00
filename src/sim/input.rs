//! Held-key tracking and host events
//!
//! Key handlers and resize handlers never touch the scene directly. They
//! post `HostEvent`s into a mailbox that the frame driver drains at the
//! start of each tick, so input is read exactly once per tick.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

pub const KEY_UP: &str = "ArrowUp";
pub const KEY_DOWN: &str = "ArrowDown";
pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";

/// Events raised by the host between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    KeyDown(String),
    KeyUp(String),
    Resize { width: u32, height: u32 },
    /// Pointer drag over the foreground canvas, in pixels
    PointerDrag { dx: f32, dy: f32 },
}

/// Which keys are currently held. Last write wins; nothing times out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    held: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, key: &str, held: bool) {
        self.held.insert(key.to_string(), held);
    }

    /// Unknown keys read as not held
    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    #[inline]
    pub fn up(&self) -> bool {
        self.is_held(KEY_UP)
    }

    #[inline]
    pub fn down(&self) -> bool {
        self.is_held(KEY_DOWN)
    }

    #[inline]
    pub fn left(&self) -> bool {
        self.is_held(KEY_LEFT)
    }

    #[inline]
    pub fn right(&self) -> bool {
        self.is_held(KEY_RIGHT)
    }
}

/// FIFO of host events waiting for the next tick
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: VecDeque<HostEvent>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, event: HostEvent) {
        self.queue.push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_not_held() {
        let input = InputState::new();
        assert!(!input.is_held("ArrowUp"));
        assert!(!input.is_held("q"));
    }

    #[test]
    fn test_held_until_released() {
        let mut input = InputState::new();
        input.set_held(KEY_DOWN, true);
        assert!(input.down());
        assert!(!input.up());

        input.set_held(KEY_DOWN, true);
        assert!(input.down());

        input.set_held(KEY_DOWN, false);
        assert!(!input.down());
    }

    #[test]
    fn test_mailbox_fifo() {
        let mut mailbox = Mailbox::new();
        mailbox.post(HostEvent::KeyDown(KEY_LEFT.into()));
        mailbox.post(HostEvent::KeyUp(KEY_LEFT.into()));
        mailbox.post(HostEvent::Resize { width: 800, height: 600 });
        assert_eq!(mailbox.len(), 3);

        let events: Vec<HostEvent> = mailbox.drain().collect();
        assert_eq!(events[0], HostEvent::KeyDown(KEY_LEFT.into()));
        assert_eq!(events[2], HostEvent::Resize { width: 800, height: 600 });
        assert!(mailbox.is_empty());
    }
}
