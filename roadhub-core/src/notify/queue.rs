//! Fixed-capacity notification pool

use heapless::Vec;

use super::message::{Message, Severity};
use crate::config::NotificationConfig;

/// Slots in the pool
pub const NOTIFICATION_CAPACITY: usize = 5;

/// One timed alert
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    pub message: Message,
    pub severity: Severity,
    pub created_at_ms: u32,
    pub active: bool,
    /// Insertion order, breaks creation-time ties
    pub seq: u32,
}

impl Notification {
    /// Milliseconds since creation
    pub fn age_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.created_at_ms)
    }
}

/// Bounded set of notifications with oldest-first eviction
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    slots: [Notification; NOTIFICATION_CAPACITY],
    expiry_ms: u32,
    next_seq: u32,
    dirty: bool,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}

impl NotificationQueue {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            slots: Default::default(),
            expiry_ms: config.expiry_ms,
            next_seq: 0,
            dirty: false,
        }
    }

    /// Add a notification
    ///
    /// Takes the first free slot. When all slots are active the oldest
    /// notification is overwritten.
    pub fn push(&mut self, message: impl Into<Message>, severity: Severity, now_ms: u32) {
        let index = match self.slots.iter().position(|n| !n.active) {
            Some(free) => free,
            None => self.oldest_index(now_ms),
        };

        self.slots[index] = Notification {
            message: message.into(),
            severity,
            created_at_ms: now_ms,
            active: true,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.dirty = true;
    }

    /// Slot holding the oldest active notification
    ///
    /// Age is measured against `now_ms` so ordering survives timer wrap.
    fn oldest_index(&self, now_ms: u32) -> usize {
        let mut oldest = 0;
        for (i, n) in self.slots.iter().enumerate().skip(1) {
            let best = &self.slots[oldest];
            let (age, best_age) = (n.age_ms(now_ms), best.age_ms(now_ms));
            if age > best_age || (age == best_age && n.seq < best.seq) {
                oldest = i;
            }
        }
        oldest
    }

    /// Expire old notifications
    ///
    /// Returns true if anything was deactivated.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        let mut expired = false;
        for n in self.slots.iter_mut().filter(|n| n.active) {
            if n.age_ms(now_ms) > self.expiry_ms {
                n.active = false;
                expired = true;
            }
        }
        if expired {
            self.dirty = true;
        }
        expired
    }

    /// Up to `n` active notifications, newest first
    pub fn active_top(&self, n: usize) -> Vec<&Notification, NOTIFICATION_CAPACITY> {
        let mut active: Vec<&Notification, NOTIFICATION_CAPACITY> =
            self.slots.iter().filter(|s| s.active).collect();
        active.sort_unstable_by(|a, b| b.seq.cmp(&a.seq));
        active.truncate(n);
        active
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|n| n.active).count()
    }

    /// Check if the visible set changed since the last redraw
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}
