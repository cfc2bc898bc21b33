// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss timers.
//!
//! Every timed notification owns exactly one deadline in a side-table
//! keyed by its id. Nothing fires on its own: the host advances time by
//! asking for the expired entries (renderer tick or the tokio driver).

use super::notification::NotificationId;
use std::collections::HashMap;
use std::time::Instant;

/// Pending auto-dismiss deadlines, keyed by notification.
#[derive(Debug, Default, Clone)]
pub struct TimerTable {
    deadlines: HashMap<NotificationId, Instant>,
}

impl TimerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or re-arms) the timer for `id`.
    pub fn arm(&mut self, id: NotificationId, deadline: Instant) {
        self.deadlines.insert(id, deadline);
    }

    /// Cancels the timer for `id`. Returns `true` if one was pending.
    pub fn cancel(&mut self, id: NotificationId) -> bool {
        self.deadlines.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    #[must_use]
    pub fn is_armed(&self, id: NotificationId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes and returns every timer due at `now`, earliest first.
    ///
    /// Ties are broken by id so creation order is preserved.
    pub fn take_expired(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut due: Vec<(Instant, NotificationId)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort_unstable();

        for (_, id) in &due {
            self.deadlines.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn take_expired_returns_only_due_timers() {
        let mut timers = TimerTable::new();
        let now = Instant::now();
        let early = NotificationId::new();
        let late = NotificationId::new();
        timers.arm(early, now + Duration::from_millis(100));
        timers.arm(late, now + Duration::from_millis(500));

        assert!(timers.take_expired(now).is_empty());
        assert_eq!(
            timers.take_expired(now + Duration::from_millis(100)),
            vec![early]
        );
        assert!(!timers.is_armed(early));
        assert!(timers.is_armed(late));
    }

    #[test]
    fn take_expired_orders_by_deadline_then_id() {
        let mut timers = TimerTable::new();
        let now = Instant::now();
        let a = NotificationId::new();
        let b = NotificationId::new();
        let c = NotificationId::new();
        timers.arm(c, now + Duration::from_millis(10));
        timers.arm(b, now + Duration::from_millis(50));
        timers.arm(a, now + Duration::from_millis(50));

        assert_eq!(
            timers.take_expired(now + Duration::from_secs(1)),
            vec![c, a, b]
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn cancel_reports_whether_timer_was_pending() {
        let mut timers = TimerTable::new();
        let id = NotificationId::new();
        timers.arm(id, Instant::now());

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
    }

    #[test]
    fn next_deadline_is_the_earliest() {
        let mut timers = TimerTable::new();
        let now = Instant::now();
        assert_eq!(timers.next_deadline(), None);

        timers.arm(NotificationId::new(), now + Duration::from_secs(8));
        timers.arm(NotificationId::new(), now + Duration::from_secs(5));
        assert_eq!(timers.next_deadline(), Some(now + Duration::from_secs(5)));
    }
}
