//! Frame loop, timer and listener bookkeeping.
//!
//! The simulation never talks to a display or a window directly. Each loop
//! subscribes to a [`TickScheduler`] and only runs while its handle is live;
//! cancelling the handle is what makes a late frame a no-op. Timers and
//! event listeners are tracked the same way so teardown can prove nothing
//! is left registered.

use std::collections::{BTreeMap, BTreeSet};

/// Subscription to the per-frame tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickHandle(u64);

/// One-shot timeout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// Host mechanism that calls loops before each repaint and fires timeouts.
pub trait TickScheduler {
    fn subscribe(&mut self) -> TickHandle;
    fn unsubscribe(&mut self, handle: TickHandle);
    fn is_subscribed(&self, handle: TickHandle) -> bool;

    fn set_timeout(&mut self, now_ms: f64, delay_ms: f64) -> TimerHandle;
    fn clear_timeout(&mut self, handle: TimerHandle);
    /// Remove and return every timeout due at `now_ms`, earliest first.
    fn take_expired(&mut self, now_ms: f64) -> Vec<TimerHandle>;

    fn subscription_count(&self) -> usize;
    fn pending_timeouts(&self) -> usize;
}

/// In-memory scheduler driven by whoever calls the scene's `frame`.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    ticks: BTreeSet<TickHandle>,
    timeouts: BTreeMap<TimerHandle, f64>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl TickScheduler for FrameScheduler {
    fn subscribe(&mut self) -> TickHandle {
        let handle = TickHandle(self.next());
        self.ticks.insert(handle);
        handle
    }

    fn unsubscribe(&mut self, handle: TickHandle) {
        self.ticks.remove(&handle);
    }

    fn is_subscribed(&self, handle: TickHandle) -> bool {
        self.ticks.contains(&handle)
    }

    fn set_timeout(&mut self, now_ms: f64, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next());
        self.timeouts.insert(handle, now_ms + delay_ms.max(0.0));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timeouts.remove(&handle);
    }

    fn take_expired(&mut self, now_ms: f64) -> Vec<TimerHandle> {
        let mut due: Vec<(TimerHandle, f64)> = self
            .timeouts
            .iter()
            .filter(|(_, at)| **at <= now_ms)
            .map(|(h, at)| (*h, *at))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        for (handle, _) in &due {
            self.timeouts.remove(handle);
        }
        due.into_iter().map(|(h, _)| h).collect()
    }

    fn subscription_count(&self) -> usize {
        self.ticks.len()
    }

    fn pending_timeouts(&self) -> usize {
        self.timeouts.len()
    }
}

/// Host events the scene can listen for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    PointerMove,
    PointerUp,
    PointerLeave,
    Scroll,
    Resize,
}

/// Which host events are currently registered. Events of other kinds are
/// dropped before they reach the simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListenerSet {
    active: BTreeSet<EventKind>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EventKind) {
        if self.active.insert(kind) {
            log::trace!("listening for {kind:?}");
        }
    }

    pub fn remove(&mut self, kind: EventKind) {
        if self.active.remove(&kind) {
            log::trace!("stopped listening for {kind:?}");
        }
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.active.iter().copied()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribed_handle_is_dead() {
        let mut s = FrameScheduler::new();
        let a = s.subscribe();
        let b = s.subscribe();
        s.unsubscribe(a);
        assert!(!s.is_subscribed(a));
        assert!(s.is_subscribed(b));
        assert_eq!(s.subscription_count(), 1);
    }

    #[test]
    fn timeouts_fire_once_in_order() {
        let mut s = FrameScheduler::new();
        let late = s.set_timeout(0.0, 100.0);
        let early = s.set_timeout(0.0, 10.0);
        let cleared = s.set_timeout(0.0, 5.0);
        s.clear_timeout(cleared);
        assert!(s.take_expired(9.0).is_empty());
        assert_eq!(s.take_expired(150.0), vec![early, late]);
        assert!(s.take_expired(200.0).is_empty());
        assert_eq!(s.pending_timeouts(), 0);
    }
}
