//! `WaitingQueue` — strict FIFO of customer arrival ticks.

use std::collections::VecDeque;

use ts_core::Tick;

/// Customers waiting for the server, oldest first.
///
/// Each entry is the tick the customer arrived.  Customers arriving in the
/// same tick keep generation order.  Because the clock only moves forward,
/// the front entry always has the smallest arrival tick.
#[derive(Clone, Debug, Default)]
pub struct WaitingQueue {
    inner:    VecDeque<Tick>,
    enqueued: u64,
    dequeued: u64,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` customers stamped with `tick`.
    pub fn push_arrivals(&mut self, tick: Tick, count: u32) {
        debug_assert!(
            self.inner.back().is_none_or(|&last| last <= tick),
            "arrivals must be enqueued in tick order"
        );
        self.inner.extend(std::iter::repeat_n(tick, count as usize));
        self.enqueued += count as u64;
    }

    /// Remove and return the oldest customer's arrival tick.
    pub fn pop_oldest(&mut self) -> Option<Tick> {
        let tick = self.inner.pop_front()?;
        self.dequeued += 1;
        Some(tick)
    }

    /// Arrival tick of the customer at the head of the queue.
    pub fn oldest(&self) -> Option<Tick> {
        self.inner.front().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Customers ever enqueued.
    pub fn enqueued(&self) -> u64 {
        self.enqueued
    }

    /// Customers ever dequeued into service.
    pub fn dequeued(&self) -> u64 {
        self.dequeued
    }

    pub fn iter(&self) -> impl Iterator<Item = Tick> + '_ {
        self.inner.iter().copied()
    }
}
