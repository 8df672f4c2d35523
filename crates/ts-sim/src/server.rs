//! The single server and its remaining-busy-time counter.

/// Derived server state: `Busy` iff remaining busy time is positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Busy,
}

/// One turnstile.
///
/// `remaining_busy` is in minutes and never negative.  At most one customer
/// is in service at a time.
#[derive(Clone, Debug, Default)]
pub struct Server {
    remaining_busy: f64,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> ServerState {
        if self.is_busy() { ServerState::Busy } else { ServerState::Idle }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.remaining_busy > 0.0
    }

    /// Minutes left on the current customer (0 when idle).
    #[inline]
    pub fn remaining_busy(&self) -> f64 {
        self.remaining_busy
    }

    /// Spend one minute of service, clamped at zero.
    #[inline]
    pub fn tick_down(&mut self) {
        self.remaining_busy = (self.remaining_busy - 1.0).max(0.0);
    }

    /// Begin serving a customer for `duration` minutes.
    ///
    /// A duration of exactly 0 is legal: the server reports idle again at the
    /// next observation.
    ///
    /// # Panics
    /// Panics if `duration` is negative or not finite: a service-time
    /// generator contract violation, not a recoverable condition.
    pub fn begin(&mut self, duration: f64) {
        assert!(
            duration.is_finite() && duration >= 0.0,
            "service-time generator returned invalid duration {duration}"
        );
        self.remaining_busy = duration;
    }
}
