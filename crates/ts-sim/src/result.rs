//! Per-run output: the observation series, waiting times, and aggregates.

use ts_core::Tick;

/// One row of the per-tick series, recorded after steps ①–③.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub tick:         Tick,
    pub queue_length: usize,
    pub server_busy:  bool,
}

/// Everything a finished run produced.  Immutable once built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// One entry per tick, in tick order.
    pub observations: Vec<Observation>,
    /// Waiting time (minutes) of each customer that began service, in service
    /// order.
    pub waits: Vec<u64>,
    /// Customers enqueued over the whole run.
    pub arrived: u64,
    /// Customers that began service.  `arrived - served` were still queued
    /// at the end of the run and have no waiting-time sample.
    pub served: u64,
}

impl RunResult {
    /// Queue length at the final tick (0 for an empty run).
    pub fn final_queue_length(&self) -> usize {
        self.observations.last().map_or(0, |o| o.queue_length)
    }

    pub fn queue_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.observations.iter().map(|o| o.queue_length)
    }

    pub fn busy_flags(&self) -> impl Iterator<Item = bool> + '_ {
        self.observations.iter().map(|o| o.server_busy)
    }

    /// Derive the scalar aggregates.
    pub fn summary(&self) -> RunSummary {
        let ticks = self.observations.len();
        let (queue_total, max_queue_length, busy_ticks) = self.observations.iter().fold(
            (0u64, 0usize, 0u64),
            |(total, max, busy), o| {
                (total + o.queue_length as u64, max.max(o.queue_length), busy + o.server_busy as u64)
            },
        );
        let per_tick = |x: u64| if ticks == 0 { 0.0 } else { x as f64 / ticks as f64 };

        let mean_wait = if self.waits.is_empty() {
            None
        } else {
            Some(self.waits.iter().sum::<u64>() as f64 / self.waits.len() as f64)
        };

        RunSummary {
            ticks: ticks as u64,
            arrived: self.arrived,
            served: self.served,
            left_in_queue: self.final_queue_length() as u64,
            mean_queue_length: per_tick(queue_total),
            max_queue_length,
            mean_wait,
            max_wait: self.waits.iter().copied().max(),
            utilization: per_tick(busy_ticks),
        }
    }
}

/// Scalar aggregates of one [`RunResult`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub ticks:             u64,
    pub arrived:           u64,
    pub served:            u64,
    /// Customers truncated at the run boundary.
    pub left_in_queue:     u64,
    pub mean_queue_length: f64,
    pub max_queue_length:  usize,
    /// `None` when nobody was served.
    pub mean_wait:         Option<f64>,
    pub max_wait:          Option<u64>,
    /// Fraction of ticks with `server_busy == true`, in `[0, 1]`.
    pub utilization:       f64,
}
