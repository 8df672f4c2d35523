//! Plain data row types written by output backends.

use ts_sim::ScenarioSummary;

/// One tick of the observation series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRow {
    pub tick:         u64,
    /// Time of day, `HH:MM`.
    pub clock:        String,
    pub queue_length: u64,
    pub server_busy:  bool,
}

/// One customer entering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitRow {
    /// Tick service began.
    pub tick:         u64,
    pub clock:        String,
    pub wait_minutes: u64,
}

/// Queue and server state at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub tick:                   u64,
    pub clock:                  String,
    pub queue_length:           u64,
    /// How long the head of the queue has waited so far; `None` if empty.
    pub oldest_wait_minutes:    Option<u64>,
    pub remaining_busy_minutes: f64,
}

/// Aggregates for one scenario of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label:             String,
    pub ticks:             u64,
    pub arrived:           u64,
    pub served:            u64,
    pub left_in_queue:     u64,
    pub mean_queue_length: f64,
    pub max_queue_length:  u64,
    pub mean_wait_minutes: Option<f64>,
    pub max_wait_minutes:  Option<u64>,
    pub utilization:       f64,
}

impl From<&ScenarioSummary> for SummaryRow {
    fn from(s: &ScenarioSummary) -> Self {
        let m = &s.summary;
        SummaryRow {
            label:             s.label.clone(),
            ticks:             m.ticks,
            arrived:           m.arrived,
            served:            m.served,
            left_in_queue:     m.left_in_queue,
            mean_queue_length: m.mean_queue_length,
            max_queue_length:  m.max_queue_length as u64,
            mean_wait_minutes: m.mean_wait,
            max_wait_minutes:  m.max_wait,
            utilization:       m.utilization,
        }
    }
}
