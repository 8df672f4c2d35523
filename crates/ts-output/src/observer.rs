//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use log::warn;
use ts_core::{SimClock, SimConfig, Tick};
use ts_sim::{Observation, ScenarioSummary, Server, SimObserver, WaitingQueue};

use crate::row::{ObservationRow, SnapshotRow, SummaryRow, WaitRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams observations, waits and snapshots to any
/// [`OutputWriter`] backend, labelling each row with its `HH:MM` time.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `engine.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
///
/// The writer is finished at `on_sim_end`; write experiment summaries with
/// [`write_summaries`][Self::write_summaries] before the run ends.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for clock labels.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `engine.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Forward experiment summaries to the writer.
    pub fn write_summaries(&mut self, summaries: &[ScenarioSummary]) {
        let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
        let result = self.writer.write_summaries(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_service_start(&mut self, tick: Tick, wait: u64) {
        let row = WaitRow {
            tick:         tick.0,
            clock:        self.clock.label(tick),
            wait_minutes: wait,
        };
        let result = self.writer.write_wait(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, observation: &Observation) {
        let row = ObservationRow {
            tick:         observation.tick.0,
            clock:        self.clock.label(observation.tick),
            queue_length: observation.queue_length as u64,
            server_busy:  observation.server_busy,
        };
        let result = self.writer.write_observation(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, queue: &WaitingQueue, server: &Server) {
        let row = SnapshotRow {
            tick:                   tick.0,
            clock:                  self.clock.label(tick),
            queue_length:           queue.len() as u64,
            oldest_wait_minutes:    queue.oldest().map(|arrived| tick.since(arrived)),
            remaining_busy_minutes: server.remaining_busy(),
        };
        let result = self.writer.write_snapshot(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
