//! Plain-text rendering of run summaries and the Erlang-C comparison.

use ts_core::units::hours_to_minutes;
use ts_erlang::{MmcParams, SteadyState};
use ts_sim::ScenarioSummary;

const HEADERS: [&str; 8] =
    ["arrived", "served", "left", "mean_q", "max_q", "mean_wait", "max_wait", "util"];

/// One aligned row per scenario, preceded by a header line.
///
/// Waits are in minutes; `-` marks a scenario where nobody was served.
pub fn summary_table(rows: &[ScenarioSummary]) -> String {
    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once("scenario".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<label_width$}", "scenario");
    for h in HEADERS {
        out.push_str(&format!(" {h:>9}"));
    }
    out.push('\n');

    for r in rows {
        let s = &r.summary;
        let mean_wait = s.mean_wait.map_or_else(|| "-".to_owned(), |w| format!("{w:.2}"));
        let max_wait = s.max_wait.map_or_else(|| "-".to_owned(), |w| w.to_string());
        out.push_str(&format!(
            "{:<label_width$} {:>9} {:>9} {:>9} {:>9.2} {:>9} {:>9} {:>9} {:>8.1}%\n",
            r.label,
            s.arrived,
            s.served,
            s.left_in_queue,
            s.mean_queue_length,
            s.max_queue_length,
            mean_wait,
            max_wait,
            s.utilization * 100.0,
        ));
    }
    out
}

/// One line describing an M/M/c system whose rates are per hour.
///
/// ```text
/// M/M/5 λ=4500/h μ=1000/h ρ=0.900: Wq = 0.09 min
/// M/M/5 λ=6000/h μ=1000/h ρ=1.200: overloaded, queue grows without bound
/// ```
pub fn erlang_line(params: &MmcParams) -> String {
    let head = format!(
        "M/M/{} λ={}/h μ={}/h ρ={:.3}",
        params.servers,
        params.arrival_rate,
        params.service_rate,
        params.traffic_intensity(),
    );
    match params.waiting_time().map(hours_to_minutes) {
        SteadyState::Stable(wq) => format!("{head}: Wq = {wq:.2} min"),
        SteadyState::Overloaded { .. } => format!("{head}: overloaded, queue grows without bound"),
    }
}
