//! Built-in schedules for the campus turnstile scenarios.
//!
//! All ticks are minutes after 08:00.

use ts_core::Tick;

use crate::{RateProfile, RateSchedule, RateSegment, ScheduleInterval};

/// Length of [`university_day`] in ticks (08:00–16:00).
pub const UNIVERSITY_DAY_TICKS: u64 = 480;

/// Length of [`morning_peak`] in ticks (08:00–08:30).
pub const MORNING_PEAK_TICKS: u64 = 30;

/// A full teaching day: five lecture periods separated by breaks.
///
/// | Minutes  | Clock        | Arrivals/min |
/// |----------|--------------|--------------|
/// | 0–20     | 08:00–08:20  | 0–2          |
/// | 20–100   | 08:20–09:40  | 2–5          |
/// | 100–110  | 09:40–09:50  | 0–1          |
/// | 110–190  | 09:50–11:10  | 2–5          |
/// | 190–200  | 11:10–11:20  | 0–1          |
/// | 200–280  | 11:20–12:40  | 2–4          |
/// | 280–290  | 12:40–12:50  | 0–1          |
/// | 290–370  | 12:50–14:10  | 2–5          |
/// | 370–400  | 14:10–14:40  | 0–1          |
/// | 400–480  | 14:40–16:00  | 2–4          |
pub fn university_day() -> RateSchedule {
    const ROWS: [(u64, u64, u32, u32); 10] = [
        (0, 20, 0, 2),
        (20, 100, 2, 5),
        (100, 110, 0, 1),
        (110, 190, 2, 5),
        (190, 200, 0, 1),
        (200, 280, 2, 4),
        (280, 290, 0, 1),
        (290, 370, 2, 5),
        (370, 400, 0, 1),
        (400, 480, 2, 4),
    ];
    let intervals = ROWS
        .iter()
        .map(|&(start, end, min_arrivals, max_arrivals)| ScheduleInterval {
            start: Tick(start),
            end: Tick(end),
            min_arrivals,
            max_arrivals,
        })
        .collect();
    RateSchedule { intervals }
}

/// Poisson intensity around the first lecture (starts 08:20), arrivals/min.
///
/// 1.0 until 08:10, 3.0 until 08:15, peak 6.0 until 08:20, 3.0 until 08:25,
/// then 1.0 for late arrivals.
pub fn morning_peak() -> RateProfile {
    const ROWS: [(u64, u64, f64); 4] = [
        (0, 10, 1.0),
        (10, 15, 3.0),
        (15, 20, 6.0),
        (20, 25, 3.0),
    ];
    let segments = ROWS
        .iter()
        .map(|&(start, end, rate)| RateSegment { start: Tick(start), end: Tick(end), rate })
        .collect();
    RateProfile { segments, baseline: 1.0 }
}
