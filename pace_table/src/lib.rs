//! Equivalent race-time tables computed from a single reference performance.
//!
//! Given a distance from the fixed [catalog](catalog::DISTANCES) and an
//! elapsed time, [`generate_pace_table`] projects the same pace onto every
//! catalog distance, adds faster/slower variants and the matching world
//! records, and reports the reference speed. Invalid input never raises:
//! it yields `None`, zeroed speeds or empty strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod catalog;
pub mod codec;
pub mod columns;
pub mod wr;

pub use catalog::{
    find_distance, require_distance, Category, DistanceEntry, DEFAULT_DISTANCE_ID, DISTANCES,
    METERS_PER_KM, METERS_PER_MILE,
};
pub use codec::{
    compose_time_text, format_time, format_whole_seconds, parse_time, parse_time_strict,
};
pub use columns::{Column, ColumnPreset, VisibleColumns};
pub use wr::{Sex, WorldRecordTable, WORLD_RECORDS};

/// Failures from the opt-in fallible lookups and the strict time parser.
#[derive(Error, Debug)]
pub enum PaceError {
    #[error("unknown distance id: {0}")]
    UnknownDistance(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("unknown column preset: {0}")]
    UnknownPreset(String),
    #[error("time text is empty")]
    EmptyTime,
    #[error("expected 1 to 3 colon-separated segments, found {0}")]
    SegmentCount(usize),
    #[error("time segment is not a number: {0:?}")]
    InvalidSegment(String),
    #[error("time segment is negative: {0:?}")]
    NegativeSegment(String),
    #[error("minutes and seconds must be below 60: {0:?}")]
    SegmentOutOfRange(String),
}

/// Multiplicative adjustment applied to a projected time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adjustment {
    pub label: &'static str,
    pub factor: f64,
}

/// Table columns from slowest to fastest; `PaceRow::times` follows this order.
pub const ADJUSTMENTS: [Adjustment; 7] = [
    Adjustment { label: "25% Slower", factor: 1.25 },
    Adjustment { label: "10% Slower", factor: 1.10 },
    Adjustment { label: "5% Slower", factor: 1.05 },
    Adjustment { label: "Time", factor: 1.00 },
    Adjustment { label: "5% Faster", factor: 0.95 },
    Adjustment { label: "10% Faster", factor: 0.90 },
    Adjustment { label: "25% Faster", factor: 0.75 },
];

/// Index of the unadjusted column in [`ADJUSTMENTS`].
pub const BASE_ADJUSTMENT: usize = 3;

/// Reference speed in mph and km/h plus pace per mile and per km.
/// The default value is the "no data" result.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeedResult {
    pub miles_per_hour: f64,
    pub km_per_hour: f64,
    pub pace_per_mile: String,
    pub pace_per_km: String,
}

/// Formatted times for one catalog distance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaceRow {
    pub category: Category,
    pub distance_id: String,
    pub label: String,
    /// One cell per entry of [`ADJUSTMENTS`], in that order.
    pub times: [String; 7],
    pub world_record_men: String,
    pub world_record_women: String,
}

impl PaceRow {
    pub fn base_time(&self) -> &str {
        &self.times[BASE_ADJUSTMENT]
    }
}

/// Speed figures and one row per catalog distance, in catalog order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaceTable {
    pub reference_distance_id: String,
    pub reference_seconds: f64,
    pub speed: SpeedResult,
    pub rows: Vec<PaceRow>,
}

/// One calculation request as entered by the user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaceQuery {
    pub reference_distance_id: String,
    pub reference_time_text: String,
}

impl PaceQuery {
    pub fn new(distance_id: impl Into<String>, time_text: impl Into<String>) -> Self {
        Self {
            reference_distance_id: distance_id.into(),
            reference_time_text: time_text.into(),
        }
    }

    pub fn run(&self) -> Option<PaceTable> {
        generate_pace_table(&self.reference_distance_id, &self.reference_time_text)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Speed and pace for covering `distance_m` in `time_s`.
///
/// Returns the zeroed default unless both inputs are strictly positive.
pub fn speed(distance_m: f64, time_s: f64) -> SpeedResult {
    if !(distance_m > 0.0 && time_s > 0.0) {
        return SpeedResult::default();
    }
    let hours = time_s / 3600.0;
    let secs_per_meter = time_s / distance_m;
    SpeedResult {
        miles_per_hour: round2(distance_m / METERS_PER_MILE / hours),
        km_per_hour: round2(distance_m / METERS_PER_KM / hours),
        pace_per_mile: format_whole_seconds(secs_per_meter * METERS_PER_MILE),
        pace_per_km: format_whole_seconds(secs_per_meter * METERS_PER_KM),
    }
}

/// Time for `target_m` at the reference pace, multiplied by `factor`.
///
/// Sprint results are left unrounded so hundredths survive formatting;
/// every other category is rounded to the nearest second. Non-positive
/// distances or reference time give `0.0`.
pub fn scaled_time(
    reference_m: f64,
    reference_s: f64,
    target_m: f64,
    factor: f64,
    category: Category,
) -> f64 {
    if reference_m <= 0.0 || reference_s <= 0.0 || target_m <= 0.0 {
        return 0.0;
    }
    let projected = reference_s / reference_m * target_m * factor;
    match category {
        Category::Sprint => projected,
        Category::Middle | Category::Long | Category::Ultra => projected.round(),
    }
}

fn pace_row(reference_m: f64, reference_s: f64, target: &DistanceEntry) -> PaceRow {
    let times = ADJUSTMENTS.map(|adj| {
        let secs = scaled_time(
            reference_m,
            reference_s,
            target.meters,
            adj.factor,
            target.category,
        );
        format_time(secs, target.category)
    });
    let record = |sex| {
        WORLD_RECORDS
            .seconds(sex, target.id)
            .map(|secs| format_time(secs, target.category))
            .unwrap_or_default()
    };
    PaceRow {
        category: target.category,
        distance_id: target.id.to_string(),
        label: target.label.to_string(),
        times,
        world_record_men: record(Sex::Men),
        world_record_women: record(Sex::Women),
    }
}

/// Build the full equivalent-time table for a reference performance.
///
/// `None` means there is nothing to show yet: the distance id is not in the
/// catalog, the time text is empty, or it parses to zero or less. Text with
/// an unreadable segment parses to NaN and still yields a table; its time
/// cells are empty and only the world-record cells are filled.
pub fn generate_pace_table(
    reference_distance_id: &str,
    reference_time_text: &str,
) -> Option<PaceTable> {
    let reference = find_distance(reference_distance_id)?;
    if reference_time_text.is_empty() {
        return None;
    }
    let reference_seconds = parse_time(reference_time_text);
    if reference_seconds <= 0.0 {
        debug!(
            text = reference_time_text,
            "reference time is not a positive number of seconds"
        );
        return None;
    }

    let rows: Vec<PaceRow> = DISTANCES
        .iter()
        .map(|target| pace_row(reference.meters, reference_seconds, target))
        .collect();
    debug!(
        distance = reference.id,
        seconds = reference_seconds,
        rows = rows.len(),
        "generated pace table"
    );

    Some(PaceTable {
        reference_distance_id: reference.id.to_string(),
        reference_seconds,
        speed: speed(reference.meters, reference_seconds),
        rows,
    })
}
