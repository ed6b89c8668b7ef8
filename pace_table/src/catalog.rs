// Fixed catalog of race distances, in display order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PaceError;

pub const METERS_PER_MILE: f64 = 1609.344;
pub const METERS_PER_KM: f64 = 1000.0;

/// Coarse distance classification. Sprint distances keep hundredths of a
/// second, everything else is shown in whole seconds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Sprint,
    Middle,
    Long,
    Ultra,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Sprint,
        Category::Middle,
        Category::Long,
        Category::Ultra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sprint => "Sprint",
            Category::Middle => "Middle",
            Category::Long => "Long",
            Category::Ultra => "Ultra",
        }
    }

    /// Whether times in this category are rendered with two decimals.
    pub fn fractional_seconds(&self) -> bool {
        matches!(self, Category::Sprint)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaceError::UnknownCategory(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct DistanceEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub meters: f64,
    pub category: Category,
}

const fn entry(id: &'static str, meters: f64, category: Category) -> DistanceEntry {
    DistanceEntry {
        id,
        label: id,
        meters,
        category,
    }
}

pub static DISTANCES: [DistanceEntry; 20] = [
    entry("60m", 60.0, Category::Sprint),
    entry("100m", 100.0, Category::Sprint),
    entry("200m", 200.0, Category::Sprint),
    entry("400m", 400.0, Category::Sprint),
    entry("800m", 800.0, Category::Middle),
    entry("1k", 1000.0, Category::Middle),
    entry("1500m", 1500.0, Category::Middle),
    entry("1mi", METERS_PER_MILE, Category::Middle),
    entry("2mi", 2.0 * METERS_PER_MILE, Category::Middle),
    entry("5km", 5.0 * METERS_PER_KM, Category::Middle),
    entry("5mi", 5.0 * METERS_PER_MILE, Category::Long),
    entry("10km", 10.0 * METERS_PER_KM, Category::Long),
    entry("10mi", 10.0 * METERS_PER_MILE, Category::Long),
    entry("13.1mi", 13.1 * METERS_PER_MILE, Category::Long),
    entry("20mi", 20.0 * METERS_PER_MILE, Category::Long),
    entry("26.2mi", 26.2 * METERS_PER_MILE, Category::Long),
    entry("50km", 50.0 * METERS_PER_KM, Category::Ultra),
    entry("50mi", 50.0 * METERS_PER_MILE, Category::Ultra),
    entry("100km", 100.0 * METERS_PER_KM, Category::Ultra),
    entry("100mi", 100.0 * METERS_PER_MILE, Category::Ultra),
];

/// Distance preselected by front ends before the user picks one.
pub const DEFAULT_DISTANCE_ID: &str = "1mi";

pub fn find_distance(id: &str) -> Option<&'static DistanceEntry> {
    DISTANCES.iter().find(|d| d.id == id)
}

/// Like [`find_distance`] but reports the unknown id as an error.
pub fn require_distance(id: &str) -> Result<&'static DistanceEntry, PaceError> {
    find_distance(id).ok_or_else(|| PaceError::UnknownDistance(id.to_string()))
}
