// World-record reference times for every catalog distance.
// Values are literal seconds and are never recomputed.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    Men,
    Women,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Men => f.write_str("men"),
            Sex::Women => f.write_str("women"),
        }
    }
}

/// Men's and women's records keyed by distance id, in catalog order.
#[derive(Debug)]
pub struct WorldRecordTable {
    men: &'static [(&'static str, f64)],
    women: &'static [(&'static str, f64)],
}

impl WorldRecordTable {
    pub fn records(&self, sex: Sex) -> &'static [(&'static str, f64)] {
        match sex {
            Sex::Men => self.men,
            Sex::Women => self.women,
        }
    }

    /// Record in seconds. Every catalog id has an entry for both sexes, so
    /// `None` only comes back for ids outside the catalog.
    pub fn seconds(&self, sex: Sex, distance_id: &str) -> Option<f64> {
        self.records(sex)
            .iter()
            .find(|(id, _)| *id == distance_id)
            .map(|&(_, secs)| secs)
    }
}

pub static WORLD_RECORDS: WorldRecordTable = WorldRecordTable {
    men: &[
        ("60m", 6.34),
        ("100m", 9.58),
        ("200m", 19.19),
        ("400m", 43.03),
        ("800m", 100.91),
        ("1k", 131.96),
        ("1500m", 206.0),
        ("1mi", 223.13),
        ("2mi", 461.67),
        ("5km", 755.36),
        ("5mi", 1224.0),
        ("10km", 1558.8),
        ("10mi", 2644.2),
        ("13.1mi", 3513.0),
        ("20mi", 5400.0),
        ("26.2mi", 7299.0),
        ("50km", 9270.0),
        ("50mi", 16920.0),
        ("100km", 21600.0),
        ("100mi", 44712.0),
    ],
    women: &[
        ("60m", 6.92),
        ("100m", 10.49),
        ("200m", 21.34),
        ("400m", 47.60),
        ("800m", 113.28),
        ("1k", 148.98),
        ("1500m", 230.46),
        ("1mi", 252.09),
        ("2mi", 540.67),
        ("5km", 870.0),
        ("5mi", 1440.0),
        ("10km", 1763.4),
        ("10mi", 3060.0),
        ("13.1mi", 3906.0),
        ("20mi", 6300.0),
        ("26.2mi", 8100.0),
        ("50km", 10800.0),
        ("50mi", 19800.0),
        ("100km", 25200.0),
        ("100mi", 52200.0),
    ],
};
