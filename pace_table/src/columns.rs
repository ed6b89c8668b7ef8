// Table columns and the named presets front ends offer for them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PaceError, PaceRow, ADJUSTMENTS};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Column {
    Category,
    Distance,
    Slower25,
    Slower10,
    Slower5,
    Time,
    Faster5,
    Faster10,
    Faster25,
    WorldRecordMen,
    WorldRecordWomen,
}

impl Column {
    /// Canonical left-to-right order.
    pub const ALL: [Column; 11] = [
        Column::Category,
        Column::Distance,
        Column::Slower25,
        Column::Slower10,
        Column::Slower5,
        Column::Time,
        Column::Faster5,
        Column::Faster10,
        Column::Faster25,
        Column::WorldRecordMen,
        Column::WorldRecordWomen,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Column::Category => "category",
            Column::Distance => "distance",
            Column::Slower25 => "slower25",
            Column::Slower10 => "slower10",
            Column::Slower5 => "slower5",
            Column::Time => "time",
            Column::Faster5 => "faster5",
            Column::Faster10 => "faster10",
            Column::Faster25 => "faster25",
            Column::WorldRecordMen => "wr-men",
            Column::WorldRecordWomen => "wr-women",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Category => "Type",
            Column::Distance => "Event",
            Column::WorldRecordMen => "Men's WR",
            Column::WorldRecordWomen => "Women's WR",
            other => other
                .adjustment_index()
                .map(|idx| ADJUSTMENTS[idx].label)
                .unwrap_or_default(),
        }
    }

    /// Position of this column in [`ADJUSTMENTS`], for the time columns.
    pub fn adjustment_index(&self) -> Option<usize> {
        match self {
            Column::Slower25 => Some(0),
            Column::Slower10 => Some(1),
            Column::Slower5 => Some(2),
            Column::Time => Some(3),
            Column::Faster5 => Some(4),
            Column::Faster10 => Some(5),
            Column::Faster25 => Some(6),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Column {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PaceError::UnknownColumn(s.to_string()))
    }
}

impl PaceRow {
    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Category => self.category.as_str(),
            Column::Distance => &self.label,
            Column::WorldRecordMen => &self.world_record_men,
            Column::WorldRecordWomen => &self.world_record_women,
            other => other
                .adjustment_index()
                .map(|idx| self.times[idx].as_str())
                .unwrap_or_default(),
        }
    }
}

/// Set of visible columns, always iterated in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleColumns {
    shown: [bool; Column::ALL.len()],
}

impl VisibleColumns {
    pub fn none() -> Self {
        Self {
            shown: [false; Column::ALL.len()],
        }
    }

    pub fn from_columns(columns: &[Column]) -> Self {
        let mut out = Self::none();
        for &c in columns {
            out.show(c);
        }
        out
    }

    pub fn show(&mut self, column: Column) {
        self.shown[column.index()] = true;
    }

    pub fn hide(&mut self, column: Column) {
        self.shown[column.index()] = false;
    }

    pub fn toggle(&mut self, column: Column) {
        self.shown[column.index()] ^= true;
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.shown[column.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        Column::ALL.into_iter().filter(|c| self.is_visible(*c))
    }

    pub fn is_empty(&self) -> bool {
        !self.shown.iter().any(|&s| s)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ColumnPreset {
    All,
    Minimal,
    Records,
    #[default]
    Compact,
    Slower,
    Faster,
}

impl ColumnPreset {
    pub const ALL: [ColumnPreset; 6] = [
        ColumnPreset::All,
        ColumnPreset::Minimal,
        ColumnPreset::Records,
        ColumnPreset::Compact,
        ColumnPreset::Slower,
        ColumnPreset::Faster,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColumnPreset::All => "all",
            ColumnPreset::Minimal => "minimal",
            ColumnPreset::Records => "records",
            ColumnPreset::Compact => "compact",
            ColumnPreset::Slower => "slower",
            ColumnPreset::Faster => "faster",
        }
    }

    pub fn columns(&self) -> VisibleColumns {
        use Column::*;
        match self {
            ColumnPreset::All => VisibleColumns::from_columns(&Column::ALL),
            ColumnPreset::Minimal => VisibleColumns::from_columns(&[Category, Distance, Time]),
            ColumnPreset::Records => VisibleColumns::from_columns(&[
                Category,
                Distance,
                Time,
                WorldRecordMen,
                WorldRecordWomen,
            ]),
            ColumnPreset::Compact => VisibleColumns::from_columns(&[
                Distance,
                Slower5,
                Time,
                Faster5,
                WorldRecordMen,
                WorldRecordWomen,
            ]),
            ColumnPreset::Slower => {
                VisibleColumns::from_columns(&[Distance, Slower25, Slower10, Slower5, Time])
            }
            ColumnPreset::Faster => {
                VisibleColumns::from_columns(&[Distance, Time, Faster5, Faster10, Faster25])
            }
        }
    }
}

impl FromStr for ColumnPreset {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColumnPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PaceError::UnknownPreset(s.to_string()))
    }
}
