//! Normalized booking record

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static STAY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

/// A `YYYY-MM-DD` date string. Only the shape is validated; the components
/// are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StayDate(String);

impl StayDate {
    pub fn parse(raw: &str) -> Option<Self> {
        STAY_DATE_RE
            .is_match(raw)
            .then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> &str {
        &self.0[0..4]
    }

    pub fn month(&self) -> &str {
        &self.0[5..7]
    }

    pub fn day(&self) -> &str {
        &self.0[8..10]
    }
}

impl fmt::Display for StayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Party composition of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

impl Default for Occupancy {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            rooms: 1,
        }
    }
}

impl Occupancy {
    /// Raise adults and rooms to their floor of one.
    pub fn clamped(self) -> Self {
        Self {
            adults: self.adults.max(1),
            children: self.children,
            rooms: self.rooms.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub property_id: String,
    pub check_in_date: StayDate,
    pub check_out_date: StayDate,
    pub adult_count: u32,
    pub child_count: u32,
    pub room_count: u32,
    /// Empty when no script on the page carried it.
    pub country_origin: String,
    /// Empty when no script on the page carried it.
    pub currency_code: String,
    /// True when occupancy could not be read and defaults were substituted.
    pub occupancy_defaulted: bool,
}

impl BookingRecord {
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            adults: self.adult_count,
            children: self.child_count,
            rooms: self.room_count,
        }
    }
}
