use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_format;

/// A single bookable instant.
///
/// `is_visible == false` means the slot has been consumed by an accepted
/// reservation and cannot be booked again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: Uuid,
    #[serde(with = "time_format")]
    pub time_start: NaiveDateTime,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlotRequest {
    #[serde(with = "time_format")]
    pub time_start: NaiveDateTime,
}

/// Interval over `time_start` used by range queries against the slot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRange {
    /// `(start, end)`, both endpoints excluded.
    Exclusive {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// `[start, end]`, both endpoints included.
    Inclusive {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl SlotRange {
    pub fn exclusive(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        SlotRange::Exclusive { start, end }
    }

    pub fn inclusive(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        SlotRange::Inclusive { start, end }
    }

    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        match *self {
            SlotRange::Exclusive { start, end } | SlotRange::Inclusive { start, end } => {
                (start, end)
            }
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        match *self {
            SlotRange::Exclusive { start, end } => start < instant && instant < end,
            SlotRange::Inclusive { start, end } => start <= instant && instant <= end,
        }
    }
}
