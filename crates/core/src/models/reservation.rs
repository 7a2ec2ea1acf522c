use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    schedule_slot::{ScheduleSlot, SlotRange},
    time_format,
};
use crate::errors::{BookingError, BookingResult};

/// Lifecycle state of a reservation.
///
/// `Pending` is the only state with outgoing transitions; `Accepted` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Accepted,
        ReservationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Accepted => "ACCEPTED",
            ReservationStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReservationStatus::Pending)
    }

    /// Only `Pending` moves, and only into a terminal state.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        !self.is_terminal() && next.is_terminal()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BookingError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub status: ReservationStatus,
    pub schedule_slot: ScheduleSlot,
    pub duration_in_minutes: Option<i32>,
}

impl Reservation {
    /// Moves the reservation to `next`, refusing anything the state machine
    /// does not allow. Leaves `self` untouched on refusal.
    pub fn transition(&mut self, next: ReservationStatus) -> BookingResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(BookingError::AlreadyDecided(self.id));
        }
        self.status = next;
        Ok(())
    }

    /// A pending or accepted reservation keeps its slot from being deleted.
    /// A rejected one does not.
    pub fn holds_slot(&self) -> bool {
        self.status != ReservationStatus::Rejected
    }
}

/// A reservation that has not been stored yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub schedule_slot: ScheduleSlot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(with = "time_format")]
    pub time_start: NaiveDateTime,
}

/// Slots whose start falls in this range must be free before a reservation
/// starting at `time_start` can occupy `duration_in_minutes`.
///
/// The window is `[start + 1min, start + duration - 1min]`: the reservation's
/// own slot and the instant it ends on are not part of the check.
pub fn conflict_window(
    time_start: NaiveDateTime,
    duration_in_minutes: i32,
) -> BookingResult<SlotRange> {
    if duration_in_minutes <= 0 {
        return Err(BookingError::InvalidDuration(duration_in_minutes));
    }

    let one_minute = Duration::minutes(1);
    let time_end = time_start
        .checked_add_signed(Duration::minutes(i64::from(duration_in_minutes)))
        .ok_or(BookingError::InvalidDuration(duration_in_minutes))?;

    let start = time_start
        .checked_add_signed(one_minute)
        .ok_or(BookingError::InvalidDuration(duration_in_minutes))?;
    let end = time_end
        .checked_sub_signed(one_minute)
        .ok_or(BookingError::InvalidDuration(duration_in_minutes))?;

    Ok(SlotRange::inclusive(start, end))
}
