use chrono::NaiveDateTime;
use eyre::{Result, WrapErr};
use reservation_core::models::{
    reservation::{Reservation, ReservationStatus},
    schedule_slot::ScheduleSlot,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct DbScheduleSlot {
    pub id: Uuid,
    pub time_start: NaiveDateTime,
    pub is_visible: bool,
}

impl From<DbScheduleSlot> for ScheduleSlot {
    fn from(row: DbScheduleSlot) -> Self {
        ScheduleSlot {
            id: row.id,
            time_start: row.time_start,
            is_visible: row.is_visible,
        }
    }
}

/// A reservation row left-joined with the slot it was made against.
///
/// `slot_is_visible` is false once the slot row is gone.
#[derive(Debug, Clone, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub status: String,
    pub duration_in_minutes: Option<i32>,
    pub slot_id: Uuid,
    pub slot_time_start: NaiveDateTime,
    pub slot_is_visible: bool,
}

impl TryFrom<DbReservation> for Reservation {
    type Error = eyre::Report;

    fn try_from(row: DbReservation) -> Result<Self> {
        let status: ReservationStatus = row
            .status
            .parse()
            .wrap_err_with(|| format!("reservation {} has a corrupt status", row.id))?;

        Ok(Reservation {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            status,
            schedule_slot: ScheduleSlot {
                id: row.slot_id,
                time_start: row.slot_time_start,
                is_visible: row.slot_is_visible,
            },
            duration_in_minutes: row.duration_in_minutes,
        })
    }
}
