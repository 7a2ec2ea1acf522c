use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("schedule slot already exists at {0}")]
    DuplicateSlot(NaiveDateTime),

    #[error("schedule slot {0} not found")]
    SlotNotFound(Uuid),

    #[error("schedule slot {slot} is held by reservation {reservation}")]
    SlotInUse { slot: Uuid, reservation: Uuid },

    #[error("no open schedule slot at {0}")]
    SlotUnavailable(NaiveDateTime),

    #[error("wrong status: {0}")]
    InvalidStatus(String),

    #[error("reservation {0} not found")]
    ReservationNotFound(Uuid),

    #[error("reservation {0} has already been decided")]
    AlreadyDecided(Uuid),

    #[error("reservation {0} conflicts with another reservation")]
    ReservationConflict(Uuid),

    #[error("invalid duration: {0} minutes")]
    InvalidDuration(i32),

    #[error("Database error: {0}")]
    Storage(#[from] eyre::Report),
}

impl BookingError {
    /// True for every kind the caller can resolve by changing its input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, BookingError::Storage(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
