pub mod reservation;
pub mod schedule_slot;
pub mod time_format;
