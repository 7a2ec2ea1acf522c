pub mod reservation;
pub mod schedule_slot;
