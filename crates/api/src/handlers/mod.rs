pub mod reservation;
pub mod schedule;
