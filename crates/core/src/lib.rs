//! # Reservation Core
//!
//! Domain types and the slot/reservation consistency engine. Storage is
//! reached only through the ports in [`store`]; this crate knows nothing
//! about HTTP or SQL.

pub mod errors;
pub mod models;
pub mod services;
pub mod store;
