//! The consistency engine.
//!
//! Every function takes the unit of work it runs in. Callers open one unit
//! per operation and commit it only when the function returns `Ok`.

pub mod reservation_workflow;
pub mod slot_registry;
