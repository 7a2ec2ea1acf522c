//! # Storage ports
//!
//! The engine talks to persistence only through these traits. An adapter
//! hands out a [`UnitOfWork`] per operation; everything done through it is
//! applied on [`UnitOfWork::commit`] and discarded if the unit is dropped
//! first. That is what makes a failed acceptance leave no trace.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    reservation::{NewReservation, Reservation},
    schedule_slot::{ScheduleSlot, SlotRange},
};

#[async_trait]
pub trait SlotStore: Send {
    async fn slot_exists_at(&mut self, time_start: NaiveDateTime) -> Result<bool>;

    /// Inserts a visible slot and returns it with its new id.
    async fn insert_slot(&mut self, time_start: NaiveDateTime) -> Result<ScheduleSlot>;

    /// All slots, ordered by `time_start`.
    async fn list_slots(&mut self) -> Result<Vec<ScheduleSlot>>;

    async fn find_slot_by_id(&mut self, id: Uuid) -> Result<Option<ScheduleSlot>>;

    async fn find_slot_by_start(&mut self, time_start: NaiveDateTime)
    -> Result<Option<ScheduleSlot>>;

    async fn delete_slot(&mut self, id: Uuid) -> Result<()>;

    async fn find_slots_in(&mut self, range: SlotRange) -> Result<Vec<ScheduleSlot>>;

    /// Returns the number of slots removed.
    async fn delete_slots_in(&mut self, range: SlotRange) -> Result<u64>;

    /// Marks `slot` as not visible. Does not re-read it first.
    async fn hide_slot(&mut self, slot: &ScheduleSlot) -> Result<()>;
}

#[async_trait]
pub trait ReservationStore: Send {
    async fn insert_reservation(&mut self, reservation: NewReservation) -> Result<Reservation>;

    /// Persists status and duration of an existing reservation.
    async fn update_reservation(&mut self, reservation: Reservation) -> Result<Reservation>;

    async fn find_reservation_by_id(&mut self, id: Uuid) -> Result<Option<Reservation>>;

    /// Reservations made against `slot_id`, in any status.
    async fn find_reservations_by_slot(&mut self, slot_id: Uuid) -> Result<Vec<Reservation>>;

    async fn list_reservations(&mut self) -> Result<Vec<Reservation>>;
}

/// Transactional scope over both stores.
#[async_trait]
pub trait UnitOfWork: SlotStore + ReservationStore {
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Shared handle that opens units of work.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}
