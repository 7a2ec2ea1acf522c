//! In-process adapter for the storage ports.
//!
//! A unit of work holds the state lock for its whole lifetime and edits a
//! private copy; commit swaps the copy in. Units are therefore serialised
//! and an uncommitted unit never leaks a change. As in the PostgreSQL
//! schema, `time_start` is unique and a reservation keeps its own copy of
//! the slot start, so it outlives the slot row.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use eyre::{Result, bail, eyre};
use reservation_core::{
    models::{
        reservation::{NewReservation, Reservation, ReservationStatus},
        schedule_slot::{ScheduleSlot, SlotRange},
    },
    store::{ReservationStore, SlotStore, Storage, UnitOfWork},
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let shared = self.state.clone().lock_owned().await;
        let working = shared.clone();
        Ok(Box::new(MemoryUnitOfWork { shared, working }))
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    slots: HashMap<Uuid, ScheduleSlot>,
    reservations: HashMap<Uuid, StoredReservation>,
}

#[derive(Debug, Clone)]
struct StoredReservation {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    status: ReservationStatus,
    slot_id: Uuid,
    slot_time_start: NaiveDateTime,
    duration_in_minutes: Option<i32>,
}

impl MemoryState {
    /// A reservation whose slot is gone reports it as not visible.
    fn hydrate(&self, stored: &StoredReservation) -> Reservation {
        let slot = self
            .slots
            .get(&stored.slot_id)
            .cloned()
            .unwrap_or(ScheduleSlot {
                id: stored.slot_id,
                time_start: stored.slot_time_start,
                is_visible: false,
            });

        Reservation {
            id: stored.id,
            first_name: stored.first_name.clone(),
            last_name: stored.last_name.clone(),
            email: stored.email.clone(),
            phone_number: stored.phone_number.clone(),
            status: stored.status,
            schedule_slot: slot,
            duration_in_minutes: stored.duration_in_minutes,
        }
    }

    fn slots_in(&self, range: SlotRange) -> Vec<ScheduleSlot> {
        let mut slots: Vec<ScheduleSlot> = self
            .slots
            .values()
            .filter(|slot| range.contains(slot.time_start))
            .cloned()
            .collect();
        slots.sort_by_key(|slot| slot.time_start);
        slots
    }
}

pub struct MemoryUnitOfWork {
    shared: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl SlotStore for MemoryUnitOfWork {
    async fn slot_exists_at(&mut self, time_start: NaiveDateTime) -> Result<bool> {
        Ok(self
            .working
            .slots
            .values()
            .any(|slot| slot.time_start == time_start))
    }

    async fn insert_slot(&mut self, time_start: NaiveDateTime) -> Result<ScheduleSlot> {
        if self.slot_exists_at(time_start).await? {
            bail!("unique violation: schedule slot at {} already stored", time_start);
        }

        let slot = ScheduleSlot {
            id: Uuid::new_v4(),
            time_start,
            is_visible: true,
        };
        self.working.slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn list_slots(&mut self) -> Result<Vec<ScheduleSlot>> {
        let mut slots: Vec<ScheduleSlot> = self.working.slots.values().cloned().collect();
        slots.sort_by_key(|slot| slot.time_start);
        Ok(slots)
    }

    async fn find_slot_by_id(&mut self, id: Uuid) -> Result<Option<ScheduleSlot>> {
        Ok(self.working.slots.get(&id).cloned())
    }

    async fn find_slot_by_start(
        &mut self,
        time_start: NaiveDateTime,
    ) -> Result<Option<ScheduleSlot>> {
        Ok(self
            .working
            .slots
            .values()
            .find(|slot| slot.time_start == time_start)
            .cloned())
    }

    async fn delete_slot(&mut self, id: Uuid) -> Result<()> {
        self.working.slots.remove(&id);
        Ok(())
    }

    async fn find_slots_in(&mut self, range: SlotRange) -> Result<Vec<ScheduleSlot>> {
        Ok(self.working.slots_in(range))
    }

    async fn delete_slots_in(&mut self, range: SlotRange) -> Result<u64> {
        let doomed = self.working.slots_in(range);
        for slot in &doomed {
            self.working.slots.remove(&slot.id);
        }
        Ok(doomed.len() as u64)
    }

    async fn hide_slot(&mut self, slot: &ScheduleSlot) -> Result<()> {
        if let Some(stored) = self.working.slots.get_mut(&slot.id) {
            stored.is_visible = false;
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for MemoryUnitOfWork {
    async fn insert_reservation(&mut self, new: NewReservation) -> Result<Reservation> {
        let stored = StoredReservation {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone_number: new.phone_number,
            status: ReservationStatus::Pending,
            slot_id: new.schedule_slot.id,
            slot_time_start: new.schedule_slot.time_start,
            duration_in_minutes: None,
        };
        let reservation = self.working.hydrate(&stored);
        self.working.reservations.insert(stored.id, stored);
        Ok(reservation)
    }

    async fn update_reservation(&mut self, reservation: Reservation) -> Result<Reservation> {
        let stored = self
            .working
            .reservations
            .get_mut(&reservation.id)
            .ok_or_else(|| eyre!("reservation {} vanished during update", reservation.id))?;
        stored.status = reservation.status;
        stored.duration_in_minutes = reservation.duration_in_minutes;
        Ok(reservation)
    }

    async fn find_reservation_by_id(&mut self, id: Uuid) -> Result<Option<Reservation>> {
        Ok(self
            .working
            .reservations
            .get(&id)
            .map(|stored| self.working.hydrate(stored)))
    }

    async fn find_reservations_by_slot(&mut self, slot_id: Uuid) -> Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .working
            .reservations
            .values()
            .filter(|stored| stored.slot_id == slot_id)
            .map(|stored| self.working.hydrate(stored))
            .collect();
        reservations.sort_by_key(|r| r.id);
        Ok(reservations)
    }

    async fn list_reservations(&mut self) -> Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .working
            .reservations
            .values()
            .map(|stored| self.working.hydrate(stored))
            .collect();
        reservations.sort_by_key(|r| (r.schedule_slot.time_start, r.id));
        Ok(reservations)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryUnitOfWork { mut shared, working } = *self;
        *shared = working;
        Ok(())
    }
}
