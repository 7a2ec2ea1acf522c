//! PostgreSQL adapter for the storage ports.
//!
//! Each unit of work is one `SERIALIZABLE` transaction, so two acceptances
//! racing for the same span cannot both commit.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use eyre::Result;
use reservation_core::{
    models::{
        reservation::{NewReservation, Reservation},
        schedule_slot::{ScheduleSlot, SlotRange},
    },
    store::{ReservationStore, SlotStore, Storage, UnitOfWork},
};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{reservation, schedule_slot},
};

#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SlotStore for PgUnitOfWork {
    async fn slot_exists_at(&mut self, time_start: NaiveDateTime) -> Result<bool> {
        schedule_slot::exists_by_time_start(&mut self.tx, time_start).await
    }

    async fn insert_slot(&mut self, time_start: NaiveDateTime) -> Result<ScheduleSlot> {
        let slot = schedule_slot::create_schedule_slot(&mut self.tx, time_start).await?;
        Ok(slot.into())
    }

    async fn list_slots(&mut self) -> Result<Vec<ScheduleSlot>> {
        let slots = schedule_slot::get_schedule_slots(&mut self.tx).await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn find_slot_by_id(&mut self, id: Uuid) -> Result<Option<ScheduleSlot>> {
        let slot = schedule_slot::get_schedule_slot_by_id(&mut self.tx, id).await?;
        Ok(slot.map(Into::into))
    }

    async fn find_slot_by_start(
        &mut self,
        time_start: NaiveDateTime,
    ) -> Result<Option<ScheduleSlot>> {
        let slot = schedule_slot::get_schedule_slot_by_time_start(&mut self.tx, time_start).await?;
        Ok(slot.map(Into::into))
    }

    async fn delete_slot(&mut self, id: Uuid) -> Result<()> {
        schedule_slot::delete_schedule_slot(&mut self.tx, id).await
    }

    async fn find_slots_in(&mut self, range: SlotRange) -> Result<Vec<ScheduleSlot>> {
        let slots = schedule_slot::get_schedule_slots_in_range(&mut self.tx, range).await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn delete_slots_in(&mut self, range: SlotRange) -> Result<u64> {
        schedule_slot::delete_schedule_slots_in_range(&mut self.tx, range).await
    }

    async fn hide_slot(&mut self, slot: &ScheduleSlot) -> Result<()> {
        schedule_slot::set_schedule_slot_visibility(&mut self.tx, slot.id, false).await
    }
}

#[async_trait]
impl ReservationStore for PgUnitOfWork {
    async fn insert_reservation(&mut self, new: NewReservation) -> Result<Reservation> {
        reservation::create_reservation(&mut self.tx, new).await
    }

    async fn update_reservation(&mut self, updated: Reservation) -> Result<Reservation> {
        reservation::update_reservation(&mut self.tx, updated).await
    }

    async fn find_reservation_by_id(&mut self, id: Uuid) -> Result<Option<Reservation>> {
        reservation::get_reservation_by_id(&mut self.tx, id).await
    }

    async fn find_reservations_by_slot(&mut self, slot_id: Uuid) -> Result<Vec<Reservation>> {
        reservation::get_reservations_by_slot_id(&mut self.tx, slot_id).await
    }

    async fn list_reservations(&mut self) -> Result<Vec<Reservation>> {
        reservation::get_reservations(&mut self.tx).await
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
