//! Owns the set of bookable instants and their visibility.

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        reservation::Reservation,
        schedule_slot::{ScheduleSlot, SlotRange},
    },
    store::{ReservationStore, SlotStore},
};

pub async fn open_slot<S>(store: &mut S, time_start: NaiveDateTime) -> BookingResult<ScheduleSlot>
where
    S: SlotStore + ?Sized,
{
    if store.slot_exists_at(time_start).await? {
        return Err(BookingError::DuplicateSlot(time_start));
    }

    let slot = store.insert_slot(time_start).await?;
    info!(slot_id = %slot.id, %time_start, "schedule slot opened");
    Ok(slot)
}

pub async fn list_slots<S>(store: &mut S) -> BookingResult<Vec<ScheduleSlot>>
where
    S: SlotStore + ?Sized,
{
    Ok(store.list_slots().await?)
}

/// Refused while a pending or accepted reservation holds the slot.
/// Rejected reservations keep their own copy of the slot and do not block.
pub async fn close_slot<S>(store: &mut S, id: Uuid) -> BookingResult<()>
where
    S: SlotStore + ReservationStore + ?Sized,
{
    let slot = store
        .find_slot_by_id(id)
        .await?
        .ok_or(BookingError::SlotNotFound(id))?;

    if let Some(holder) = find_holder(store, slot.id).await? {
        warn!(slot_id = %id, reservation_id = %holder.id, "close refused, slot is held");
        return Err(BookingError::SlotInUse {
            slot: id,
            reservation: holder.id,
        });
    }

    store.delete_slot(slot.id).await?;
    info!(slot_id = %id, time_start = %slot.time_start, "schedule slot closed");
    Ok(())
}

/// First pending or accepted reservation made against `slot_id`.
pub async fn find_holder<S>(store: &mut S, slot_id: Uuid) -> BookingResult<Option<Reservation>>
where
    S: ReservationStore + ?Sized,
{
    Ok(store
        .find_reservations_by_slot(slot_id)
        .await?
        .into_iter()
        .find(Reservation::holds_slot))
}

pub async fn find_by_start<S>(
    store: &mut S,
    time_start: NaiveDateTime,
) -> BookingResult<Option<ScheduleSlot>>
where
    S: SlotStore + ?Sized,
{
    Ok(store.find_slot_by_start(time_start).await?)
}

/// Slots strictly inside `(start, end)`.
pub async fn find_between<S>(
    store: &mut S,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> BookingResult<Vec<ScheduleSlot>>
where
    S: SlotStore + ?Sized,
{
    find_in(store, SlotRange::exclusive(start, end)).await
}

/// Removes slots strictly inside `(start, end)`.
pub async fn delete_between<S>(
    store: &mut S,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> BookingResult<u64>
where
    S: SlotStore + ?Sized,
{
    delete_in(store, SlotRange::exclusive(start, end)).await
}

pub async fn find_in<S>(store: &mut S, range: SlotRange) -> BookingResult<Vec<ScheduleSlot>>
where
    S: SlotStore + ?Sized,
{
    Ok(store.find_slots_in(range).await?)
}

pub async fn delete_in<S>(store: &mut S, range: SlotRange) -> BookingResult<u64>
where
    S: SlotStore + ?Sized,
{
    let removed = store.delete_slots_in(range).await?;
    debug!(?range, removed, "schedule slots deleted");
    Ok(removed)
}

/// Soft-deletes a slot the caller already holds. The caller's copy is
/// updated too.
pub async fn hide_slot<S>(store: &mut S, slot: &mut ScheduleSlot) -> BookingResult<()>
where
    S: SlotStore + ?Sized,
{
    store.hide_slot(slot).await?;
    slot.is_visible = false;
    Ok(())
}
