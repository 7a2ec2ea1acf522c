//! Reservation lifecycle: creation against an open slot, then a single
//! terminal decision.
//!
//! Acceptance is the interesting part. An accepted reservation occupies
//! `[start, start + duration]`, so every slot inside that span is either
//! absorbed (deleted) or, if another reservation consumed it or is still
//! waiting on it, the acceptance is refused. Checks all run before the first
//! write, so a refused acceptance leaves the unit of work untouched.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::slot_registry;
use crate::{
    errors::{BookingError, BookingResult},
    models::reservation::{
        NewReservation, Reservation, ReservationRequest, ReservationStatus, conflict_window,
    },
    store::{ReservationStore, SlotStore},
};

pub async fn list_reservations<S>(store: &mut S) -> BookingResult<Vec<Reservation>>
where
    S: ReservationStore + ?Sized,
{
    Ok(store.list_reservations().await?)
}

/// The status is parsed before the store is touched.
pub async fn list_reservations_by_status<S>(
    store: &mut S,
    status: &str,
) -> BookingResult<Vec<Reservation>>
where
    S: ReservationStore + ?Sized,
{
    let status: ReservationStatus = status.parse()?;

    let reservations = store
        .list_reservations()
        .await?
        .into_iter()
        .filter(|reservation| reservation.status == status)
        .collect();

    Ok(reservations)
}

pub async fn create_reservation<S>(
    store: &mut S,
    request: ReservationRequest,
) -> BookingResult<Reservation>
where
    S: SlotStore + ReservationStore + ?Sized,
{
    let slot = slot_registry::find_by_start(store, request.time_start)
        .await?
        .filter(|slot| slot.is_visible)
        .ok_or(BookingError::SlotUnavailable(request.time_start))?;

    let reservation = store
        .insert_reservation(NewReservation {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            schedule_slot: slot,
        })
        .await?;

    info!(
        reservation_id = %reservation.id,
        time_start = %reservation.schedule_slot.time_start,
        "reservation requested"
    );
    Ok(reservation)
}

/// Refused with `ReservationConflict` when the reservation's own slot was
/// already consumed, when the span covers a consumed slot, or when it covers
/// a slot another pending reservation is waiting on. Slots in the span that
/// only rejected reservations point at are absorbed.
pub async fn accept_reservation<S>(
    store: &mut S,
    id: Uuid,
    duration_in_minutes: i32,
) -> BookingResult<Reservation>
where
    S: SlotStore + ReservationStore + ?Sized,
{
    let mut reservation = find_reservation(store, id).await?;
    reservation.transition(ReservationStatus::Accepted)?;

    let window = conflict_window(reservation.schedule_slot.time_start, duration_in_minutes)?;

    if !reservation.schedule_slot.is_visible {
        warn!(
            reservation_id = %id,
            slot_id = %reservation.schedule_slot.id,
            "acceptance refused, own slot already consumed"
        );
        return Err(BookingError::ReservationConflict(id));
    }

    let covered = slot_registry::find_in(store, window).await?;
    if let Some(taken) = covered.iter().find(|slot| !slot.is_visible) {
        warn!(
            reservation_id = %id,
            conflicting_slot = %taken.id,
            conflicting_start = %taken.time_start,
            "acceptance refused, span overlaps a consumed slot"
        );
        return Err(BookingError::ReservationConflict(id));
    }

    for slot in &covered {
        if let Some(holder) = slot_registry::find_holder(store, slot.id).await? {
            warn!(
                reservation_id = %id,
                holder_id = %holder.id,
                held_start = %slot.time_start,
                "acceptance refused, span overlaps a pending request"
            );
            return Err(BookingError::ReservationConflict(id));
        }
    }

    let absorbed = slot_registry::delete_in(store, window).await?;
    debug!(reservation_id = %id, absorbed, "slots absorbed into span");

    reservation.duration_in_minutes = Some(duration_in_minutes);
    slot_registry::hide_slot(store, &mut reservation.schedule_slot).await?;

    let reservation = store.update_reservation(reservation).await?;
    info!(
        reservation_id = %id,
        duration_in_minutes,
        time_start = %reservation.schedule_slot.time_start,
        "reservation accepted"
    );
    Ok(reservation)
}

/// The slot stays visible, so it can be requested again.
pub async fn reject_reservation<S>(store: &mut S, id: Uuid) -> BookingResult<Reservation>
where
    S: ReservationStore + ?Sized,
{
    let mut reservation = find_reservation(store, id).await?;
    reservation.transition(ReservationStatus::Rejected)?;

    let reservation = store.update_reservation(reservation).await?;
    info!(reservation_id = %id, "reservation rejected");
    Ok(reservation)
}

async fn find_reservation<S>(store: &mut S, id: Uuid) -> BookingResult<Reservation>
where
    S: ReservationStore + ?Sized,
{
    store
        .find_reservation_by_id(id)
        .await?
        .ok_or(BookingError::ReservationNotFound(id))
}
