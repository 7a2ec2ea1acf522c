use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use reservation_core::{
    models::reservation::{Reservation, ReservationRequest},
    services::reservation_workflow,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AdminAccess, error_handling::AppError},
};

#[derive(Debug, Deserialize)]
pub struct ReservationFilter {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AcceptParams {
    /// Minutes the accepted reservation occupies
    pub duration: i32,
}

/// Lists every reservation, or only those in `?status=`.
#[axum::debug_handler]
pub async fn get_reservations(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let mut uow = state.storage.begin().await?;
    let reservations = match filter.status.as_deref() {
        Some(status) => reservation_workflow::list_reservations_by_status(&mut *uow, status).await?,
        None => reservation_workflow::list_reservations(&mut *uow).await?,
    };
    uow.commit().await?;

    Ok(Json(reservations))
}

#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let mut uow = state.storage.begin().await?;
    let reservation = reservation_workflow::create_reservation(&mut *uow, payload).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[axum::debug_handler]
pub async fn accept_reservation(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
    Query(params): Query<AcceptParams>,
) -> Result<Json<Reservation>, AppError> {
    let mut uow = state.storage.begin().await?;
    let reservation =
        reservation_workflow::accept_reservation(&mut *uow, id, params.duration).await?;
    uow.commit().await?;

    Ok(Json(reservation))
}

#[axum::debug_handler]
pub async fn reject_reservation(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let mut uow = state.storage.begin().await?;
    let reservation = reservation_workflow::reject_reservation(&mut *uow, id).await?;
    uow.commit().await?;

    Ok(Json(reservation))
}
