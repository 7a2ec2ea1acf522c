use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use reservation_core::{
    models::schedule_slot::{ScheduleSlot, ScheduleSlotRequest},
    services::slot_registry,
};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AdminAccess, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn create_schedule_slot(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Json(payload): Json<ScheduleSlotRequest>,
) -> Result<(StatusCode, Json<ScheduleSlot>), AppError> {
    let mut uow = state.storage.begin().await?;
    let slot = slot_registry::open_slot(&mut *uow, payload.time_start).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn get_schedule_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ScheduleSlot>>, AppError> {
    let mut uow = state.storage.begin().await?;
    let slots = slot_registry::list_slots(&mut *uow).await?;
    uow.commit().await?;

    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn delete_schedule_slot(
    State(state): State<Arc<ApiState>>,
    _admin: AdminAccess,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut uow = state.storage.begin().await?;
    slot_registry::close_slot(&mut *uow, id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
