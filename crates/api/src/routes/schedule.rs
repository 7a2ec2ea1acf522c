use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules",
            get(handlers::schedule::get_schedule_slots)
                .post(handlers::schedule::create_schedule_slot),
        )
        .route(
            "/api/schedules/:id",
            delete(handlers::schedule::delete_schedule_slot),
        )
}
