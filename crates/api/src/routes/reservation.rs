use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/reservations",
            get(handlers::reservation::get_reservations)
                .post(handlers::reservation::create_reservation),
        )
        .route(
            "/api/reservations/:id/accept",
            patch(handlers::reservation::accept_reservation),
        )
        .route(
            "/api/reservations/:id/reject",
            patch(handlers::reservation::reject_reservation),
        )
}
