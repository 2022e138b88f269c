use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use skybook_core::models::OrderWithTickets;

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

/// GET /orders/ (authenticated)
/// The caller's own orders, newest first, tickets inlined.
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<OrderWithTickets>>, AppError> {
    let user_id = claims.user_id()?;
    let orders = state
        .orders
        .list_orders(user_id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(orders))
}

/// GET /orders/{order_id}/ (authenticated)
/// Scoped to the owner; another user's order is indistinguishable from a
/// missing one.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<OrderWithTickets>, AppError> {
    let user_id = claims.user_id()?;
    let order = state
        .orders
        .get_order(order_id, user_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("order not found".to_string()))?;

    Ok(Json(order))
}
