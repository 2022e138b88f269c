use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use skybook_core::models::FlightDetail;
use skybook_core::repository::{FlightFilter, FlightOrdering, NewFlight};
use skybook_core::seatmap::{build_seat_map, SeatMapRow};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FlightListQuery {
    pub route: Option<Uuid>,
    pub airplane: Option<Uuid>,
    pub ordering: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFlightRequest {
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: chrono::DateTime<chrono::Utc>,
    pub arrival_time: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub crew_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub flight: Uuid,
    pub rows: i32,
    pub seats_in_row: i32,
    pub seat_map: Vec<SeatMapRow>,
}

#[derive(Debug, Deserialize)]
pub struct BookSeatRequest {
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize)]
pub struct BookSeatResponse {
    pub order: Uuid,
    pub flight: Uuid,
    pub ticket: TicketResponse,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights/", get(list_flights).post(create_flight))
        .route("/flights/{flight_id}/", get(get_flight))
        .route("/flights/{flight_id}/seats/", get(seat_map))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /flights/
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightListQuery>,
) -> Result<Json<Vec<FlightDetail>>, AppError> {
    let order_by = match query.ordering.as_deref() {
        Some("departure_time") => FlightOrdering::DepartureTime,
        Some("arrival_time") => FlightOrdering::ArrivalTime,
        _ => FlightOrdering::Id,
    };

    let flights = state
        .flights
        .list_flights(&FlightFilter {
            route: query.route,
            airplane: query.airplane,
            order_by,
        })
        .await
        .map_err(AppError::internal)?;

    Ok(Json(flights))
}

/// POST /flights/
pub async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<FlightDetail>), AppError> {
    if req.arrival_time <= req.departure_time {
        return Err(AppError::ValidationError(
            "arrival_time must be after departure_time".to_string(),
        ));
    }

    let flight = state
        .flights
        .create_flight(&NewFlight {
            route_id: req.route_id,
            airplane_id: req.airplane_id,
            departure_time: req.departure_time,
            arrival_time: req.arrival_time,
            crew_ids: req.crew_ids,
        })
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(flight)))
}

/// GET /flights/{flight_id}/
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<FlightDetail>, AppError> {
    let flight = state
        .flights
        .get_flight(flight_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("flight not found".to_string()))?;

    Ok(Json(flight))
}

/// GET /flights/{flight_id}/seats/
///
/// A point-in-time snapshot of the occupancy grid. Read without locking;
/// it may be stale by the time a booking lands, which is fine for display.
pub async fn seat_map(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let flight = state
        .flights
        .get_flight(flight_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("flight not found".to_string()))?;

    let occupied = state
        .flights
        .occupied_seats(flight_id)
        .await
        .map_err(AppError::internal)?;

    let capacity = flight.capacity();
    let seat_map = build_seat_map(capacity, &occupied);

    Ok(Json(SeatMapResponse {
        flight: flight.id,
        rows: capacity.rows,
        seats_in_row: capacity.seats_in_row,
        seat_map,
    }))
}

/// POST /flights/{flight_id}/book/ (authenticated)
pub async fn book_seat(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BookSeatRequest>,
) -> Result<(StatusCode, Json<BookSeatResponse>), AppError> {
    let user_id = claims.user_id()?;

    // 1. Resolve the flight and its seat envelope
    let flight = state
        .flights
        .get_flight(flight_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("flight not found".to_string()))?;

    // 2. Cheap bounds check before any write
    flight.capacity().check_seat(req.row, req.seat)?;

    // 3. Atomic reserve-or-reject; the store's uniqueness constraint is the
    //    arbiter under concurrency, not a pre-read of the seat.
    let ticket = state
        .bookings
        .book_seat(flight_id, user_id, req.row, req.seat)
        .await?;

    info!(
        "Seat r{}s{} booked on flight {} by {}",
        ticket.row, ticket.seat, flight_id, user_id
    );

    Ok((
        StatusCode::CREATED,
        Json(BookSeatResponse {
            order: ticket.order_id,
            flight: ticket.flight_id,
            ticket: TicketResponse {
                id: ticket.id,
                row: ticket.row,
                seat: ticket.seat,
            },
        }),
    ))
}
