use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use skybook_core::models::{Airplane, AirplaneType, Airport, Crew, Route};
use skybook_core::repository::NewAirplane;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Query Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAirportRequest {
    pub name: String,
    #[serde(default)]
    pub closest_big_city: String,
}

#[derive(Debug, Deserialize)]
pub struct RouteListQuery {
    pub source: Option<Uuid>,
    pub destination: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance_km: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateAirplaneTypeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AirplaneListQuery {
    pub airplane_type: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAirplaneRequest {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateCrewRequest {
    pub first_name: String,
    pub last_name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/airports/", get(list_airports).post(create_airport))
        .route("/airports/{airport_id}/", get(get_airport))
        .route("/routes/", get(list_routes).post(create_route))
        .route("/routes/{route_id}/", get(get_route))
        .route(
            "/airplane-types/",
            get(list_airplane_types).post(create_airplane_type),
        )
        .route("/airplane-types/{airplane_type_id}/", get(get_airplane_type))
        .route("/airplanes/", get(list_airplanes).post(create_airplane))
        .route("/airplanes/{airplane_id}/", get(get_airplane))
        .route("/crews/", get(list_crews).post(create_crew))
        .route("/crews/{crew_id}/", get(get_crew))
}

// ============================================================================
// Airport Handlers
// ============================================================================

pub async fn list_airports(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Airport>>, AppError> {
    let airports = state
        .catalog
        .list_airports(query.search.as_deref())
        .await
        .map_err(AppError::internal)?;
    Ok(Json(airports))
}

pub async fn create_airport(
    State(state): State<AppState>,
    Json(req): Json<CreateAirportRequest>,
) -> Result<(StatusCode, Json<Airport>), AppError> {
    let airport = state
        .catalog
        .create_airport(&req.name, &req.closest_big_city)
        .await
        .map_err(AppError::internal)?;
    Ok((StatusCode::CREATED, Json(airport)))
}

pub async fn get_airport(
    State(state): State<AppState>,
    Path(airport_id): Path<Uuid>,
) -> Result<Json<Airport>, AppError> {
    let airport = state
        .catalog
        .get_airport(airport_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("airport not found".to_string()))?;
    Ok(Json(airport))
}

// ============================================================================
// Route Handlers
// ============================================================================

pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteListQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    let routes = state
        .catalog
        .list_routes(query.source, query.destination)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(routes))
}

pub async fn create_route(
    State(state): State<AppState>,
    Json(req): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    if req.source_id == req.destination_id {
        return Err(AppError::ValidationError(
            "source must differ from destination".to_string(),
        ));
    }
    if req.distance_km < 1 {
        return Err(AppError::ValidationError(
            "distance_km must be positive".to_string(),
        ));
    }

    let route = state
        .catalog
        .create_route(req.source_id, req.destination_id, req.distance_km)
        .await
        .map_err(AppError::internal)?;
    Ok((StatusCode::CREATED, Json(route)))
}

pub async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    let route = state
        .catalog
        .get_route(route_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("route not found".to_string()))?;
    Ok(Json(route))
}

// ============================================================================
// Airplane Type Handlers
// ============================================================================

pub async fn list_airplane_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<AirplaneType>>, AppError> {
    let types = state
        .catalog
        .list_airplane_types()
        .await
        .map_err(AppError::internal)?;
    Ok(Json(types))
}

pub async fn create_airplane_type(
    State(state): State<AppState>,
    Json(req): Json<CreateAirplaneTypeRequest>,
) -> Result<(StatusCode, Json<AirplaneType>), AppError> {
    let airplane_type = state
        .catalog
        .create_airplane_type(&req.name)
        .await
        .map_err(AppError::internal)?;
    Ok((StatusCode::CREATED, Json(airplane_type)))
}

pub async fn get_airplane_type(
    State(state): State<AppState>,
    Path(airplane_type_id): Path<Uuid>,
) -> Result<Json<AirplaneType>, AppError> {
    let airplane_type = state
        .catalog
        .get_airplane_type(airplane_type_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("airplane type not found".to_string()))?;
    Ok(Json(airplane_type))
}

// ============================================================================
// Airplane Handlers
// ============================================================================

pub async fn list_airplanes(
    State(state): State<AppState>,
    Query(query): Query<AirplaneListQuery>,
) -> Result<Json<Vec<Airplane>>, AppError> {
    let airplanes = state
        .catalog
        .list_airplanes(query.airplane_type, query.search.as_deref())
        .await
        .map_err(AppError::internal)?;
    Ok(Json(airplanes))
}

pub async fn create_airplane(
    State(state): State<AppState>,
    Json(req): Json<CreateAirplaneRequest>,
) -> Result<(StatusCode, Json<Airplane>), AppError> {
    // The seat envelope must be a real grid; the booking path trusts it.
    if req.rows < 1 || req.seats_in_row < 1 {
        return Err(AppError::ValidationError(
            "rows and seats_in_row must be positive".to_string(),
        ));
    }

    let airplane = state
        .catalog
        .create_airplane(&NewAirplane {
            name: req.name,
            rows: req.rows,
            seats_in_row: req.seats_in_row,
            airplane_type_id: req.airplane_type_id,
        })
        .await
        .map_err(AppError::internal)?;
    Ok((StatusCode::CREATED, Json(airplane)))
}

pub async fn get_airplane(
    State(state): State<AppState>,
    Path(airplane_id): Path<Uuid>,
) -> Result<Json<Airplane>, AppError> {
    let airplane = state
        .catalog
        .get_airplane(airplane_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("airplane not found".to_string()))?;
    Ok(Json(airplane))
}

// ============================================================================
// Crew Handlers
// ============================================================================

pub async fn list_crews(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Crew>>, AppError> {
    let crews = state
        .catalog
        .list_crews(query.search.as_deref())
        .await
        .map_err(AppError::internal)?;
    Ok(Json(crews))
}

pub async fn create_crew(
    State(state): State<AppState>,
    Json(req): Json<CreateCrewRequest>,
) -> Result<(StatusCode, Json<Crew>), AppError> {
    let crew = state
        .catalog
        .create_crew(&req.first_name, &req.last_name)
        .await
        .map_err(AppError::internal)?;
    Ok((StatusCode::CREATED, Json(crew)))
}

pub async fn get_crew(
    State(state): State<AppState>,
    Path(crew_id): Path<Uuid>,
) -> Result<Json<Crew>, AppError> {
    let crew = state
        .catalog
        .get_crew(crew_id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::NotFoundError("crew not found".to_string()))?;
    Ok(Json(crew))
}
