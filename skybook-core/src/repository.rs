use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::{
    Airplane, AirplaneType, Airport, Crew, FlightDetail, OrderWithTickets, Route, Ticket,
};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, Default)]
pub enum FlightOrdering {
    #[default]
    Id,
    DepartureTime,
    ArrivalTime,
}

#[derive(Debug, Clone, Default)]
pub struct FlightFilter {
    pub route: Option<Uuid>,
    pub airplane: Option<Uuid>,
    pub order_by: FlightOrdering,
}

#[derive(Debug, Clone)]
pub struct NewFlight {
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewAirplane {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
}

/// Repository trait for flight reads and the seat snapshot.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn get_flight(&self, id: Uuid) -> Result<Option<FlightDetail>, RepoError>;

    /// One unlocked read of the (row, seat) pairs already ticketed for a
    /// flight. Feeds the seat map builder.
    async fn occupied_seats(&self, flight_id: Uuid) -> Result<HashSet<(i32, i32)>, RepoError>;

    async fn list_flights(&self, filter: &FlightFilter) -> Result<Vec<FlightDetail>, RepoError>;

    async fn create_flight(&self, new: &NewFlight) -> Result<FlightDetail, RepoError>;
}

/// Repository trait for the atomic reserve-or-reject operation.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create an order for `user_id` and a ticket at (row, seat) on the
    /// flight, committed as one unit. If another booking already holds the
    /// seat the whole unit rolls back and `SeatTaken` is returned; the
    /// order never survives without its ticket.
    async fn book_seat(
        &self,
        flight_id: Uuid,
        user_id: Uuid,
        row: i32,
        seat: i32,
    ) -> Result<Ticket, BookingError>;
}

/// Repository trait for order reads, scoped to their owner.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_orders(&self, user_id: Uuid) -> Result<Vec<OrderWithTickets>, RepoError>;

    async fn get_order(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrderWithTickets>, RepoError>;
}

/// Repository trait for the supporting catalog entities. Plain data access;
/// nothing here participates in the booking transaction.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_airport(&self, name: &str, closest_big_city: &str)
        -> Result<Airport, RepoError>;
    async fn list_airports(&self, search: Option<&str>) -> Result<Vec<Airport>, RepoError>;
    async fn get_airport(&self, id: Uuid) -> Result<Option<Airport>, RepoError>;

    async fn create_route(
        &self,
        source_id: Uuid,
        destination_id: Uuid,
        distance_km: i32,
    ) -> Result<Route, RepoError>;
    async fn list_routes(
        &self,
        source: Option<Uuid>,
        destination: Option<Uuid>,
    ) -> Result<Vec<Route>, RepoError>;
    async fn get_route(&self, id: Uuid) -> Result<Option<Route>, RepoError>;

    async fn create_airplane_type(&self, name: &str) -> Result<AirplaneType, RepoError>;
    async fn list_airplane_types(&self) -> Result<Vec<AirplaneType>, RepoError>;
    async fn get_airplane_type(&self, id: Uuid) -> Result<Option<AirplaneType>, RepoError>;

    async fn create_airplane(&self, new: &NewAirplane) -> Result<Airplane, RepoError>;
    async fn list_airplanes(
        &self,
        airplane_type: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<Airplane>, RepoError>;
    async fn get_airplane(&self, id: Uuid) -> Result<Option<Airplane>, RepoError>;

    async fn create_crew(&self, first_name: &str, last_name: &str) -> Result<Crew, RepoError>;
    async fn list_crews(&self, search: Option<&str>) -> Result<Vec<Crew>, RepoError>;
    async fn get_crew(&self, id: Uuid) -> Result<Option<Crew>, RepoError>;
}
