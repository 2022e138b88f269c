use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance_km: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airplane {
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Flight joined with the airplane that fixes its seat envelope.
/// Capacity is immutable for the booking window, so carrying it on the
/// flight read is safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDetail {
    pub id: Uuid,
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl FlightDetail {
    pub fn capacity(&self) -> crate::capacity::Capacity {
        crate::capacity::Capacity::new(self.rows, self.seats_in_row)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One reserved seat on one flight. Never mutated after creation; the
/// per-flight (row, seat) uniqueness lives in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub flight_id: Uuid,
    pub order_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithTickets {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<Ticket>,
}
