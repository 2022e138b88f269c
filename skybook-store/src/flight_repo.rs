use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use skybook_core::models::FlightDetail;
use skybook_core::repository::{
    FlightFilter, FlightOrdering, FlightRepository, NewFlight, RepoError,
};

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct FlightDetailRow {
    id: Uuid,
    route_id: Uuid,
    airplane_id: Uuid,
    departure_time: chrono::DateTime<chrono::Utc>,
    arrival_time: chrono::DateTime<chrono::Utc>,
    #[sqlx(rename = "seat_rows")]
    rows: i32,
    seats_in_row: i32,
}

impl From<FlightDetailRow> for FlightDetail {
    fn from(row: FlightDetailRow) -> Self {
        FlightDetail {
            id: row.id,
            route_id: row.route_id,
            airplane_id: row.airplane_id,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            rows: row.rows,
            seats_in_row: row.seats_in_row,
        }
    }
}

const FLIGHT_DETAIL_SELECT: &str = "SELECT f.id, f.route_id, f.airplane_id, \
     f.departure_time, f.arrival_time, a.seat_rows, a.seats_in_row \
     FROM flights f JOIN airplanes a ON a.id = f.airplane_id";

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn get_flight(&self, id: Uuid) -> Result<Option<FlightDetail>, RepoError> {
        let row = sqlx::query_as::<_, FlightDetailRow>(&format!(
            "{} WHERE f.id = $1",
            FLIGHT_DETAIL_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FlightDetail::from))
    }

    async fn occupied_seats(&self, flight_id: Uuid) -> Result<HashSet<(i32, i32)>, RepoError> {
        let pairs = sqlx::query_as::<_, (i32, i32)>(
            "SELECT seat_row, seat FROM tickets WHERE flight_id = $1",
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pairs.into_iter().collect())
    }

    async fn list_flights(&self, filter: &FlightFilter) -> Result<Vec<FlightDetail>, RepoError> {
        let order_clause = match filter.order_by {
            FlightOrdering::Id => "f.id",
            FlightOrdering::DepartureTime => "f.departure_time",
            FlightOrdering::ArrivalTime => "f.arrival_time",
        };

        let sql = format!(
            "{} WHERE ($1::uuid IS NULL OR f.route_id = $1) \
             AND ($2::uuid IS NULL OR f.airplane_id = $2) \
             ORDER BY {}",
            FLIGHT_DETAIL_SELECT, order_clause
        );

        let rows = sqlx::query_as::<_, FlightDetailRow>(&sql)
            .bind(filter.route)
            .bind(filter.airplane)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FlightDetail::from).collect())
    }

    async fn create_flight(&self, new: &NewFlight) -> Result<FlightDetail, RepoError> {
        let flight_id = Uuid::new_v4();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO flights (id, route_id, airplane_id, departure_time, arrival_time) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(flight_id)
        .bind(new.route_id)
        .bind(new.airplane_id)
        .bind(new.departure_time)
        .bind(new.arrival_time)
        .execute(&mut *tx)
        .await?;

        for crew_id in &new.crew_ids {
            sqlx::query("INSERT INTO flight_crews (flight_id, crew_id) VALUES ($1, $2)")
                .bind(flight_id)
                .bind(crew_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_flight(flight_id)
            .await?
            .ok_or_else(|| "flight missing after insert".into())
    }
}
