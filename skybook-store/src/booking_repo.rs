use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use skybook_core::error::BookingError;
use skybook_core::models::Ticket;
use skybook_core::repository::BookingRepository;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn book_seat(
        &self,
        flight_id: Uuid,
        user_id: Uuid,
        row: i32,
        seat: i32,
    ) -> Result<Ticket, BookingError> {
        // One transaction for the order and its ticket. No seat-is-free
        // probe here: uniq_ticket_place_per_flight arbitrates races at
        // insert time, which stays correct across server processes.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BookingError::Storage(e.into()))?;

        let order_id = Uuid::new_v4();
        if let Err(err) = sqlx::query("INSERT INTO orders (id, user_id) VALUES ($1, $2)")
            .bind(order_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
        {
            let _ = tx.rollback().await;
            return Err(BookingError::Storage(err.into()));
        }

        let ticket_id = Uuid::new_v4();
        let inserted = sqlx::query(
            "INSERT INTO tickets (id, flight_id, order_id, seat_row, seat) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(ticket_id)
        .bind(flight_id)
        .bind(order_id)
        .bind(row)
        .bind(seat)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            // The order must not survive without its ticket.
            let _ = tx.rollback().await;
            return Err(interpret_ticket_error(err));
        }

        tx.commit()
            .await
            .map_err(|e| BookingError::Storage(e.into()))?;

        info!(
            "Ticket {} committed: flight {} r{}s{} order {}",
            ticket_id, flight_id, row, seat, order_id
        );

        Ok(Ticket {
            id: ticket_id,
            row,
            seat,
            flight_id,
            order_id,
        })
    }
}

/// A unique violation on the ticket insert means another booking already
/// holds the seat; that is a business conflict, not a storage fault.
fn interpret_ticket_error(err: sqlx::Error) -> BookingError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return BookingError::SeatTaken;
        }
        if db_err.is_foreign_key_violation() {
            return BookingError::FlightNotFound;
        }
    }
    BookingError::Storage(err.into())
}
