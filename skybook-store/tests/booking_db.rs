//! Transactional booking tests against a real Postgres.
//!
//! Ignored by default; run with a database available:
//!   DATABASE_URL=postgres://... cargo test -p skybook-store -- --ignored

use chrono::{Duration, Utc};
use uuid::Uuid;

use skybook_core::error::BookingError;
use skybook_core::repository::{BookingRepository, FlightRepository, NewFlight};
use skybook_store::{DbClient, PostgresBookingRepository, PostgresFlightRepository};

async fn test_db() -> DbClient {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let db = DbClient::new(&url, 5).await.expect("connect");
    db.migrate().await.expect("migrate");
    db
}

/// Seed a complete airport -> route -> airplane -> flight chain and return
/// the flight id. Names are salted so reruns don't trip unique constraints.
async fn seed_flight(db: &DbClient, rows: i32, seats_in_row: i32) -> Uuid {
    let salt = Uuid::new_v4().simple().to_string();

    let source = Uuid::new_v4();
    let destination = Uuid::new_v4();
    sqlx::query("INSERT INTO airports (id, name, closest_big_city) VALUES ($1, $2, $3)")
        .bind(source)
        .bind(format!("Boryspil {}", salt))
        .bind("Kyiv")
        .execute(&db.pool)
        .await
        .expect("seed source airport");
    sqlx::query("INSERT INTO airports (id, name, closest_big_city) VALUES ($1, $2, $3)")
        .bind(destination)
        .bind(format!("Lviv {}", salt))
        .bind("Lviv")
        .execute(&db.pool)
        .await
        .expect("seed destination airport");

    let route = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO routes (id, source_id, destination_id, distance_km) VALUES ($1, $2, $3, $4)",
    )
    .bind(route)
    .bind(source)
    .bind(destination)
    .bind(468)
    .execute(&db.pool)
    .await
    .expect("seed route");

    let airplane_type = Uuid::new_v4();
    sqlx::query("INSERT INTO airplane_types (id, name) VALUES ($1, $2)")
        .bind(airplane_type)
        .bind(format!("Airbus A320 {}", salt))
        .execute(&db.pool)
        .await
        .expect("seed airplane type");

    let airplane = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO airplanes (id, name, seat_rows, seats_in_row, airplane_type_id) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(airplane)
    .bind(format!("UR-{}", salt))
    .bind(rows)
    .bind(seats_in_row)
    .bind(airplane_type)
    .execute(&db.pool)
    .await
    .expect("seed airplane");

    let flights = PostgresFlightRepository::new(db.pool.clone());
    let departure = Utc::now() + Duration::days(1);
    let flight = flights
        .create_flight(&NewFlight {
            route_id: route,
            airplane_id: airplane,
            departure_time: departure,
            arrival_time: departure + Duration::hours(1),
            crew_ids: vec![],
        })
        .await
        .expect("seed flight");

    flight.id
}

async fn order_count(db: &DbClient, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&db.pool)
        .await
        .expect("count orders")
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn booking_commits_order_and_ticket_together() {
    let db = test_db().await;
    let flight_id = seed_flight(&db, 3, 4).await;
    let bookings = PostgresBookingRepository::new(db.pool.clone());
    let flights = PostgresFlightRepository::new(db.pool.clone());
    let user = Uuid::new_v4();

    let ticket = bookings.book_seat(flight_id, user, 2, 3).await.expect("book");
    assert_eq!(ticket.row, 2);
    assert_eq!(ticket.seat, 3);
    assert_eq!(ticket.flight_id, flight_id);
    assert_eq!(order_count(&db, user).await, 1);

    let occupied = flights.occupied_seats(flight_id).await.expect("snapshot");
    assert_eq!(occupied.len(), 1);
    assert!(occupied.contains(&(2, 3)));
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn rebooking_a_taken_seat_rolls_back_the_order() {
    let db = test_db().await;
    let flight_id = seed_flight(&db, 3, 4).await;
    let bookings = PostgresBookingRepository::new(db.pool.clone());
    let first_user = Uuid::new_v4();
    let second_user = Uuid::new_v4();

    bookings
        .book_seat(flight_id, first_user, 1, 1)
        .await
        .expect("first booking");

    let conflict = bookings.book_seat(flight_id, second_user, 1, 1).await;
    assert!(matches!(conflict, Err(BookingError::SeatTaken)));

    // No orphan order may survive the rolled-back unit.
    assert_eq!(order_count(&db, second_user).await, 0);
    assert_eq!(order_count(&db, first_user).await, 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn booking_an_unknown_flight_is_not_found() {
    let db = test_db().await;
    let bookings = PostgresBookingRepository::new(db.pool.clone());
    let user = Uuid::new_v4();

    let result = bookings.book_seat(Uuid::new_v4(), user, 1, 1).await;
    assert!(matches!(result, Err(BookingError::FlightNotFound)));
    assert_eq!(order_count(&db, user).await, 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn concurrent_bookings_for_one_seat_resolve_to_one_winner() {
    let db = test_db().await;
    let flight_id = seed_flight(&db, 3, 4).await;
    let flights = PostgresFlightRepository::new(db.pool.clone());
    let first_user = Uuid::new_v4();
    let second_user = Uuid::new_v4();

    let left = PostgresBookingRepository::new(db.pool.clone());
    let right = PostgresBookingRepository::new(db.pool.clone());

    let (a, b) = tokio::join!(
        left.book_seat(flight_id, first_user, 2, 2),
        right.book_seat(flight_id, second_user, 2, 2),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one racer may win the seat");

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser, Err(BookingError::SeatTaken)));

    // One order total across both racers, and one occupied cell.
    let total = order_count(&db, first_user).await + order_count(&db, second_user).await;
    assert_eq!(total, 1);
    let occupied = flights.occupied_seats(flight_id).await.expect("snapshot");
    assert_eq!(occupied.len(), 1);
    assert!(occupied.contains(&(2, 2)));
}
