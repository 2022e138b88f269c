pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod database;
pub mod flight_repo;
pub mod order_repo;

pub use booking_repo::PostgresBookingRepository;
pub use catalog_repo::PostgresCatalogRepository;
pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use order_repo::PostgresOrderRepository;
