pub mod capacity;
pub mod error;
pub mod models;
pub mod repository;
pub mod seatmap;

pub use capacity::Capacity;
pub use error::BookingError;
