use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// A flight's seat envelope, resolved from its airplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub rows: i32,
    pub seats_in_row: i32,
}

impl Capacity {
    pub fn new(rows: i32, seats_in_row: i32) -> Self {
        Self { rows, seats_in_row }
    }

    pub fn seat_count(&self) -> i64 {
        self.rows as i64 * self.seats_in_row as i64
    }

    /// Cheap bounds check run before the booking transaction touches
    /// storage. Seats are 1-based on both axes; zero and negative values
    /// are rejected the same way as values past the envelope.
    pub fn check_seat(&self, row: i32, seat: i32) -> Result<(), BookingError> {
        if row < 1 || seat < 1 || row > self.rows || seat > self.seats_in_row {
            return Err(BookingError::CapacityExceeded);
        }
        Ok(())
    }
}
