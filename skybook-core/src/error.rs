/// Outcomes of the booking path that callers must tell apart.
///
/// `SeatTaken` is only ever produced by the store when the per-flight
/// (row, seat) uniqueness constraint rejects a commit. It is a business
/// conflict, never a server fault.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("row/seat exceeds airplane capacity")]
    CapacityExceeded,
    #[error("seat already taken for this flight")]
    SeatTaken,
    #[error("flight not found")]
    FlightNotFound,
    #[error("storage failure: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
