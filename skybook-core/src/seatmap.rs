use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::capacity::Capacity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCell {
    pub row: i32,
    pub seat: i32,
    pub taken: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMapRow {
    pub row: i32,
    pub seats: Vec<SeatCell>,
}

/// Expand a flight's capacity envelope into a full occupancy grid.
///
/// Rows ascend, seats ascend within each row. The occupied set is a
/// point-in-time snapshot taken without locking; the map is advisory
/// display data and may be stale by the time a booking is attempted.
pub fn build_seat_map(capacity: Capacity, occupied: &HashSet<(i32, i32)>) -> Vec<SeatMapRow> {
    let mut seat_map = Vec::with_capacity(capacity.rows.max(0) as usize);
    for row in 1..=capacity.rows {
        let mut seats = Vec::with_capacity(capacity.seats_in_row.max(0) as usize);
        for seat in 1..=capacity.seats_in_row {
            seats.push(SeatCell {
                row,
                seat,
                taken: occupied.contains(&(row, seat)),
            });
        }
        seat_map.push(SeatMapRow { row, seats });
    }
    seat_map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_exactly_rows_by_seats_cells() {
        let map = build_seat_map(Capacity::new(3, 4), &HashSet::new());
        assert_eq!(map.len(), 3);
        for row in &map {
            assert_eq!(row.seats.len(), 4);
        }
    }

    #[test]
    fn fresh_flight_has_no_taken_seats() {
        let map = build_seat_map(Capacity::new(3, 4), &HashSet::new());
        assert!(map
            .iter()
            .flat_map(|r| r.seats.iter())
            .all(|cell| !cell.taken));
    }

    #[test]
    fn taken_iff_pair_is_ticketed() {
        let mut occupied = HashSet::new();
        occupied.insert((2, 3));
        occupied.insert((1, 1));

        let map = build_seat_map(Capacity::new(3, 4), &occupied);

        for row in &map {
            for cell in &row.seats {
                let expected = occupied.contains(&(cell.row, cell.seat));
                assert_eq!(cell.taken, expected, "cell ({}, {})", cell.row, cell.seat);
            }
        }
        let taken: Vec<_> = map
            .iter()
            .flat_map(|r| r.seats.iter())
            .filter(|c| c.taken)
            .collect();
        assert_eq!(taken.len(), 2);
    }

    #[test]
    fn ordering_is_ascending_and_stable() {
        let mut occupied = HashSet::new();
        occupied.insert((2, 2));

        let first = build_seat_map(Capacity::new(4, 2), &occupied);
        let second = build_seat_map(Capacity::new(4, 2), &occupied);
        assert_eq!(first, second);

        for (i, row) in first.iter().enumerate() {
            assert_eq!(row.row, i as i32 + 1);
            for (j, cell) in row.seats.iter().enumerate() {
                assert_eq!(cell.row, row.row);
                assert_eq!(cell.seat, j as i32 + 1);
            }
        }
    }

    #[test]
    fn occupied_pairs_outside_the_envelope_are_ignored() {
        let mut occupied = HashSet::new();
        occupied.insert((99, 99));

        let map = build_seat_map(Capacity::new(2, 2), &occupied);
        assert!(map
            .iter()
            .flat_map(|r| r.seats.iter())
            .all(|cell| !cell.taken));
    }
}
