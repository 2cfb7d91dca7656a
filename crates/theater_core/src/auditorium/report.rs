//! Positional occupancy report for one auditorium.

use std::fmt;

/// One logical seat in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSlot {
    /// 1-based row.
    pub row: u32,
    /// 1-based seat within the row.
    pub seat: u32,
    /// 1-based row-major position.
    pub position: u32,
    /// Party label, `None` when free.
    pub occupant: Option<String>,
}

impl SeatSlot {
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Every seat of an auditorium in row-major order, free or occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyReport {
    pub title: String,
    pub rows: u32,
    pub seats_per_row: u32,
    pub slots: Vec<SeatSlot>,
}

impl OccupancyReport {
    /// Slot at `row`, `seat` (both 1-based).
    pub fn slot(&self, row: u32, seat: u32) -> Option<&SeatSlot> {
        if row == 0 || seat == 0 || seat > self.seats_per_row {
            return None;
        }
        let index = (row - 1) as usize * self.seats_per_row as usize + (seat - 1) as usize;
        self.slots.get(index)
    }

    pub fn occupied_positions(&self) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|slot| !slot.is_free())
            .map(|slot| slot.position)
            .collect()
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_free()).count()
    }
}

impl fmt::Display for OccupancyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match &slot.occupant {
                None => writeln!(f, "Row {} seat {} is free.", slot.row, slot.seat)?,
                Some(name) => writeln!(
                    f,
                    "Row {} seat {} used by {}'s party.",
                    slot.row, slot.seat, name
                )?,
            }
        }
        Ok(())
    }
}
