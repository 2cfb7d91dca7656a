//! Auditorium seat allocator.
//!
//! An auditorium has `rows * seats_per_row` logical positions numbered from 1
//! in row-major order. Only claimed positions are stored, as `Seat` records kept
//! in strictly ascending position order. Parties are packed into the lowest free
//! positions and may be split across non-adjacent seats.

use std::fmt;

use super::report::{OccupancyReport, SeatSlot};
use crate::registry::Keyed;

/// One claimed unit of capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    position: u32,
    occupant: String,
}

impl Seat {
    fn new(position: u32, occupant: &str) -> Self {
        Self {
            position,
            occupant: occupant.to_string(),
        }
    }

    /// 1-based position in row-major order.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn occupant(&self) -> &str {
        &self.occupant
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditoriumError {
    /// Party is larger than the number of free seats. Nothing was changed.
    CapacityExceeded { requested: u32, remaining: u32 },
    /// Asked to release more seats than are occupied. Nothing was changed.
    InsufficientOccupancy { requested: u32, occupied: u32 },
    /// Fewer matching occupants than requested were found. The ones that were
    /// found have already been released.
    IncompleteRemoval { requested: u32, removed: u32 },
    /// `rows * seats_per_row` does not fit in a seat position.
    LayoutTooLarge { rows: u32, seats_per_row: u32 },
}

impl fmt::Display for AuditoriumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditoriumError::CapacityExceeded {
                requested,
                remaining,
            } => write!(
                f,
                "not enough room for {requested} viewers ({remaining} seats remaining)"
            ),
            AuditoriumError::InsufficientOccupancy {
                requested,
                occupied,
            } => write!(
                f,
                "party size {requested} cannot be greater than number of viewers ({occupied})"
            ),
            AuditoriumError::IncompleteRemoval { requested, removed } => write!(
                f,
                "only {removed} of {requested} party members were found and removed"
            ),
            AuditoriumError::LayoutTooLarge {
                rows,
                seats_per_row,
            } => write!(
                f,
                "{rows} rows of {seats_per_row} seats exceed the largest supported auditorium"
            ),
        }
    }
}

impl std::error::Error for AuditoriumError {}

/// A room showing one movie.
///
/// The title and seating structure are fixed at construction; showing another
/// movie or changing the layout means building a new `Auditorium`.
#[derive(Debug, Clone)]
pub struct Auditorium {
    title: String,
    rows: u32,
    seats_per_row: u32,
    capacity: u32,
    tickets_sold: u32,
    seats: Vec<Seat>,
}

impl Keyed for Auditorium {
    type Key = String;

    fn key(&self) -> &String {
        &self.title
    }
}

impl Auditorium {
    /// Fails with `LayoutTooLarge` when the seat count overflows a position.
    pub fn new(
        title: impl Into<String>,
        rows: u32,
        seats_per_row: u32,
    ) -> Result<Self, AuditoriumError> {
        let capacity = rows
            .checked_mul(seats_per_row)
            .ok_or(AuditoriumError::LayoutTooLarge {
                rows,
                seats_per_row,
            })?;
        Ok(Self {
            title: title.into(),
            rows,
            seats_per_row,
            capacity,
            tickets_sold: 0,
            seats: Vec::new(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn tickets_sold(&self) -> u32 {
        self.tickets_sold
    }

    pub fn occupancy(&self) -> u32 {
        self.seats.len() as u32
    }

    pub fn remaining_seats(&self) -> u32 {
        self.capacity - self.occupancy()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Occupied seats in ascending position order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// Sets the ticket counter back to zero. Seated viewers stay.
    pub fn reset_ticket_counter(&mut self) {
        self.tickets_sold = 0;
    }

    /// Seats a party of `party_size` under `party_name`.
    ///
    /// Claims the `party_size` lowest-numbered free positions. Existing
    /// occupants never move. Fails without side effects when the party does
    /// not fit.
    pub fn add_party(&mut self, party_name: &str, party_size: u32) -> Result<(), AuditoriumError> {
        let remaining = self.remaining_seats();
        if party_size > remaining {
            tracing::debug!(
                "CapacityExceeded title={} party={} requested={} remaining={}",
                self.title,
                party_name,
                party_size,
                remaining
            );
            return Err(AuditoriumError::CapacityExceeded {
                requested: party_size,
                remaining,
            });
        }

        self.tickets_sold = self.tickets_sold.saturating_add(party_size);

        // Merge the occupied run with new claims in a single ascending pass.
        let mut merged = Vec::with_capacity(self.seats.len() + party_size as usize);
        let mut occupied = std::mem::take(&mut self.seats).into_iter().peekable();
        let mut unclaimed = party_size;
        for position in 1..=self.capacity {
            if unclaimed == 0 {
                break;
            }
            if let Some(seat) = occupied.next_if(|seat| seat.position == position) {
                merged.push(seat);
            } else {
                merged.push(Seat::new(position, party_name));
                unclaimed -= 1;
            }
        }
        merged.extend(occupied);
        self.seats = merged;

        tracing::debug!(
            "PartySeated title={} party={} size={} occupancy={}",
            self.title,
            party_name,
            party_size,
            self.seats.len()
        );
        Ok(())
    }

    /// Releases up to `party_size` seats held by `party_name`, lowest first.
    ///
    /// Not transactional: if fewer than `party_size` matching seats exist, the
    /// ones found are still released and `IncompleteRemoval` reports how many.
    /// The ticket counter is not touched.
    pub fn remove_party(
        &mut self,
        party_name: &str,
        party_size: u32,
    ) -> Result<(), AuditoriumError> {
        let occupied = self.occupancy();
        if party_size > occupied {
            return Err(AuditoriumError::InsufficientOccupancy {
                requested: party_size,
                occupied,
            });
        }

        let mut removed = 0;
        self.seats.retain(|seat| {
            if removed < party_size && seat.occupant == party_name {
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed < party_size {
            tracing::warn!(
                "IncompleteRemoval title={} party={} requested={} removed={}",
                self.title,
                party_name,
                party_size,
                removed
            );
            return Err(AuditoriumError::IncompleteRemoval {
                requested: party_size,
                removed,
            });
        }
        Ok(())
    }

    /// Empties every seat. The ticket counter is not touched.
    pub fn clear_all(&mut self) {
        self.seats.clear();
    }

    /// Row-major report over every logical seat.
    pub fn occupancy_report(&self) -> OccupancyReport {
        let mut slots = Vec::with_capacity(self.capacity as usize);
        let mut occupied = self.seats.iter().peekable();
        for row in 1..=self.rows {
            for seat in 1..=self.seats_per_row {
                let position = (row - 1) * self.seats_per_row + seat;
                let occupant = occupied
                    .next_if(|s| s.position == position)
                    .map(|s| s.occupant.clone());
                slots.push(SeatSlot {
                    row,
                    seat,
                    position,
                    occupant,
                });
            }
        }
        OccupancyReport {
            title: self.title.clone(),
            rows: self.rows,
            seats_per_row: self.seats_per_row,
            slots,
        }
    }
}
