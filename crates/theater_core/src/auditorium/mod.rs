//! Auditoriums: fixed-capacity venues and their seat allocator.

pub mod report;
pub mod seating;

pub use report::{OccupancyReport, SeatSlot};
pub use seating::{Auditorium, AuditoriumError, Seat};
