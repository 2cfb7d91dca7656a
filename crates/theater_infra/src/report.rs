//! Serializable views over a running theater.
//!
//! Views are snapshots: they copy what they show and hold no reference back
//! into the theater.

use serde::{Deserialize, Serialize};
use theater_core::{Customer, Line, OccupancyReport, SeatSlot, Theater};

// --- Seating ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub row: u32,
    pub seat: u32,
    pub position: u32,
    /// Party name, absent when the seat is free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<String>,
}

impl From<&SeatSlot> for SeatView {
    fn from(slot: &SeatSlot) -> Self {
        Self {
            row: slot.row,
            seat: slot.seat,
            position: slot.position,
            occupant: slot.occupant.clone(),
        }
    }
}

/// Row-major seating chart of one auditorium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingChartView {
    pub title: String,
    pub rows: u32,
    pub seats_per_row: u32,
    pub free: usize,
    pub seats: Vec<SeatView>,
}

impl From<&OccupancyReport> for SeatingChartView {
    fn from(report: &OccupancyReport) -> Self {
        Self {
            title: report.title.clone(),
            rows: report.rows,
            seats_per_row: report.seats_per_row,
            free: report.free_count(),
            seats: report.slots.iter().map(SeatView::from).collect(),
        }
    }
}

/// Seating charts for every auditorium, by ascending title.
pub fn seating_charts(theater: &Theater) -> Vec<SeatingChartView> {
    theater
        .venues()
        .map(|venue| SeatingChartView::from(&venue.occupancy_report()))
        .collect()
}

// --- Sales --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSales {
    pub title: String,
    pub tickets_sold: u32,
    pub occupancy: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub ticket_price: f64,
    pub venues: Vec<VenueSales>,
    pub total_tickets_sold: u64,
    pub total_revenue: f64,
}

impl SalesSummary {
    pub fn from_theater(theater: &Theater) -> Self {
        let venues = theater
            .venues()
            .map(|venue| VenueSales {
                title: venue.title().to_string(),
                tickets_sold: venue.tickets_sold(),
                occupancy: venue.occupancy(),
                capacity: venue.capacity(),
            })
            .collect();
        Self {
            ticket_price: theater.ticket_price(),
            venues,
            total_tickets_sold: theater.total_tickets_sold(),
            total_revenue: theater.total_revenue(),
        }
    }
}

// --- Lines --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingCustomerView {
    pub name: String,
    pub movie: String,
    pub party_size: u32,
}

impl From<&Customer> for WaitingCustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name().to_string(),
            movie: customer.movie().to_string(),
            party_size: customer.party_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineView {
    pub index: usize,
    pub name: String,
    /// Front of the line first.
    pub customers: Vec<WaitingCustomerView>,
}

impl LineView {
    pub fn new(index: usize, line: &Line) -> Self {
        Self {
            index,
            name: line.name().to_string(),
            customers: line.iter().map(WaitingCustomerView::from).collect(),
        }
    }
}

pub fn line_views(theater: &Theater) -> Vec<LineView> {
    theater
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| LineView::new(index, line))
        .collect()
}

/// Pretty-printed JSON for any view.
pub fn to_json<T: Serialize + ?Sized>(view: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}
