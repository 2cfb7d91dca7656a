#![forbid(unsafe_code)]

pub mod auditorium;
pub mod customer;
pub mod registry;
pub mod scheduler;
pub mod theater;

pub use auditorium::{Auditorium, AuditoriumError, OccupancyReport, SeatSlot};
pub use customer::Customer;
pub use registry::{OrderedRegistry, RegistryError, SearchResult};
pub use scheduler::{Line, LineScheduler, SchedulerError};
pub use theater::{AdmissionMetrics, EjectReason, ServeOutcome, Theater, TheaterError};
