//! Waiting lines and the round-robin order they are served in.

pub mod line;
pub mod round_robin;

pub use line::Line;
pub use round_robin::{Cursor, LineScheduler, PRIORITY_LINE, SchedulerError};
