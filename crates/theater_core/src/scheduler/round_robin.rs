//! Round-robin service across waiting lines.
//!
//! Line 0 is the priority line; every other line is a regular line. Serving
//! walks the lines in index order starting at the cursor, skipping empty ones.
//! Line choice at intake is a separate shortest-line policy.

use std::fmt;

use super::line::Line;
use crate::customer::Customer;

/// Index of the priority line.
pub const PRIORITY_LINE: usize = 0;

/// Which line is served next. Nothing can be served until it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Unset,
    At(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Line index outside `[0, lines)`.
    InvalidLineIndex { index: usize, lines: usize },
    /// The serving order was never established with `set_next_line`.
    SchedulerNotInitialized,
    /// No line accepts this customer (no regular line and not priority eligible).
    NoEligibleLine,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidLineIndex { index, lines } => {
                write!(f, "invalid index {index} for next line ({lines} lines)")
            }
            SchedulerError::SchedulerNotInitialized => {
                write!(f, "customer line order has not been established")
            }
            SchedulerError::NoEligibleLine => write!(f, "no line is available to this customer"),
        }
    }
}

impl std::error::Error for SchedulerError {}

#[derive(Debug, Clone, Default)]
pub struct LineScheduler {
    lines: Vec<Line>,
    cursor: Cursor,
}

impl LineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line and returns its index.
    pub fn add_line(&mut self, name: impl Into<String>) -> usize {
        self.lines.push(Line::new(name));
        self.lines.len() - 1
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Result<&Line, SchedulerError> {
        self.lines.get(index).ok_or(SchedulerError::InvalidLineIndex {
            index,
            lines: self.lines.len(),
        })
    }

    pub fn all_empty(&self) -> bool {
        self.lines.iter().all(Line::is_empty)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn next_line(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Unset => None,
            Cursor::At(index) => Some(index),
        }
    }

    pub fn set_next_line(&mut self, index: usize) -> Result<(), SchedulerError> {
        if index >= self.lines.len() {
            return Err(SchedulerError::InvalidLineIndex {
                index,
                lines: self.lines.len(),
            });
        }
        self.cursor = Cursor::At(index);
        Ok(())
    }

    /// Moves the cursor to the following line, wrapping after the last.
    pub fn advance(&mut self) -> Result<usize, SchedulerError> {
        let Cursor::At(current) = self.cursor else {
            return Err(SchedulerError::SchedulerNotInitialized);
        };
        let next = (current + 1) % self.lines.len();
        self.cursor = Cursor::At(next);
        Ok(next)
    }

    /// Head of the first non-empty line at or after the cursor.
    ///
    /// The cursor is left on that line. When every line is empty the cursor
    /// ends where it started and `None` is returned.
    pub fn peek_next_ready(&mut self) -> Result<Option<&Customer>, SchedulerError> {
        let Some(index) = self.ready_line()? else {
            return Ok(None);
        };
        Ok(self.lines[index].front())
    }

    /// Dequeues from the first non-empty line and moves the cursor past it.
    pub fn take_next(&mut self) -> Result<Option<Customer>, SchedulerError> {
        let Some(index) = self.ready_line()? else {
            return Ok(None);
        };
        let customer = self.lines[index].pop_front();
        self.advance()?;
        Ok(customer)
    }

    fn ready_line(&mut self) -> Result<Option<usize>, SchedulerError> {
        let Cursor::At(mut index) = self.cursor else {
            return Err(SchedulerError::SchedulerNotInitialized);
        };
        for _ in 0..self.lines.len() {
            if !self.lines[index].is_empty() {
                return Ok(Some(index));
            }
            index = self.advance()?;
        }
        Ok(None)
    }

    /// Line a new customer should join.
    ///
    /// Among regular lines the strictly shortest wins, lowest index on ties.
    /// A priority-eligible customer joins the priority line instead only when
    /// it is shorter than half of that shortest regular line.
    pub fn select_line(&self, priority_eligible: bool) -> Result<usize, SchedulerError> {
        let shortest_regular = self
            .lines
            .iter()
            .enumerate()
            .skip(PRIORITY_LINE + 1)
            .min_by_key(|(_, line)| line.len());

        match shortest_regular {
            Some((index, regular)) => {
                let priority_shorter = self
                    .lines
                    .get(PRIORITY_LINE)
                    .is_some_and(|priority| 2 * priority.len() < regular.len());
                if priority_eligible && priority_shorter {
                    Ok(PRIORITY_LINE)
                } else {
                    Ok(index)
                }
            }
            None if priority_eligible && !self.lines.is_empty() => Ok(PRIORITY_LINE),
            None => Err(SchedulerError::NoEligibleLine),
        }
    }

    /// Places `customer` per [`LineScheduler::select_line`]; returns the line index.
    pub fn enqueue(
        &mut self,
        customer: Customer,
        priority_eligible: bool,
    ) -> Result<usize, SchedulerError> {
        let index = self.select_line(priority_eligible)?;
        self.enqueue_at(index, customer)?;
        Ok(index)
    }

    /// Appends `customer` to a specific line, bypassing the selection policy.
    pub fn enqueue_at(&mut self, index: usize, customer: Customer) -> Result<(), SchedulerError> {
        let lines = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(SchedulerError::InvalidLineIndex { index, lines })?;
        line.push_back(customer);
        Ok(())
    }

    /// Pulls a waiting customer out of whichever line holds them.
    pub fn remove_waiting(&mut self, name: &str) -> Option<Customer> {
        self.lines.iter_mut().find_map(|line| line.remove(name))
    }

    pub fn is_waiting(&self, name: &str) -> bool {
        self.lines.iter().any(|line| line.contains(name))
    }
}
