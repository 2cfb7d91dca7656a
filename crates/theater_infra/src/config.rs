//! Theater configuration and its defaults.
//!
//! Numeric parameters resolve through a single defaults table. A missing
//! parameter with a default gets that default; a missing parameter without one
//! fails closed. The ticket price has no default.

use std::fmt;

use serde::{Deserialize, Serialize};
use theater_core::{Auditorium, Theater, TheaterError};

/// Tunable numeric parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    TicketPrice,
    AuditoriumRows,
    AuditoriumSeatsPerRow,
    FirstLineIndex,
}

/// Error when a parameter is missing without a default, or holds a value no
/// parameter accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config fail-closed: '{}' is missing or unusable ({})",
            self.param_name, self.reason
        )
    }
}

impl std::error::Error for MissingConfigError {}

/// Default for a parameter, or `None` if it must be supplied.
pub fn default_value(param: ConfigParam) -> Option<f64> {
    match param {
        ConfigParam::TicketPrice => None,
        ConfigParam::AuditoriumRows => Some(5.0),
        ConfigParam::AuditoriumSeatsPerRow => Some(10.0),
        // First regular line; line 0 is the priority line.
        ConfigParam::FirstLineIndex => Some(1.0),
    }
}

/// snake_case name as it appears in configuration files.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::TicketPrice => "ticket_price",
        ConfigParam::AuditoriumRows => "rows",
        ConfigParam::AuditoriumSeatsPerRow => "seats_per_row",
        ConfigParam::FirstLineIndex => "first_line",
    }
}

/// Expected number of `ConfigParam` variants. Bump together with `ALL_PARAMS`.
pub const EXPECTED_PARAM_COUNT: usize = 4;

pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::TicketPrice,
    ConfigParam::AuditoriumRows,
    ConfigParam::AuditoriumSeatsPerRow,
    ConfigParam::FirstLineIndex,
];

/// Resolve a parameter value.
///
/// - `Some(v)` wins when finite and non-negative.
/// - `None` falls back to [`default_value`].
/// - `None` without a default is an error.
pub fn resolve_config_value(
    param: ConfigParam,
    value: Option<f64>,
) -> Result<f64, MissingConfigError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is non-finite (NaN or Infinity); fail-closed",
            });
        }
        if v < 0.0 {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is negative; all config params must be non-negative",
            });
        }
        return Ok(v);
    }
    default_value(param).ok_or_else(|| MissingConfigError {
        param_name: param_name(param),
        reason: "no default; must be configured explicitly",
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    Parse { reason: String },
    Missing(MissingConfigError),
    /// Resolved, but outside what the parameter allows.
    Invalid {
        param_name: &'static str,
        value: f64,
        reason: &'static str,
    },
    NoLines,
    DuplicateVenue { title: String },
    Theater(TheaterError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse { reason } => write!(f, "invalid theater config: {reason}"),
            ConfigError::Missing(e) => write!(f, "{e}"),
            ConfigError::Invalid {
                param_name,
                value,
                reason,
            } => write!(f, "invalid value {value} for '{param_name}': {reason}"),
            ConfigError::NoLines => write!(f, "at least one customer line is required"),
            ConfigError::DuplicateVenue { title } => {
                write!(f, "{title} is configured for more than one auditorium")
            }
            ConfigError::Theater(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Missing(e) => Some(e),
            ConfigError::Theater(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MissingConfigError> for ConfigError {
    fn from(e: MissingConfigError) -> Self {
        ConfigError::Missing(e)
    }
}

impl From<TheaterError> for ConfigError {
    fn from(e: TheaterError) -> Self {
        match e {
            TheaterError::DuplicateVenue { title } => ConfigError::DuplicateVenue { title },
            other => ConfigError::Theater(other),
        }
    }
}

/// One auditorium and the movie it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditoriumConfig {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats_per_row: Option<u32>,
}

impl AuditoriumConfig {
    pub fn new(title: impl Into<String>, rows: u32, seats_per_row: u32) -> Self {
        Self {
            title: title.into(),
            rows: Some(rows),
            seats_per_row: Some(seats_per_row),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheaterConfig {
    #[serde(default)]
    pub ticket_price: Option<f64>,
    #[serde(default)]
    pub auditoriums: Vec<AuditoriumConfig>,
    /// Line names in index order; the first is the priority line.
    #[serde(default = "default_lines")]
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<u32>,
}

fn default_lines() -> Vec<String> {
    ["express", "first", "second"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl TheaterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// "Life" and "Logan" at the default layout, behind the express, first
    /// and second lines.
    pub fn default_showing(ticket_price: f64) -> Self {
        Self {
            ticket_price: Some(ticket_price),
            auditoriums: vec![
                AuditoriumConfig {
                    title: "Life".to_string(),
                    rows: None,
                    seats_per_row: None,
                },
                AuditoriumConfig {
                    title: "Logan".to_string(),
                    rows: None,
                    seats_per_row: None,
                },
            ],
            lines: default_lines(),
            first_line: None,
        }
    }

    /// Validates the configuration and assembles a theater ready to serve.
    ///
    /// The serving order starts at `first_line`. Nothing is built unless the
    /// whole configuration is valid.
    pub fn build(&self) -> Result<Theater, ConfigError> {
        let ticket_price = resolve_config_value(ConfigParam::TicketPrice, self.ticket_price)?;
        if ticket_price <= 0.0 {
            return Err(ConfigError::Invalid {
                param_name: param_name(ConfigParam::TicketPrice),
                value: ticket_price,
                reason: "ticket price must be positive",
            });
        }
        if self.lines.is_empty() {
            return Err(ConfigError::NoLines);
        }
        let first_line = resolve_count(
            ConfigParam::FirstLineIndex,
            self.first_line,
            "first line must name a configured line",
            |index| (index as usize) < self.lines.len(),
        )?;

        let mut theater = Theater::new(ticket_price);
        for venue in &self.auditoriums {
            let rows = resolve_count(
                ConfigParam::AuditoriumRows,
                venue.rows,
                "an auditorium needs at least one row",
                |rows| rows > 0,
            )?;
            let seats_per_row = resolve_count(
                ConfigParam::AuditoriumSeatsPerRow,
                venue.seats_per_row,
                "a row needs at least one seat",
                |seats| seats > 0,
            )?;
            let auditorium = Auditorium::new(venue.title.as_str(), rows, seats_per_row)
                .map_err(|_| ConfigError::Invalid {
                    param_name: param_name(ConfigParam::AuditoriumSeatsPerRow),
                    value: f64::from(seats_per_row),
                    reason: "rows times seats per row exceeds the largest auditorium",
                })?;
            theater.add_venue(auditorium)?;
        }
        for name in &self.lines {
            theater.add_line(name.as_str());
        }
        theater.set_next_line(first_line as usize)?;

        tracing::debug!(
            "TheaterConfigured venues={} lines={} first_line={} ticket_price={}",
            theater.venue_count(),
            theater.line_count(),
            first_line,
            ticket_price
        );
        Ok(theater)
    }
}

/// Resolves a whole-number parameter and checks it with `valid`.
///
/// Explicit values are `u32` already and every count default is a whole
/// number, so the resolved value converts back without loss.
fn resolve_count(
    param: ConfigParam,
    value: Option<u32>,
    reason: &'static str,
    valid: impl Fn(u32) -> bool,
) -> Result<u32, ConfigError> {
    let resolved = resolve_config_value(param, value.map(f64::from))?;
    let count = resolved as u32;
    if !valid(count) {
        return Err(ConfigError::Invalid {
            param_name: param_name(param),
            value: resolved,
            reason,
        });
    }
    Ok(count)
}
