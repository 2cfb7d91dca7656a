//! Waiting and seated viewing parties.

use std::fmt;

use crate::registry::Keyed;

/// A viewing party, identified by the display name of one of its members.
///
/// The name is unique among customers currently in the theater. `movie` is
/// the auditorium the party wants and only changes on a sold-out reroute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
    movie: String,
    party_size: u32,
}

impl Keyed for Customer {
    type Key = String;

    fn key(&self) -> &String {
        &self.name
    }
}

impl Customer {
    pub fn new(name: impl Into<String>, movie: impl Into<String>, party_size: u32) -> Self {
        Self {
            name: name.into(),
            movie: movie.into(),
            party_size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn movie(&self) -> &str {
        &self.movie
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Points the party at another auditorium. Returns the previous movie.
    pub fn reroute(&mut self, movie: impl Into<String>) -> String {
        std::mem::replace(&mut self.movie, movie.into())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer {} party of {} for {} movie.",
            self.name, self.party_size, self.movie
        )
    }
}
