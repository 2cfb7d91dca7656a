//! Sorted, key-indexed storage for auditoriums and active customers.

pub mod ordered;

pub use ordered::{INITIAL_CAPACITY, Keyed, OrderedRegistry, RegistryError, SearchResult};
