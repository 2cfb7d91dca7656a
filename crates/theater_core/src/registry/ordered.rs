//! Ascending ordered registry keyed by a per-item identity.
//!
//! Items live in a `Vec` kept sorted by key. Lookups are a binary search whose
//! miss result carries the insertion point, so `add`, `get` and `remove` all
//! share the same probe.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// Capacity the backing vector starts with and returns to after `remove_all`.
pub const INITIAL_CAPACITY: usize = 3;

/// An item identified by an ordered key.
///
/// The key must not change while the item is held by a registry; implementors
/// expose it read-only.
pub trait Keyed {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
}

/// Outcome of a binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// Key present at this index.
    Found(usize),
    /// Key absent; inserting at this index keeps ascending order.
    NotFound(usize),
}

impl SearchResult {
    /// Single-integer form of the result.
    ///
    /// `Found(i)` encodes as `i`; `NotFound(i)` encodes as `-(i) - 1`, so every
    /// negative value is a miss and `-(encoded) - 1` recovers the insertion index.
    pub fn encode(self) -> isize {
        match self {
            SearchResult::Found(index) => index as isize,
            SearchResult::NotFound(insertion) => -(insertion as isize) - 1,
        }
    }

    /// Inverse of [`SearchResult::encode`].
    pub fn decode(encoded: isize) -> Self {
        if encoded >= 0 {
            SearchResult::Found(encoded as usize)
        } else {
            SearchResult::NotFound((-(encoded + 1)) as usize)
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No item carries the requested key.
    NotFound,
    /// Positional access outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// An item with the same key is already registered.
    DuplicateKey,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NotFound => write!(f, "item not found in registry"),
            RegistryError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for registry of {len} items")
            }
            RegistryError::DuplicateKey => write!(f, "an item with this key is already registered"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Sorted container with strictly ascending, unique keys.
#[derive(Debug, Clone)]
pub struct OrderedRegistry<T: Keyed> {
    items: Vec<T>,
}

impl<T: Keyed> Default for OrderedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> OrderedRegistry<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Binary search for `key`.
    ///
    /// Narrows `[low, high]` with a `low < high` guard and compares for
    /// equality once after convergence. The converged slot may hold a key
    /// smaller than `key` only when `key` exceeds every item, in which case the
    /// insertion point is one past it.
    pub fn index_of<Q>(&self, key: &Q) -> SearchResult
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.items.is_empty() {
            return SearchResult::NotFound(0);
        }
        let mut low = 0;
        let mut high = self.items.len() - 1;
        while low < high {
            let mid = low + (high - low) / 2;
            if self.items[mid].key().borrow() < key {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        match self.items[low].key().borrow().cmp(key) {
            Ordering::Equal => SearchResult::Found(low),
            Ordering::Greater => SearchResult::NotFound(low),
            Ordering::Less => SearchResult::NotFound(low + 1),
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index_of(key).is_found()
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&T, RegistryError>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index_of(key) {
            SearchResult::Found(index) => Ok(&self.items[index]),
            SearchResult::NotFound(_) => Err(RegistryError::NotFound),
        }
    }

    /// Mutable access to the item's non-key state.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut T, RegistryError>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index_of(key) {
            SearchResult::Found(index) => Ok(&mut self.items[index]),
            SearchResult::NotFound(_) => Err(RegistryError::NotFound),
        }
    }

    pub fn get_at(&self, index: usize) -> Result<&T, RegistryError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange { index, len })
    }

    /// Insert `item` at the position that keeps keys ascending.
    ///
    /// Returns the index the item landed at. Empty registry, new minimum and
    /// new maximum skip the search.
    pub fn add(&mut self, item: T) -> Result<usize, RegistryError> {
        let len = self.items.len();
        let index = if self.items.first().is_none_or(|first| item.key() < first.key()) {
            0
        } else if self.items.last().is_some_and(|last| item.key() > last.key()) {
            len
        } else {
            match self.index_of(item.key()) {
                SearchResult::Found(_) => return Err(RegistryError::DuplicateKey),
                SearchResult::NotFound(insertion) => insertion,
            }
        };
        self.items.insert(index, item);
        Ok(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T, RegistryError> {
        let len = self.items.len();
        if index >= len {
            return Err(RegistryError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Result<T, RegistryError>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index_of(key) {
            SearchResult::Found(index) => Ok(self.items.remove(index)),
            SearchResult::NotFound(_) => Err(RegistryError::NotFound),
        }
    }

    /// Drop every item and shrink back to the initial capacity.
    pub fn remove_all(&mut self) {
        self.items = Vec::with_capacity(INITIAL_CAPACITY);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T: Keyed> IntoIterator for &'a OrderedRegistry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
