//! Mapping between caller-supplied values and dense ids.

use crate::error::{MalformedDescription, render};
use indexmap::IndexSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Index;

/// Values a caller may use as states or symbols.
pub trait Element: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Element for T {}

/// Assigns ids `0..len` to values in insertion order and maps them back.
#[derive(Debug, Clone)]
pub struct Interner<T> {
    values: IndexSet<T>,
}

impl<T: Eq + Hash> Interner<T> {
    pub fn new() -> Self {
        Self {
            values: IndexSet::new(),
        }
    }

    /// Intern a value, returning its id and whether it was newly added.
    pub fn insert(&mut self, value: T) -> (u32, bool) {
        let (index, added) = self.values.insert_full(value);
        (index as u32, added)
    }

    pub fn id(&self, value: &T) -> Option<u32> {
        self.values.get_index_of(value).map(|index| index as u32)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.values.get_index(id as usize)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (index as u32, value))
    }
}

impl<T: Eq + Hash + Debug> Interner<T> {
    /// Intern every value, failing on the first repeated one.
    pub(crate) fn declare_all(
        values: impl IntoIterator<Item = T>,
        duplicate: fn(String) -> MalformedDescription,
    ) -> Result<Self, MalformedDescription> {
        let mut interner = Self::new();
        for value in values {
            if interner.contains(&value) {
                return Err(duplicate(render(&value)));
            }
            interner.insert(value);
        }
        Ok(interner)
    }

    /// Declare the state set of a machine: non-empty and duplicate-free.
    pub(crate) fn declare_states(
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self, MalformedDescription> {
        let states = Self::declare_all(values, MalformedDescription::DuplicateState)?;
        if states.is_empty() {
            return Err(MalformedDescription::EmptyStateSet);
        }
        Ok(states)
    }

    /// Look up a declared value, failing with `unknown` if it was never declared.
    pub(crate) fn resolve(
        &self,
        value: &T,
        unknown: fn(String) -> MalformedDescription,
    ) -> Result<u32, MalformedDescription> {
        self.id(value).ok_or_else(|| unknown(render(value)))
    }
}

impl<T> Index<u32> for Interner<T> {
    type Output = T;

    /// Panics if `id` was not issued by this interner.
    fn index(&self, id: u32) -> &T {
        &self.values[id as usize]
    }
}

impl<T: Eq + Hash> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}
