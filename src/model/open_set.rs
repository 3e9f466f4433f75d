//! Open/closed configuration of the facilities.

use indexmap::IndexMap;

use super::Instance;
use crate::error::{FacilityError, Result};

/// Which facilities are open, indexed like [`Instance::facilities`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenSet {
    flags: Vec<bool>,
}

impl OpenSet {
    pub fn all_open(n: usize) -> Self {
        Self {
            flags: vec![true; n],
        }
    }

    pub fn all_closed(n: usize) -> Self {
        Self {
            flags: vec![false; n],
        }
    }

    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    /// Reads the external `facility id -> 0/1` shape. Any nonzero value
    /// counts as open; facilities absent from `map` are closed.
    pub fn from_map(instance: &Instance, map: &IndexMap<String, u8>) -> Result<Self> {
        let mut set = Self::all_closed(instance.num_facilities());
        for (id, &flag) in map {
            let i = instance
                .facility_index(id)
                .ok_or_else(|| FacilityError::UnknownFacility(id.clone()))?;
            set.flags[i] = flag != 0;
        }
        Ok(set)
    }

    /// Writes the external `facility id -> 0/1` shape.
    pub fn to_map(&self, instance: &Instance) -> IndexMap<String, u8> {
        instance
            .facilities()
            .iter()
            .zip(&self.flags)
            .map(|(f, &open)| (f.id.clone(), u8::from(open)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[inline]
    pub fn is_open(&self, i: usize) -> bool {
        self.flags[i]
    }

    #[inline]
    pub fn set(&mut self, i: usize, open: bool) {
        self.flags[i] = open;
    }

    #[inline]
    pub fn toggle(&mut self, i: usize) {
        self.flags[i] = !self.flags[i];
    }

    pub fn open_count(&self) -> usize {
        self.flags.iter().filter(|&&open| open).count()
    }

    pub fn any_open(&self) -> bool {
        self.flags.iter().any(|&open| open)
    }

    /// Indices of the open facilities, ascending.
    pub fn iter_open(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &open)| open.then_some(i))
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Number of positions whose flag differs from `other`.
    ///
    /// # Panics
    ///
    /// Panics if the two sets have different lengths.
    pub fn differences(&self, other: &OpenSet) -> usize {
        assert_eq!(self.len(), other.len(), "open sets of different size");
        self.flags
            .iter()
            .zip(&other.flags)
            .filter(|(a, b)| a != b)
            .count()
    }
}
