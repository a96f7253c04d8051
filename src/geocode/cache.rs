//! Label to coordinates cache
//!
//! Filled as geocoder responses are applied so that a selected label can be
//! resolved back to its coordinates. Entries live as long as the adapter.

use std::collections::HashMap;

use super::types::{Coordinates, Place};

#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, Coordinates>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a place, replacing any earlier coordinates for the same label
    pub fn insert(&mut self, place: &Place) {
        self.entries
            .insert(place.label.clone(), place.coordinates);
    }

    /// Exact-label lookup
    pub fn get(&self, label: &str) -> Option<Coordinates> {
        self.entries.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
