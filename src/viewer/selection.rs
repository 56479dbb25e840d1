//! Checked rows, keyed by artwork id.

use std::collections::HashSet;

use crate::api::{Artwork, ArtworkId};

/// Set of selected artworks, remembering the order they were picked in
#[derive(Debug, Clone, Default)]
pub struct Selection {
    records: Vec<Artwork>,
    ids: HashSet<ArtworkId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected records in selection order
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Add a record; returns `false` if it was already selected
    pub fn insert(&mut self, artwork: Artwork) -> bool {
        if !self.ids.insert(artwork.id) {
            return false;
        }
        self.records.push(artwork);
        true
    }

    /// Remove a record; returns `false` if it was not selected
    pub fn remove(&mut self, id: ArtworkId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.records.retain(|a| a.id != id);
        true
    }

    /// Flip the checkbox of `artwork`; returns whether it is now selected
    pub fn toggle(&mut self, artwork: &Artwork) -> bool {
        if self.remove(artwork.id) {
            false
        } else {
            self.insert(artwork.clone())
        }
    }

    /// Add every record not already present; returns how many were added
    pub fn extend<I>(&mut self, artworks: I) -> usize
    where
        I: IntoIterator<Item = Artwork>,
    {
        artworks.into_iter().filter(|a| self.insert(a.clone())).count()
    }

    /// Replace the whole selection with `artworks`
    pub fn replace_with<I>(&mut self, artworks: I)
    where
        I: IntoIterator<Item = Artwork>,
    {
        self.clear();
        self.extend(artworks);
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
    }

    /// Whether every one of `rows` is selected; false for an empty page
    pub fn covers(&self, rows: &[Artwork]) -> bool {
        !rows.is_empty() && rows.iter().all(|a| self.contains(a.id))
    }
}
