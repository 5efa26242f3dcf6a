/// Keyed containers
///
/// An `NdMapping` is an insertion-ordered collection of items addressed by a
/// composite [`GroupKey`], annotated with the dimensions the key is made of.
/// The container kind tells the renderer how the items relate: layered in
/// one plot, tiled as separate panels, or animated as frames.

use crate::dimension::{Dimension, GroupKey};
use serde::Serialize;
use std::collections::BTreeMap;

/// How the items of an [`NdMapping`] are meant to be composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerKind {
    /// Items layered on top of each other.
    Overlay,
    /// Items tiled as separate panels, `cols` per row.
    GridLayout,
    /// Items indexed by key, stepped through as an animation.
    ViewMap,
}

/// Number of panels per row a layout uses unless told otherwise.
pub const DEFAULT_LAYOUT_COLS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NdMapping<T> {
    kind: ContainerKind,
    index_dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cols: Option<usize>,
    items: Vec<(GroupKey, T)>,
    #[serde(skip)]
    positions: BTreeMap<GroupKey, usize>,
}

impl<T> NdMapping<T> {
    pub fn new(kind: ContainerKind, index_dimensions: Vec<Dimension>) -> Self {
        let cols = match kind {
            ContainerKind::GridLayout => Some(DEFAULT_LAYOUT_COLS),
            _ => None,
        };
        NdMapping {
            kind,
            index_dimensions,
            cols,
            items: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn index_dimensions(&self) -> &[Dimension] {
        &self.index_dimensions
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert an item. An existing key is replaced in place, keeping its position.
    pub fn insert(&mut self, key: GroupKey, item: T) {
        match self.positions.get(&key) {
            Some(&idx) => self.items[idx].1 = item,
            None => {
                self.positions.insert(key.clone(), self.items.len());
                self.items.push((key, item));
            }
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&T> {
        self.positions.get(key).map(|&idx| &self.items[idx].1)
    }

    pub fn contains_key(&self, key: &GroupKey) -> bool {
        self.positions.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.items.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &T)> {
        self.items.iter().map(|(k, v)| (k, v))
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first().map(|(_, v)| v)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last().map(|(_, v)| v)
    }

    /// Panels per row. Only layouts carry a column count.
    pub fn cols(&self) -> Option<usize> {
        self.cols
    }

    /// Set the panels per row of a layout. Values below one are clamped to one.
    pub fn with_cols(mut self, cols: usize) -> Self {
        if self.kind == ContainerKind::GridLayout {
            self.cols = Some(cols.max(1));
        }
        self
    }

    /// `(rows, cols)` of the panel grid, None for non-layout containers.
    pub fn grid_shape(&self) -> Option<(usize, usize)> {
        let cols = self.cols?;
        if self.items.is_empty() {
            return Some((0, 0));
        }
        let used_cols = cols.min(self.items.len());
        Some(((self.items.len() + cols - 1) / cols, used_cols))
    }
}
