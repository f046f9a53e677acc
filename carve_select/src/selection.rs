// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selected element set.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use carve_mesh::{ElementId, Mesh, NodeId};

/// A sorted, deduplicated set of selected elements.
///
/// Edits produce new selections rather than mutating in place, so the previous value can
/// be kept on an undo stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    elements: BTreeSet<ElementId>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().copied()
    }

    /// The underlying set.
    pub fn as_set(&self) -> &BTreeSet<ElementId> {
        &self.elements
    }

    /// Selected ids as a vector, ascending.
    pub fn to_vec(&self) -> Vec<ElementId> {
        self.iter().collect()
    }

    /// This selection plus `found`.
    #[must_use]
    pub fn union(&self, found: &BTreeSet<ElementId>) -> Self {
        Self {
            elements: self.elements.union(found).copied().collect(),
        }
    }

    /// This selection minus `found`.
    #[must_use]
    pub fn difference(&self, found: &BTreeSet<ElementId>) -> Self {
        Self {
            elements: self.elements.difference(found).copied().collect(),
        }
    }

    /// Every node used by a selected element. Ids unknown to `mesh` are skipped.
    pub fn nodes(&self, mesh: &Mesh) -> BTreeSet<NodeId> {
        self.iter()
            .filter_map(|id| mesh.element(id))
            .flat_map(|e| e.nodes)
            .collect()
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeSet<ElementId>> for Selection {
    fn from(elements: BTreeSet<ElementId>) -> Self {
        Self { elements }
    }
}
