//! Deferred image loading.
//!
//! Images carrying a deferred source get their real `src` only once they
//! intersect the viewport. After the swap the element is no longer observed,
//! so each image loads at most once.

use crate::viewport::Intersection;

/// A source swap the DOM layer must perform: set `src`, drop the deferred
/// attribute, unobserve the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSwap {
    pub index: usize,
    pub src: String,
}

#[derive(Debug, Clone)]
pub struct LazyLoader {
    /// Deferred source per image; `None` once loaded.
    pending: Vec<Option<String>>,
}

impl LazyLoader {
    /// Track images by their deferred sources, in observation order.
    pub fn new(deferred: Vec<String>) -> Self {
        Self {
            pending: deferred.into_iter().map(Some).collect(),
        }
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        matches!(self.pending.get(index), Some(None))
    }

    /// Images still waiting for their first intersection.
    pub fn pending_count(&self) -> usize {
        self.pending.iter().filter(|p| p.is_some()).count()
    }

    /// Apply one batch of observer reports. Returns the swaps to perform.
    pub fn on_intersections(&mut self, entries: &[Intersection]) -> Vec<SourceSwap> {
        entries
            .iter()
            .filter(|e| e.is_intersecting)
            .filter_map(|e| {
                let src = self.pending.get_mut(e.index)?.take()?;
                Some(SourceSwap {
                    index: e.index,
                    src,
                })
            })
            .collect()
    }
}
