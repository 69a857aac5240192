//! Reveal-on-view animation.
//!
//! The first time an observed element intersects the viewport it gets the
//! reveal class. The transition is one-way: leaving and re-entering the
//! viewport changes nothing, although the observer keeps reporting.

use crate::viewport::Intersection;

#[derive(Debug, Clone)]
pub struct Revealer {
    revealed: Vec<bool>,
}

impl Revealer {
    /// Track `count` elements, none revealed yet.
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Apply one batch of observer reports. Returns the indices revealed by
    /// this batch, each at most once over the revealer's lifetime.
    pub fn on_intersections(&mut self, entries: &[Intersection]) -> Vec<usize> {
        let mut newly = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            match self.revealed.get_mut(entry.index) {
                Some(flag) if !*flag => {
                    *flag = true;
                    newly.push(entry.index);
                }
                _ => {}
            }
        }
        newly
    }
}
