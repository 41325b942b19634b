//! Cache of generated turn curves.
//!
//! After every turn a block snaps back to a grid cell and one of the 24
//! orientation classes, so the curves a move produces for it only depend on
//! that pair and the move. Entries are built once and never change.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::curve::TurnCurves;
use crate::geometry::{Coord, Orientation};
use crate::moves::Move;

/// Block configuration a set of turn curves was generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveKey {
    pub coord: Coord,
    pub orientation: Orientation,
    pub mv: Move,
}

/// Insert-once map from [`CurveKey`] to shared, immutable curves.
#[derive(Default)]
pub struct CurveCache {
    entries: FxHashMap<CurveKey, Rc<TurnCurves>>,
    hits: u64,
    misses: u64,
}

impl CurveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached curves for `key`, building them on first use.
    pub fn get_or_build(
        &mut self,
        key: CurveKey,
        build: impl FnOnce() -> TurnCurves,
    ) -> Rc<TurnCurves> {
        if let Some(curves) = self.entries.get(&key) {
            self.hits += 1;
            return Rc::clone(curves);
        }

        self.misses += 1;
        log::debug!("building curves for {} at {:?} ({:?})", key.mv, key.coord, key.orientation);
        let curves = Rc::new(build());
        self.entries.insert(key, Rc::clone(&curves));
        curves
    }

    pub fn get(&self, key: &CurveKey) -> Option<&Rc<TurnCurves>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
