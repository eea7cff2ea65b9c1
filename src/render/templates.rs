//! Cached disc geometry templates.
//!
//! Enumerating the pixels of a disc costs O(radius²) per sphere. Projected
//! radii take a small number of discretized values, so the offset list for
//! each size is computed once and shared: all spheres of the same screen
//! radius, in the same frame or any later one, reuse the template verbatim.
//! Entries never expire.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared cache of disc offset templates, keyed by bounding-square area.
///
/// Lookups take a read lock; a miss computes the template outside any lock
/// and inserts with insert-if-absent semantics, so two threads racing on the
/// same key both succeed and one redundant computation is discarded.
pub(crate) struct DiscTemplates {
    cache: RwLock<HashMap<u32, Arc<Vec<(i32, i32)>>>>,
}

impl DiscTemplates {
    pub(crate) fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The `(dx, dy)` offsets covering a disc of the given projected radius.
    ///
    /// The radius is discretized to whole pixels; templates are shared
    /// between all radii that round to the same value.
    pub(crate) fn offsets(&self, radius_px: f32) -> Arc<Vec<(i32, i32)>> {
        let radius = radius_px.round().max(0.0);
        let key = size_key(radius);

        if let Some(hit) = self
            .cache
            .read()
            .expect("template cache poisoned")
            .get(&key)
        {
            return Arc::clone(hit);
        }

        let computed = Arc::new(scan_disc(radius));
        let mut cache = self.cache.write().expect("template cache poisoned");
        Arc::clone(cache.entry(key).or_insert(computed))
    }

    #[cfg(test)]
    fn cached_sizes(&self) -> usize {
        self.cache.read().expect("template cache poisoned").len()
    }
}

/// Area of the scanned bounding square for a disc of `radius` pixels.
fn size_key(radius: f32) -> u32 {
    let side = 2 * reach(radius) as u32 + 1;
    side * side
}

/// Half-extent of the scanned bounding square: twice the disc radius.
fn reach(radius: f32) -> i32 {
    (radius * 2.0) as i32
}

/// Enumerate every integer offset inside the disc by scanning its bounding
/// square once.
fn scan_disc(radius: f32) -> Vec<(i32, i32)> {
    let reach = reach(radius);
    let radius_sq = radius * radius;
    let mut offsets = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx * dx + dy * dy) as f32 <= radius_sq {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_offset_lies_inside_the_disc() {
        for radius in [1.0_f32, 3.0, 7.0, 16.0] {
            let radius_sq = radius * radius;
            for &(dx, dy) in scan_disc(radius).iter() {
                assert!(
                    (dx * dx + dy * dy) as f32 <= radius_sq,
                    "({dx}, {dy}) outside radius {radius}"
                );
            }
        }
    }

    #[test]
    fn every_disc_member_appears_exactly_once() {
        let radius = 5.0_f32;
        let offsets = scan_disc(radius);

        let mut seen = std::collections::HashSet::new();
        for &offset in offsets.iter() {
            assert!(seen.insert(offset), "duplicate offset {offset:?}");
        }

        let reach = reach(radius);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 <= radius * radius {
                    assert!(seen.contains(&(dx, dy)), "missing offset ({dx}, {dy})");
                }
            }
        }
    }

    #[test]
    fn zero_radius_covers_only_the_center() {
        assert_eq!(scan_disc(0.0), vec![(0, 0)]);
    }

    #[test]
    fn templates_are_shared_per_discretized_radius() {
        let templates = DiscTemplates::new();
        let a = templates.offsets(4.9);
        let b = templates.offsets(5.1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(templates.cached_sizes(), 1);

        let c = templates.offsets(9.0);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(templates.cached_sizes(), 2);
    }
}
