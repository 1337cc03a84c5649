//! Recovering permutations from sticker geometry.
//!
//! Two snapshots of the same cube are compared sticker by sticker: facelet `s`
//! of the first snapshot maps to facelet `t` of the second when every point of
//! `s`'s outline is close to some point of `t`'s outline. Point order within an
//! outline does not matter, so a sticker rotated in place still matches.
//!
//! The search is brute force, `O(M^2 * V^2)` for `M` facelets of `V` points.

use log::warn;

use crate::geometry::{Sticker, Vec3};
use crate::permutation::Permutation;

/// Read access to the sticker outlines of a cube, in facelet order.
pub trait Snapshot {
    fn facelet_count(&self) -> usize;
    /// Outline of the facelet at 0-based `index`.
    fn sticker(&self, index: usize) -> &Sticker;
}

impl Snapshot for [Sticker] {
    fn facelet_count(&self) -> usize {
        self.len()
    }

    fn sticker(&self, index: usize) -> &Sticker {
        &self[index]
    }
}

impl Snapshot for Vec<Sticker> {
    fn facelet_count(&self) -> usize {
        self.len()
    }

    fn sticker(&self, index: usize) -> &Sticker {
        &self[index]
    }
}

/// How far apart two coordinates may be and still count as the same point.
///
/// Two values `a` and `b` are close when `|a - b| <= absolute + relative * |b|`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 0.01,
            absolute: 0.01,
        }
    }
}

impl Tolerance {
    /// A tolerance with the same relative and absolute bound.
    pub const fn uniform(value: f64) -> Self {
        Self {
            relative: value,
            absolute: value,
        }
    }

    #[inline]
    pub fn values_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }

    #[inline]
    pub fn points_close(&self, a: &Vec3, b: &Vec3) -> bool {
        a.iter().zip(b.iter()).all(|(&x, &y)| self.values_close(x, y))
    }

    /// Whether every point of `a` has a close point in `b`.
    pub fn stickers_match(&self, a: &Sticker, b: &Sticker) -> bool {
        a.iter()
            .all(|point| b.iter().any(|other| self.points_close(point, other)))
    }
}

/// Finds where each facelet of `from` sits in `to`.
///
/// Returns `None` when some facelet has no counterpart within `tolerance`, or
/// when two facelets land on the same counterpart. Each unmatched facelet is
/// logged.
pub fn match_snapshots<A, B>(from: &A, to: &B, tolerance: Tolerance) -> Option<Permutation>
where
    A: Snapshot + ?Sized,
    B: Snapshot + ?Sized,
{
    let count = from.facelet_count();
    if count != to.facelet_count() {
        warn!(
            "Cannot match snapshots of {} and {} facelets",
            count,
            to.facelet_count()
        );
        return None;
    }

    let mut images = Vec::with_capacity(count);
    let mut complete = true;
    for source in 0..count {
        let sticker = from.sticker(source);
        match (0..count).find(|&target| tolerance.stickers_match(sticker, to.sticker(target))) {
            Some(target) => images.push(target + 1),
            None => {
                warn!("No match for facelet {}", source + 1);
                complete = false;
            }
        }
    }

    if !complete {
        return None;
    }

    match Permutation::new(images) {
        Ok(permutation) => Some(permutation),
        Err(error) => {
            warn!("Sticker correspondence is ambiguous: {error}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_facelets;

    fn stickers(size: usize) -> Vec<Sticker> {
        build_facelets(size).into_iter().map(|f| f.sticker).collect()
    }

    #[test]
    fn test_values_close_is_asymmetric_in_scale() {
        let tolerance = Tolerance::default();
        assert!(tolerance.values_close(1.0, 1.019));
        assert!(!tolerance.values_close(1.0, 1.03));
        assert!(tolerance.values_close(0.0, 0.01));
        assert!(!tolerance.values_close(0.0, 0.011));
    }

    #[test]
    fn test_point_order_does_not_matter() {
        let tolerance = Tolerance::default();
        let sticker = stickers(3)[0];
        let mut reversed = sticker;
        reversed.reverse();
        assert!(tolerance.stickers_match(&sticker, &reversed));
    }

    #[test_log::test]
    fn test_self_match_is_identity() {
        for size in 1..=4 {
            let snapshot = stickers(size);
            let permutation = match_snapshots(&snapshot, &snapshot, Tolerance::default()).unwrap();
            assert!(permutation.is_identity(), "size {size}");
        }
    }

    #[test_log::test]
    fn test_displaced_sticker_reports_no_correspondence() {
        let reference = stickers(3);
        let mut moved = reference.clone();
        for point in &mut moved[7] {
            point[0] += 0.5;
        }
        assert_eq!(match_snapshots(&moved, &reference, Tolerance::default()), None);
    }

    #[test_log::test]
    fn test_swapped_stickers_give_transposition() {
        let reference = stickers(2);
        let mut swapped = reference.clone();
        swapped.swap(0, 5);
        let permutation = match_snapshots(&swapped, &reference, Tolerance::default()).unwrap();
        assert_eq!(permutation.apply(1), Ok(6));
        assert_eq!(permutation.apply(6), Ok(1));
        assert_eq!(permutation.fixed_points(), 22);
    }

    #[test_log::test]
    fn test_mismatched_sizes_report_no_correspondence() {
        assert_eq!(
            match_snapshots(&stickers(2), &stickers(3), Tolerance::default()),
            None
        );
    }

    #[test_log::test]
    fn test_loose_tolerance_is_ambiguous() {
        let snapshot = stickers(3);
        assert_eq!(match_snapshots(&snapshot, &snapshot, Tolerance::uniform(2.0)), None);
    }
}
