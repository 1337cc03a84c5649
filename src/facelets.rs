//! Facelet enumeration and human-readable labels.
//!
//! Facelets are numbered `1..=6 * N * N` in canonical order (see
//! [`crate::geometry`]). Only the 3x3x3 cube has a label table; every other
//! size labels a facelet by its raw id.

use std::fmt;

use crate::geometry::{build_facelets, in_layer};
use crate::moves::Face;

/// Human-readable name of a facelet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Numeric(u32),
    Named(&'static str),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Numeric(n) => write!(f, "{n}"),
            Label::Named(name) => f.write_str(name),
        }
    }
}

use Label::{Named, Numeric};

/// Labels for the 54 facelets of a 3x3x3 cube, indexed by `id - 1`.
///
/// Centers carry the name of their face; the remaining facelets are numbered
/// the way they were written on one physical cube.
pub const LABELS_3X3: [Label; 54] = [
    // top
    Numeric(1),
    Numeric(2),
    Numeric(3),
    Numeric(4),
    Named("top"),
    Numeric(5),
    Numeric(6),
    Numeric(7),
    Numeric(8),
    // bottom
    Numeric(46),
    Numeric(47),
    Numeric(48),
    Numeric(44),
    Named("bottom"),
    Numeric(45),
    Numeric(41),
    Numeric(42),
    Numeric(43),
    // left
    Numeric(14),
    Numeric(12),
    Numeric(9),
    Numeric(15),
    Named("left"),
    Numeric(10),
    Numeric(16),
    Numeric(13),
    Numeric(11),
    // right
    Numeric(32),
    Numeric(29),
    Numeric(27),
    Numeric(31),
    Named("right"),
    Numeric(26),
    Numeric(30),
    Numeric(28),
    Numeric(25),
    // rear
    Numeric(40),
    Numeric(37),
    Numeric(35),
    Numeric(39),
    Named("erear"),
    Numeric(34),
    Numeric(38),
    Numeric(36),
    Numeric(33),
    // front
    Numeric(22),
    Numeric(20),
    Numeric(17),
    Numeric(23),
    Named("front"),
    Numeric(18),
    Numeric(24),
    Numeric(21),
    Numeric(19),
];

/// The facelet ids of an NxNxN cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceletSpace {
    size: usize,
}

impl FaceletSpace {
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Edge length `N` of the cube.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of facelets, `6 * N * N`.
    pub const fn facelet_count(&self) -> usize {
        6 * self.size * self.size
    }

    /// All facelet ids in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = usize> {
        1..=self.facelet_count()
    }

    /// Translates a facelet id to its label.
    ///
    /// Only the 3x3x3 cube has a table; ids outside it (and every id on other
    /// sizes) are returned unchanged.
    pub fn translate(&self, id: usize) -> Label {
        if self.size == 3 {
            if let Some(label) = id.checked_sub(1).and_then(|index| LABELS_3X3.get(index)) {
                return *label;
            }
        }
        Numeric(id as u32)
    }

    /// Ids of the facelets that sit in `layer` of `face` on a solved cube.
    pub fn layer_ids(&self, face: Face, layer: usize) -> Vec<usize> {
        build_facelets(self.size)
            .iter()
            .enumerate()
            .filter(|(_, facelet)| in_layer(facelet.anchor, face.normal(), layer, self.size))
            .map(|(index, _)| index + 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facelet_count() {
        assert_eq!(FaceletSpace::new(2).facelet_count(), 24);
        assert_eq!(FaceletSpace::new(3).facelet_count(), 54);
        assert_eq!(FaceletSpace::new(4).ids().count(), 96);
    }

    #[test]
    fn test_centers_are_named() {
        let space = FaceletSpace::new(3);
        let names: Vec<String> = [5, 14, 23, 32, 41, 50]
            .into_iter()
            .map(|id| space.translate(id).to_string())
            .collect();
        assert_eq!(names, ["top", "bottom", "left", "right", "erear", "front"]);
    }

    #[test]
    fn test_table_covers_every_number_once() {
        let mut numbers: Vec<u32> = LABELS_3X3
            .iter()
            .filter_map(|label| match label {
                Numeric(n) => Some(*n),
                Named(_) => None,
            })
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=48).collect::<Vec<_>>());
    }

    #[test]
    fn test_other_sizes_use_raw_ids() {
        let space = FaceletSpace::new(4);
        assert_eq!(space.translate(5), Numeric(5));
        assert_eq!(space.translate(96), Numeric(96));
        assert_eq!(FaceletSpace::new(2).translate(1), Numeric(1));
    }

    #[test]
    fn test_out_of_table_id_falls_back_to_raw() {
        let space = FaceletSpace::new(3);
        assert_eq!(space.translate(1), Numeric(1));
        assert_eq!(space.translate(10), Numeric(46));
        assert_eq!(space.translate(0), Numeric(0));
        assert_eq!(space.translate(55), Numeric(55));
    }

    #[test]
    fn test_top_layer_ids() {
        let top = FaceletSpace::new(2).layer_ids(Face::U, 0);
        assert_eq!(top.len(), 12);
        // the whole up face, none of the down face
        assert_eq!(&top[..4], &[1, 2, 3, 4]);
        assert!(top.iter().all(|id| !(5..=8).contains(id)));

        let top = FaceletSpace::new(3).layer_ids(Face::U, 0);
        assert_eq!(top.len(), 9 + 4 * 3);
        assert!(top.contains(&5));
        assert!(!top.contains(&14));
        assert_eq!(FaceletSpace::new(3).layer_ids(Face::U, 1).len(), 4 * 3);
    }
}
