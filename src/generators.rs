//! Generator tables: one permutation per elementary face turn.
//!
//! Tables are discovered from geometry by turning a fresh cube and matching it
//! against an untouched one. Discovery is the expensive step, so tables are
//! cached per cube size, in memory and optionally on disk.

use std::path::PathBuf;

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::cube::{Cube, CubeError};
use crate::cycles::render;
use crate::facelets::FaceletSpace;
use crate::matcher::Tolerance;
use crate::moves::{Face, Turn};
use crate::permutation::Permutation;
use crate::persistence;

/// Equal angular sub-steps used to turn a face during discovery.
pub const DISCOVERY_STEPS: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error("No sticker correspondence for a quarter turn of {face}")]
    Unresolved { face: Face },
    #[error("Generator {turn} acts on {found} facelets, expected {expected}")]
    DomainMismatch {
        turn: Turn,
        expected: usize,
        found: usize,
    },
    #[error("A generator table needs at least one generator")]
    Empty,
}

/// A face turn together with the permutation it induces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generator {
    pub turn: Turn,
    pub permutation: Permutation,
}

/// An ordered set of generators over a common domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorTable {
    domain: usize,
    generators: Vec<Generator>,
}

impl GeneratorTable {
    pub fn new(generators: Vec<Generator>) -> Result<Self, GeneratorError> {
        let domain = generators
            .first()
            .ok_or(GeneratorError::Empty)?
            .permutation
            .len();
        if let Some(bad) = generators
            .iter()
            .find(|generator| generator.permutation.len() != domain)
        {
            return Err(GeneratorError::DomainMismatch {
                turn: bad.turn,
                expected: domain,
                found: bad.permutation.len(),
            });
        }
        Ok(Self { domain, generators })
    }

    /// Number of facelets every generator acts on.
    pub fn domain(&self) -> usize {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    pub fn get(&self, index: usize) -> Option<&Generator> {
        self.generators.get(index)
    }

    /// Looks up the generator for `turn`.
    pub fn find(&self, turn: Turn) -> Option<&Generator> {
        self.generators.iter().find(|generator| generator.turn == turn)
    }

    /// Adds the inverse of every generator whose inverse is not yet present,
    /// each placed right after the generator it undoes.
    pub fn with_inverses(&self) -> GeneratorTable {
        let mut generators = Vec::with_capacity(self.generators.len() * 2);
        for generator in &self.generators {
            generators.push(generator.clone());
            let inverse = generator.turn.inverse();
            if self.find(inverse).is_none() {
                generators.push(Generator {
                    turn: inverse,
                    permutation: generator.permutation.inverse(),
                });
            }
        }
        GeneratorTable {
            domain: self.domain,
            generators,
        }
    }

    /// One line per generator: `<cycles> # <turn>`.
    pub fn listing(&self, space: &FaceletSpace) -> String {
        let mut output = String::new();
        for generator in &self.generators {
            output.push_str(&render(&generator.permutation, space));
            output.push_str(" # ");
            output.push_str(&generator.turn.to_string());
            output.push('\n');
        }
        output
    }
}

/// Recovers the clockwise quarter turn of every face of an NxNxN cube from
/// geometry.
pub fn discover(size: usize, tolerance: Tolerance) -> Result<GeneratorTable, GeneratorError> {
    let reference = Cube::new(size)?;
    let step = 1.0 / DISCOVERY_STEPS as f64;

    let mut generators = Vec::with_capacity(Face::ALL.len());
    for face in Face::ALL {
        let mut cube = Cube::new(size)?;
        for _ in 0..DISCOVERY_STEPS {
            cube.rotate_face(face, step, 0)?;
        }

        let permutation = cube
            .match_against(&reference, tolerance)
            .ok_or(GeneratorError::Unresolved { face })?;
        debug!(
            "Discovered {face} on {size}x{size}x{size}: {} fixed points",
            permutation.fixed_points()
        );
        generators.push(Generator {
            turn: Turn::new(face, 1),
            permutation,
        });
    }

    GeneratorTable::new(generators)
}

/// Generator tables keyed by cube size.
///
/// Lookups go memory first, then the optional cache directory, then fresh
/// discovery (which is written back to the directory).
pub struct GeneratorCache {
    tolerance: Tolerance,
    directory: Option<PathBuf>,
    tables: FxHashMap<usize, GeneratorTable>,
}

impl GeneratorCache {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            directory: None,
            tables: FxHashMap::default(),
        }
    }

    /// Also persists tables under `directory`.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn get(&mut self, size: usize) -> Result<&GeneratorTable, GeneratorError> {
        if !self.tables.contains_key(&size) {
            let table = self.load_or_discover(size)?;
            self.tables.insert(size, table);
        } else {
            debug!("Generator table for size {size} already in memory");
        }
        Ok(&self.tables[&size])
    }

    fn load_or_discover(&self, size: usize) -> Result<GeneratorTable, GeneratorError> {
        if let Some(directory) = &self.directory {
            if let Some(table) = persistence::load(directory, size) {
                debug!("Loaded generator table for size {size} from {}", directory.display());
                return Ok(table);
            }
        }

        let table = discover(size, self.tolerance)?;
        info!("Discovered {} generators for size {size}", table.len());

        if let Some(directory) = &self.directory {
            if let Err(error) = persistence::save(directory, size, &table) {
                warn!("Failed to cache generator table: {error}");
            }
        }
        Ok(table)
    }
}

/// Quarter turns of a 2x2x2 cube on 24 facelets, 0-based.
///
/// The first twelve positions are the facelets of the top layer.
const EDGE_CORNER_MOVES: [(Face, i32, [usize; 24]); 11] = [
    (Face::F, 1, [0, 1, 15, 14, 4, 5, 11, 10, 8, 9, 2, 3, 12, 13, 6, 7, 16, 17, 18, 19, 21, 23, 20, 22]),
    (Face::B, -1, [13, 12, 2, 3, 9, 8, 6, 7, 0, 1, 10, 11, 4, 5, 14, 15, 17, 19, 16, 18, 20, 21, 22, 23]),
    (Face::B, 1, [8, 9, 2, 3, 12, 13, 6, 7, 5, 4, 10, 11, 1, 0, 14, 15, 18, 16, 19, 17, 20, 21, 22, 23]),
    (Face::R, -1, [0, 23, 2, 22, 4, 19, 6, 18, 8, 9, 10, 11, 13, 15, 12, 14, 16, 17, 1, 3, 20, 21, 5, 7]),
    (Face::R, 1, [0, 18, 2, 19, 4, 22, 6, 23, 8, 9, 10, 11, 14, 12, 15, 13, 16, 17, 7, 5, 20, 21, 3, 1]),
    (Face::L, -1, [16, 1, 17, 3, 20, 5, 21, 7, 10, 8, 11, 9, 12, 13, 14, 15, 6, 4, 18, 19, 2, 0, 22, 23]),
    (Face::L, 1, [21, 1, 20, 3, 17, 5, 16, 7, 9, 11, 8, 10, 12, 13, 14, 15, 0, 2, 18, 19, 4, 6, 22, 23]),
    (Face::U, -1, [2, 0, 3, 1, 4, 5, 6, 7, 8, 21, 10, 23, 12, 17, 14, 19, 16, 11, 18, 9, 20, 15, 22, 13]),
    (Face::U, 1, [1, 3, 0, 2, 4, 5, 6, 7, 8, 19, 10, 17, 12, 23, 14, 21, 16, 13, 18, 15, 20, 9, 22, 11]),
    (Face::D, -1, [0, 1, 2, 3, 5, 7, 4, 6, 18, 9, 16, 11, 22, 13, 20, 15, 12, 17, 14, 19, 8, 21, 10, 23]),
    (Face::D, 1, [0, 1, 2, 3, 6, 4, 7, 5, 20, 9, 22, 11, 16, 13, 18, 15, 10, 17, 8, 19, 14, 21, 12, 23]),
];

/// The 24-facelet table Move Search runs on by default.
pub fn edge_corner_table() -> GeneratorTable {
    let generators = EDGE_CORNER_MOVES
        .iter()
        .map(|(face, quarters, images)| Generator {
            turn: Turn::new(*face, *quarters),
            permutation: Permutation::from_zero_based(images)
                .expect("built-in generators are permutations"),
        })
        .collect();
    GeneratorTable {
        domain: 24,
        generators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_corner_table_is_consistent() {
        let table = edge_corner_table();
        assert_eq!(table.len(), 11);
        assert_eq!(table.domain(), 24);
        for generator in table.generators() {
            assert_eq!(generator.permutation.fixed_points(), 12);
            assert!(generator.permutation.pow(4).is_identity());
            if let Some(inverse) = table.find(generator.turn.inverse()) {
                assert!(generator
                    .permutation
                    .compose(&inverse.permutation)
                    .is_identity());
            }
        }
    }

    #[test]
    fn test_with_inverses_fills_missing_turns() {
        let table = edge_corner_table().with_inverses();
        assert_eq!(table.len(), 12);
        let f_inverse = table.find(Turn::new(Face::F, -1)).unwrap();
        assert_eq!(table.get(1).map(|g| g.turn), Some(Turn::new(Face::F, -1)));
        assert!(table
            .find(Turn::new(Face::F, 1))
            .unwrap()
            .permutation
            .compose(&f_inverse.permutation)
            .is_identity());
    }

    #[test]
    fn test_discover_two_by_two() {
        let table = discover(2, Tolerance::default()).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.domain(), 24);
        for generator in table.generators() {
            assert_eq!(generator.turn.quarters, 1);
            assert_eq!(generator.permutation.fixed_points(), 12);
            assert!(generator.permutation.pow(4).is_identity());
            assert!(!generator.permutation.pow(2).is_identity());
        }
    }

    #[test]
    fn test_discover_three_by_three_fixes_centers() {
        let table = discover(3, Tolerance::default()).unwrap();
        let centers = [5, 14, 23, 32, 41, 50];
        for generator in table.generators() {
            assert_eq!(generator.permutation.fixed_points(), 54 - 20);
            for center in centers {
                assert_eq!(generator.permutation.apply(center), Ok(center));
            }
        }
    }

    #[test]
    fn test_opposite_faces_commute() {
        let table = discover(3, Tolerance::default()).unwrap();
        let r = &table.find(Turn::new(Face::R, 1)).unwrap().permutation;
        let l = &table.find(Turn::new(Face::L, 1)).unwrap().permutation;
        assert_eq!(r.compose(l), l.compose(r));
    }

    #[test]
    fn test_new_rejects_mixed_domains() {
        let generators = vec![
            Generator {
                turn: Turn::new(Face::U, 1),
                permutation: Permutation::identity(24),
            },
            Generator {
                turn: Turn::new(Face::D, 1),
                permutation: Permutation::identity(54),
            },
        ];
        assert_eq!(
            GeneratorTable::new(generators),
            Err(GeneratorError::DomainMismatch {
                turn: Turn::new(Face::D, 1),
                expected: 24,
                found: 54,
            })
        );
        assert_eq!(GeneratorTable::new(Vec::new()), Err(GeneratorError::Empty));
    }

    #[test]
    fn test_cache_discovers_once() {
        let mut cache = GeneratorCache::new(Tolerance::default());
        let first = cache.get(2).unwrap().clone();
        let second = cache.get(2).unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn test_cache_round_trips_through_directory() {
        let directory = std::env::temp_dir().join(format!("magicube-cache-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();

        let discovered = GeneratorCache::new(Tolerance::default())
            .with_directory(&directory)
            .get(2)
            .unwrap()
            .clone();
        assert_eq!(persistence::load(&directory, 2), Some(discovered));

        std::fs::remove_dir_all(&directory).unwrap();
    }
}
