//! NxNxN cube permutation engine.
//!
//! Cube moves are modelled as permutations of labelled facelets. The crate
//! composes and decomposes those permutations, recovers them from sticker
//! geometry, and searches bounded move sequences for ones with a useful cycle
//! structure (3-cycles, corner swaps and the like).

pub mod cube;
pub mod cycles;
pub mod facelets;
pub mod generators;
pub mod geometry;
pub mod matcher;
pub mod moves;
pub mod permutation;
pub mod persistence;
pub mod search;

pub use cube::{Cube, CubeError};
pub use facelets::{FaceletSpace, Label};
pub use generators::{Generator, GeneratorCache, GeneratorError, GeneratorTable};
pub use matcher::{Snapshot, Tolerance};
pub use moves::{Face, Move, MoveHistory, NotationError, Turn};
pub use permutation::{Permutation, PermutationError};
pub use search::{MoveSearch, SearchConfig, SearchError, SearchNode, SearchOutcome};
