//! A single NxNxN cube: sticker geometry plus the net move history.

use thiserror::Error;

use crate::facelets::FaceletSpace;
use crate::geometry::{build_facelets, in_layer, FaceletGeometry, Rotation, Sticker};
use crate::matcher::{match_snapshots, Snapshot, Tolerance};
use crate::moves::{Face, Move, MoveHistory, Turn};
use crate::permutation::Permutation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Cube size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("Layer should be between 0 and {} but got {layer}", .size - 1)]
    LayerOutOfRange { layer: usize, size: usize },
}

/// An NxNxN cube whose facelets are moved by layer turns.
///
/// Facelet `i` keeps its identity for the lifetime of the cube; turns only
/// move its geometry. The permutation a cube has undergone is recovered by
/// matching it against an untouched reference cube.
#[derive(Clone, Debug)]
pub struct Cube {
    size: usize,
    facelets: Vec<FaceletGeometry>,
    history: MoveHistory,
}

impl Cube {
    pub fn new(size: usize) -> Result<Self, CubeError> {
        if size == 0 {
            return Err(CubeError::InvalidSize(size));
        }
        Ok(Self {
            size,
            facelets: build_facelets(size),
            history: MoveHistory::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn space(&self) -> FaceletSpace {
        FaceletSpace::new(self.size)
    }

    pub fn facelets(&self) -> &[FaceletGeometry] {
        &self.facelets
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Turns `layer` of `face` by `turns` quarter turns (fractional turns are
    /// allowed for animation) and records the move.
    ///
    /// Fails without changing anything when `layer` is not in `0..size`.
    pub fn rotate_face(&mut self, face: Face, turns: f64, layer: usize) -> Result<(), CubeError> {
        if layer >= self.size {
            return Err(CubeError::LayerOutOfRange {
                layer,
                size: self.size,
            });
        }

        self.history.push(Move::new(face, turns, layer));
        self.turn_layer(face, turns, layer);
        Ok(())
    }

    fn turn_layer(&mut self, face: Face, turns: f64, layer: usize) {
        let axis = face.normal();
        let rotation = Rotation::quarter_turns(axis, turns);
        for facelet in &mut self.facelets {
            if in_layer(facelet.anchor, axis, layer, self.size) {
                facelet.transform(&rotation);
            }
        }
    }

    /// Applies a whole-quarter-turn move to the outer layer.
    ///
    /// Layer 0 exists on every cube [`Cube::new`] accepts, so this cannot
    /// fail.
    pub fn apply_turn(&mut self, turn: Turn) {
        let outer = Move::from(turn);
        self.history.push(outer);
        self.turn_layer(outer.face, outer.turns, outer.layer);
    }

    pub fn apply_sequence(&mut self, turns: &[Turn]) {
        for &turn in turns {
            self.apply_turn(turn);
        }
    }

    /// Undoes the recorded history, leaving the cube solved and the history
    /// empty.
    pub fn solve(&mut self) {
        for mv in self.history.undo_sequence() {
            self.turn_layer(mv.face, mv.turns, mv.layer);
        }
        self.history.clear();
    }

    /// Discards all geometry and history.
    pub fn reset(&mut self) {
        self.facelets = build_facelets(self.size);
        self.history.clear();
    }

    /// The permutation carrying this cube's facelets onto `reference`.
    pub fn match_against(&self, reference: &Cube, tolerance: Tolerance) -> Option<Permutation> {
        match_snapshots(self, reference, tolerance)
    }

    /// The net permutation applied since construction.
    pub fn state(&self, tolerance: Tolerance) -> Option<Permutation> {
        let reference = Cube {
            size: self.size,
            facelets: build_facelets(self.size),
            history: MoveHistory::new(),
        };
        self.match_against(&reference, tolerance)
    }
}

impl Snapshot for Cube {
    fn facelet_count(&self) -> usize {
        self.facelets.len()
    }

    fn sticker(&self, index: usize) -> &Sticker {
        &self.facelets[index].sticker
    }
}
