//! Faces, turns and the net move history of a cube.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Turn counts closer than this to a multiple of four cancel out.
const TURN_EPSILON: f64 = 1e-8;

/// One of the six axis-aligned faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    F,
    B,
    R,
    L,
    U,
    D,
}

impl Face {
    /// All faces in generator-table order.
    pub const ALL: [Face; 6] = [Face::F, Face::B, Face::R, Face::L, Face::U, Face::D];

    pub const fn symbol(self) -> char {
        match self {
            Face::F => 'F',
            Face::B => 'B',
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.symbol() == symbol)
    }

    /// Outward unit normal; also the rotation axis of the face's layers.
    pub const fn normal(self) -> [f64; 3] {
        match self {
            Face::F => [0.0, 0.0, 1.0],
            Face::B => [0.0, 0.0, -1.0],
            Face::R => [1.0, 0.0, 0.0],
            Face::L => [-1.0, 0.0, 0.0],
            Face::U => [0.0, 1.0, 0.0],
            Face::D => [0.0, -1.0, 0.0],
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A whole number of quarter turns of the outer layer of a face.
///
/// Positive counts are clockwise seen from outside the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Turn {
    pub face: Face,
    pub quarters: i32,
}

impl Turn {
    pub const fn new(face: Face, quarters: i32) -> Self {
        Self { face, quarters }
    }

    pub const fn inverse(self) -> Self {
        Self {
            face: self.face,
            quarters: -self.quarters,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quarters {
            1 => write!(f, "{}", self.face),
            -1 => write!(f, "{}'", self.face),
            n if n < 0 => write!(f, "{}{}'", self.face, -n),
            n => write!(f, "{}{}", self.face, n),
        }
    }
}

/// A possibly fractional turn of one layer, as recorded in the history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Move {
    pub face: Face,
    pub turns: f64,
    pub layer: usize,
}

impl Move {
    pub const fn new(face: Face, turns: f64, layer: usize) -> Self {
        Self { face, turns, layer }
    }

    pub fn inverse(self) -> Self {
        Self {
            turns: -self.turns,
            ..self
        }
    }
}

impl From<Turn> for Move {
    fn from(turn: Turn) -> Self {
        Move::new(turn.face, f64::from(turn.quarters), 0)
    }
}

/// Reduces a turn count modulo 4 to the representative of smallest
/// magnitude, preferring the positive one on a tie (so the range is `(-2, 2]`).
pub fn normalize_turns(turns: f64) -> f64 {
    let reduced = turns.rem_euclid(4.0);
    if (reduced - 4.0).abs() < reduced.abs() {
        reduced - 4.0
    } else {
        reduced
    }
}

/// The minimal net sequence of layer turns applied since the last reset.
///
/// Adjacent moves of the same face and layer are merged; merges that come to
/// zero remove the entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Records a move, merging it into the last entry when both target the
    /// same face and layer.
    pub fn push(&mut self, mv: Move) {
        let merged = match self.moves.last_mut() {
            Some(last) if last.face == mv.face && last.layer == mv.layer => {
                last.turns = normalize_turns(last.turns + mv.turns);
                true
            }
            _ => false,
        };

        if !merged {
            self.moves.push(mv);
        } else if self
            .moves
            .last()
            .is_some_and(|last| last.turns.abs() < TURN_EPSILON)
        {
            self.moves.pop();
        }
    }

    /// The moves that undo this history, in the order they must be applied.
    pub fn undo_sequence(&self) -> Vec<Move> {
        self.moves.iter().rev().map(|mv| mv.inverse()).collect()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Unknown face symbol {0:?}")]
    UnknownFace(char),
    #[error("Malformed move token {0:?}")]
    Malformed(String),
}

/// Parses a move sequence such as `"L * (B)^-1 * B2 * D'"`.
///
/// Tokens are separated by `*`. `X` is a clockwise quarter turn, `Xn` is `n`
/// clockwise quarter turns, both `(X)^-1` and `X'` are a counter-clockwise
/// quarter turn, and `Xn'` is `n` counter-clockwise quarter turns. A blank
/// string is the empty sequence.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Turn>, NotationError> {
    if sequence.trim().is_empty() {
        return Ok(Vec::new());
    }
    sequence.split('*').map(|token| token.trim().parse()).collect()
}

impl FromStr for Turn {
    type Err = NotationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = || NotationError::Malformed(token.to_string());
        let face_of = |symbol: char| Face::from_symbol(symbol).ok_or(NotationError::UnknownFace(symbol));

        if let Some(inner) = token.strip_prefix('(') {
            let inner = inner.strip_suffix(")^-1").ok_or_else(malformed)?;
            let mut chars = inner.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                return Err(malformed());
            };
            return Ok(Turn::new(face_of(symbol)?, -1));
        }

        let mut chars = token.chars();
        let symbol = chars.next().ok_or_else(malformed)?;
        let face = face_of(symbol)?;
        let rest = chars.as_str();

        let quarters = match rest {
            "" => 1,
            "'" => -1,
            digits => match digits.strip_suffix('\'') {
                Some(count) if count.bytes().all(|b| b.is_ascii_digit()) => {
                    -count.parse::<i32>().map_err(|_| malformed())?
                }
                _ => digits.parse::<i32>().map_err(|_| malformed())?,
            },
        };
        Ok(Turn::new(face, quarters))
    }
}

/// Operation sequences found by hand and by [`crate::search`]; each moves a
/// small set of corners or edges and leaves the rest of the cube intact.
pub const KNOWN_SEQUENCES: [&str; 7] = [
    "L * (B)^-1 * L * (B)^-1 * (R)^-1 * (U)^-1 * R * B2 * L2 * D * F * D * F * (D)^-1 * (F)^-1 * (D)^-1",
    "F * (D)^-1 * F * D * (F)^-1 * R2 * (D)^-1 * (B)^-1 * D * B * R2 * D * F * D2 * (F)^-1 * D * (F)^-1",
    "F * R * F * (R)^-1 * (D)^-1 * (F)^-1 * L * D * (L)^-1 * D * L * D2 * (L)^-1 * D2 * F * D * R * (F)^-1 * (R)^-1 * D2 * (F)^-1 * (D)^-1 * F * (D)^-1 * (F)^-1 * D2",
    "(D)^-1 * F * D * (F)^-1 * R2 * (D)^-1 * (B)^-1 * D * B * R2 * D * F * D2 * (F)^-1 * D",
    "F * R * F * (R)^-1 * (F)^-1 * L * F2 * (D)^-1 * (F)^-1 * R * (F)^-1 * (R)^-1 * (L)^-1",
    "F * B2 * D * (F)^-1 * (D)^-1 * B2 * D2 * (R)^-1 * (D)^-1 * F * (D)^-1 * (F)^-1",
    "F * D * R * F * (R)^-1 * (D)^-1 * (F)^-1 * D * F * D * (F)^-1 * D * F * D * (F)^-1",
];
