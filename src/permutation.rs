//! Permutations over facelet ids.
//!
//! A permutation of size `M` is stored as the sequence of images of the ids
//! `1..=M`: position `i` (1-based) holds the id that facelet `i` is sent to.
//! Bijectivity is checked once, when the permutation is built, so the hot
//! operations (`compose`, `apply`) never re-validate.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("A permutation needs at least one facelet")]
    Empty,
    #[error("Image out of range, expected a value between 1 and {domain} but got {value}")]
    OutOfRange { value: usize, domain: usize },
    #[error("Mapping is not a bijection, {value} appears more than once")]
    NotBijective { value: usize },
    #[error("Facelet id {id} is outside the domain 1..={domain}")]
    IdOutOfDomain { id: usize, domain: usize },
}

/// A bijection on `1..=M`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation {
    images: Vec<usize>,
}

impl Permutation {
    /// Builds a permutation from 1-based images, rejecting anything that is
    /// not a bijection on `1..=images.len()`.
    pub fn new(images: Vec<usize>) -> Result<Self, PermutationError> {
        if images.is_empty() {
            return Err(PermutationError::Empty);
        }

        let domain = images.len();
        let mut seen = vec![false; domain];
        for &value in &images {
            if value == 0 || value > domain {
                return Err(PermutationError::OutOfRange { value, domain });
            }
            if std::mem::replace(&mut seen[value - 1], true) {
                return Err(PermutationError::NotBijective { value });
            }
        }

        Ok(Self { images })
    }

    /// Builds a permutation from 0-based images (as produced by tables that
    /// index facelets from zero).
    pub fn from_zero_based(images: &[usize]) -> Result<Self, PermutationError> {
        Self::new(images.iter().map(|&image| image + 1).collect())
    }

    /// The permutation that fixes every id in `1..=domain`.
    pub fn identity(domain: usize) -> Self {
        Self {
            images: (1..=domain).collect(),
        }
    }

    /// Number of facelets in the domain.
    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The raw 1-based images.
    #[inline]
    pub fn images(&self) -> &[usize] {
        &self.images
    }

    /// Returns the image of `id`.
    pub fn apply(&self, id: usize) -> Result<usize, PermutationError> {
        if id == 0 || id > self.images.len() {
            return Err(PermutationError::IdOutOfDomain {
                id,
                domain: self.images.len(),
            });
        }
        Ok(self.images[id - 1])
    }

    /// Image of an id already known to be in the domain.
    #[inline(always)]
    pub(crate) fn image(&self, id: usize) -> usize {
        self.images[id - 1]
    }

    /// Applies `self`, then `other`: `r[i] = other[self[i]]`.
    ///
    /// # Panics
    ///
    /// Panics if the two permutations act on domains of different sizes.
    pub fn compose(&self, other: &Permutation) -> Permutation {
        assert_eq!(
            self.len(),
            other.len(),
            "cannot compose permutations of different sizes"
        );

        Permutation {
            images: self
                .images
                .iter()
                .map(|&image| other.images[image - 1])
                .collect(),
        }
    }

    /// The permutation that undoes `self`.
    pub fn inverse(&self) -> Permutation {
        let mut images = vec![0; self.images.len()];
        for (index, &image) in self.images.iter().enumerate() {
            images[image - 1] = index + 1;
        }
        Permutation { images }
    }

    /// `self` composed with itself `exponent` times; the identity for 0.
    pub fn pow(&self, exponent: usize) -> Permutation {
        let mut result = Permutation::identity(self.len());
        for _ in 0..exponent {
            result = result.compose(self);
        }
        result
    }

    /// Number of ids that map to themselves.
    pub fn fixed_points(&self) -> usize {
        self.images
            .iter()
            .enumerate()
            .filter(|&(index, &image)| image == index + 1)
            .count()
    }

    pub fn is_identity(&self) -> bool {
        self.fixed_points() == self.len()
    }

    /// Whether every id in `ids` is a fixed point. Ids outside the domain
    /// are never fixed.
    pub fn fixes_all(&self, ids: &[usize]) -> bool {
        ids.iter().all(|&id| self.apply(id) == Ok(id))
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, image) in self.images.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{image}")?;
        }
        write!(f, "]")
    }
}
