//! Exhaustive depth-bounded search for interesting move sequences.
//!
//! Starting from a seed generator, every sequence of generators up to
//! `max_depth` moves is composed and scored by its number of fixed points.
//! There is no pruning: the search is complete up to the depth bound, at a
//! cost of `generators^(max_depth - 1)` nodes.
//!
//! Two things come out of a run:
//! - reports, emitted as soon as a node is found whose permutation leaves the
//!   top layer intact, moves few enough facelets to be useful, and is not just
//!   a single generator away from the identity;
//! - the best node, the non-identity permutation with the most fixed points
//!   (the first one found wins ties).

use std::fmt;

use log::info;
use thiserror::Error;

use crate::facelets::FaceletSpace;
use crate::generators::GeneratorTable;
use crate::moves::{Face, Turn};
use crate::permutation::Permutation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Seed generator {seed} does not exist, the table has {count} generators")]
    SeedOutOfRange { seed: usize, count: usize },
}

/// Search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Longest move sequence explored, seed included.
    pub max_depth: usize,
    /// Index of the generator every sequence starts with.
    pub seed: usize,
    /// Fewest fixed points a reported permutation may have.
    pub min_score: usize,
    /// Facelet ids (the top layer) a reported permutation must leave in place.
    pub pinned: Vec<usize>,
}

impl SearchConfig {
    /// Defaults for a table acting on `domain` facelets whose first half is
    /// the top layer, as in [`crate::generators::edge_corner_table`].
    pub fn for_domain(domain: usize) -> Self {
        Self {
            max_depth: 8,
            seed: 0,
            min_score: domain / 2,
            pinned: (1..=domain / 2).collect(),
        }
    }

    /// Defaults for a table discovered on an NxNxN cube. The facelets of the
    /// top layer are pinned, and `min_score` is the number of facelets a
    /// single outer quarter turn leaves in place (the center of an odd cube
    /// included), so plain turns fall under the twist rule.
    pub fn for_cube(size: usize) -> Self {
        let space = FaceletSpace::new(size);
        let pinned = space.layer_ids(Face::U, 0);
        Self {
            min_score: space.facelet_count() - pinned.len() + size % 2,
            pinned,
            ..Self::for_domain(space.facelet_count())
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::for_domain(24)
    }
}

/// A move sequence and its net permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub path: Vec<Turn>,
    pub permutation: Permutation,
    pub score: usize,
}

impl SearchNode {
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl fmt::Display for SearchNode {
    /// `<depth> <score> [<path>] <permutation>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [", self.depth(), self.score)?;
        for (index, turn) in self.path.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{turn}")?;
        }
        write!(f, "] {}", self.permutation)
    }
}

/// Summary of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best non-identity node, if any node other than the identity was seen.
    pub best: Option<SearchNode>,
    pub nodes_visited: u64,
    pub reports: u64,
}

/// A configured search over one generator table.
pub struct MoveSearch<'a> {
    table: &'a GeneratorTable,
    config: SearchConfig,
}

impl<'a> MoveSearch<'a> {
    pub fn new(table: &'a GeneratorTable, config: SearchConfig) -> Self {
        Self { table, config }
    }

    /// Explores every sequence and hands each accepted node to `on_report`
    /// the moment it is found.
    pub fn run(&self, on_report: impl FnMut(&SearchNode)) -> Result<SearchOutcome, SearchError> {
        let seed = self
            .table
            .get(self.config.seed)
            .ok_or(SearchError::SeedOutOfRange {
                seed: self.config.seed,
                count: self.table.len(),
            })?;

        let mut context = SearchContext {
            search: self,
            path: vec![self.config.seed],
            best: None,
            nodes_visited: 0,
            reports: 0,
            on_report,
        };
        context.visit(seed.permutation.clone());

        let outcome = SearchOutcome {
            best: context.best.map(|(path, permutation, score)| SearchNode {
                path: self.turns(&path),
                permutation,
                score,
            }),
            nodes_visited: context.nodes_visited,
            reports: context.reports,
        };
        info!(
            "Search visited {} nodes, reported {}",
            outcome.nodes_visited, outcome.reports
        );
        Ok(outcome)
    }

    /// Whether a node with this permutation is reported.
    pub fn accepts(&self, permutation: &Permutation) -> bool {
        let score = permutation.fixed_points();
        if score < self.config.min_score || score >= permutation.len() {
            return false;
        }
        if !self.keeps_pinned(permutation) {
            return false;
        }
        !(score == self.config.min_score && self.is_twist(permutation))
    }

    /// Whether every pinned facelet stays in place.
    pub fn keeps_pinned(&self, permutation: &Permutation) -> bool {
        permutation.fixes_all(&self.config.pinned)
    }

    /// Whether one, two or three applications of a single clockwise generator
    /// return `permutation` to the identity.
    pub fn is_twist(&self, permutation: &Permutation) -> bool {
        self.table
            .generators()
            .iter()
            .filter(|generator| generator.turn.quarters > 0)
            .any(|generator| {
                let mut next = permutation.clone();
                (0..3).any(|_| {
                    next = next.compose(&generator.permutation);
                    next.is_identity()
                })
            })
    }

    fn turns(&self, path: &[usize]) -> Vec<Turn> {
        path.iter()
            .map(|&index| self.table.generators()[index].turn)
            .collect()
    }
}

/// Mutable state of one top-level search. Branches share the path buffer by
/// pushing and popping around each child.
struct SearchContext<'s, 'a, F> {
    search: &'s MoveSearch<'a>,
    path: Vec<usize>,
    best: Option<(Vec<usize>, Permutation, usize)>,
    nodes_visited: u64,
    reports: u64,
    on_report: F,
}

impl<F: FnMut(&SearchNode)> SearchContext<'_, '_, F> {
    fn visit(&mut self, permutation: Permutation) {
        self.nodes_visited += 1;

        let score = permutation.fixed_points();
        let improves = match &self.best {
            Some((_, _, best_score)) => score > *best_score,
            None => true,
        };
        if score < permutation.len() && improves {
            self.best = Some((self.path.clone(), permutation.clone(), score));
        }

        if self.search.accepts(&permutation) {
            self.reports += 1;
            let node = SearchNode {
                path: self.search.turns(&self.path),
                permutation: permutation.clone(),
                score,
            };
            (self.on_report)(&node);
        }

        if self.path.len() >= self.search.config.max_depth {
            return;
        }

        let table = self.search.table;
        for (index, generator) in table.generators().iter().enumerate() {
            self.path.push(index);
            self.visit(permutation.compose(&generator.permutation));
            self.path.pop();
        }
    }
}
