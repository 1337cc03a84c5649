//! Disjoint cycle decomposition of permutations.

use crate::facelets::FaceletSpace;
use crate::permutation::Permutation;

/// Splits `permutation` into its orbits, fixed points included.
///
/// Orbits are listed in the order of their smallest id, and each orbit starts
/// at that id and follows the permutation.
pub fn decompose(permutation: &Permutation) -> Vec<Vec<usize>> {
    let mut seen = vec![false; permutation.len()];
    let mut orbits = Vec::new();

    for start in 1..=permutation.len() {
        if seen[start - 1] {
            continue;
        }

        seen[start - 1] = true;
        let mut orbit = vec![start];
        let mut point = permutation.image(start);
        while point != start {
            seen[point - 1] = true;
            orbit.push(point);
            point = permutation.image(point);
        }
        orbits.push(orbit);
    }

    orbits
}

/// The orbits of length two or more.
pub fn cycles(permutation: &Permutation) -> Vec<Vec<usize>> {
    decompose(permutation)
        .into_iter()
        .filter(|orbit| orbit.len() > 1)
        .collect()
}

/// Renders the non-trivial cycles as `[[a,b,c][d,e]]`, labelling ids through
/// `space`. The identity renders as `[]`.
pub fn render(permutation: &Permutation, space: &FaceletSpace) -> String {
    let mut output = String::from("[");
    for cycle in cycles(permutation) {
        output.push('[');
        let labels: Vec<String> = cycle.iter().map(|&id| space.translate(id).to_string()).collect();
        output.push_str(&labels.join(","));
        output.push(']');
    }
    output.push(']');
    output
}
