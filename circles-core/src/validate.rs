//! Global consistency of an arrangement's crossing structure.

use std::collections::BTreeSet;

use log::trace;

use crate::arrangement::Arrangement;

/// Unordered pair of circle indices, smaller first.
pub type Pair = (usize, usize);

fn pair(a: usize, b: usize) -> Pair {
    if a <= b { (a, b) } else { (b, a) }
}

/// Pairs of circles that must cross each other, inferred from each circle's crossing order.
///
/// Walking a circle's `intersects` with a stack, two equal entries on top close a loop and are
/// popped; otherwise the two most recent entries must be adjacent crossers.
pub fn required_adjacencies(arrangement: &Arrangement) -> BTreeSet<Pair> {
    let mut required = BTreeSet::new();
    for circle in arrangement.iter() {
        let mut stack: Vec<usize> = Vec::with_capacity(circle.intersects().len());
        for &idx in circle.intersects() {
            stack.push(idx);
            let len = stack.len();
            if len < 2 {
                continue;
            }
            let (a, b) = (stack[len - 2], stack[len - 1]);
            if a == b {
                stack.truncate(len - 2);
            } else {
                required.insert(pair(a, b));
            }
        }
    }
    required
}

/// Required adjacencies not backed by a pair of circles that record crossing each other.
pub fn unmatched_adjacencies(arrangement: &Arrangement) -> BTreeSet<Pair> {
    let mut required = required_adjacencies(arrangement);
    for circle in arrangement.iter() {
        for partner in circle.partners() {
            let reciprocated = arrangement
                .circle(partner)
                .map_or(false, |other| other.crosses(circle.index()));
            if reciprocated {
                required.remove(&pair(circle.index(), partner));
            }
        }
    }
    required
}

pub fn is_valid(arrangement: &Arrangement) -> bool {
    let unmatched = unmatched_adjacencies(arrangement);
    if !unmatched.is_empty() {
        trace!("rejecting {}: unmatched adjacencies {:?}", arrangement, unmatched);
    }
    unmatched.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::circle;
    use test_log::test;

    fn arrangement(circles: Vec<crate::circle::Circle>) -> Arrangement {
        Arrangement::new(circles).unwrap()
    }

    #[test]
    fn no_crossings() {
        let a = arrangement(vec![circle(0, &[1], &[]), circle(1, &[], &[]), circle(2, &[], &[])]);
        assert!(required_adjacencies(&a).is_empty());
        assert!(is_valid(&a));
    }

    #[test]
    fn nested_loops_close_locally() {
        let a = arrangement(vec![
            circle(0, &[], &[1, 2, 2, 1]),
            circle(1, &[], &[]),
            circle(2, &[], &[]),
        ]);
        // 1, 2 -> {1, 2}; 2 closes; 1, 1 closes
        assert_eq!(required_adjacencies(&a), BTreeSet::from([(1, 2)]));
        assert!(!is_valid(&a));
    }

    #[test]
    fn adjacent_loops() {
        let a = arrangement(vec![
            circle(0, &[], &[1, 1, 2, 2]),
            circle(1, &[], &[]),
            circle(2, &[], &[]),
        ]);
        assert!(required_adjacencies(&a).is_empty());
        assert!(is_valid(&a));
    }

    #[test]
    fn interleaved_requires_reciprocal_crossing() {
        let one_sided = arrangement(vec![
            circle(0, &[], &[1, 2, 1, 2]),
            circle(1, &[], &[2, 2]),
            circle(2, &[], &[]),
        ]);
        assert_eq!(unmatched_adjacencies(&one_sided), BTreeSet::from([(1, 2)]));
        assert!(!is_valid(&one_sided));

        let mutual = arrangement(vec![
            circle(0, &[], &[1, 2, 1, 2]),
            circle(1, &[], &[2, 2]),
            circle(2, &[], &[1, 1]),
        ]);
        assert_eq!(required_adjacencies(&mutual), BTreeSet::from([(1, 2)]));
        assert!(unmatched_adjacencies(&mutual).is_empty());
        assert!(is_valid(&mutual));
    }

    #[test]
    fn three_way_adjacency() {
        let a = arrangement(vec![
            circle(0, &[], &[1, 2, 3, 1, 2, 3]),
            circle(1, &[], &[2, 2, 3, 3]),
            circle(2, &[], &[1, 1]),
            circle(3, &[], &[1, 1]),
        ]);
        assert_eq!(required_adjacencies(&a), BTreeSet::from([(1, 2), (2, 3), (1, 3)]));
        // 2 and 3 never record crossing each other
        assert_eq!(unmatched_adjacencies(&a), BTreeSet::from([(2, 3)]));
    }
}
