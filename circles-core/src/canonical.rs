//! Label-independent normal form of an arrangement.
//!
//! Circles are visited richest first: descending `(|intersects|, |contains|)`. Each visited circle
//! hands the next free labels to its unlabelled crossing partners, then to its unlabelled contained
//! circles, then to itself. Rewritten crossing sequences are rotated to their smallest rotation and
//! circles are sorted by new index.
//!
//! Wherever the visit leaves a choice (circles of equal rank, partners or contained circles of the
//! same circle), every choice is tried and the smallest rewritten arrangement wins. The result is
//! therefore the same for any relabelling of the input, and canonicalizing twice changes nothing.

use std::{cmp::Reverse, collections::{BTreeMap, BTreeSet}};

use itertools::Itertools;

use crate::{arrangement::Arrangement, circle::Circle};

/// Circles sorted by descending rank; equal ranks keep their index order.
pub fn structural_order(arrangement: &Arrangement) -> Vec<&Circle> {
    let mut circles: Vec<&Circle> = arrangement.iter().collect();
    circles.sort_by_key(|circle| Reverse(circle.rank()));
    circles
}

/// Every visit order consistent with [`structural_order`], permuting circles of equal rank.
fn visit_orders(arrangement: &Arrangement) -> Vec<Vec<&Circle>> {
    let groups: Vec<Vec<Vec<&Circle>>> = structural_order(arrangement)
        .into_iter()
        .chunk_by(|circle| circle.rank())
        .into_iter()
        .map(|(_, group)| {
            let group: Vec<&Circle> = group.collect();
            let len = group.len();
            group.into_iter().permutations(len).collect()
        })
        .collect();
    groups
        .into_iter()
        .multi_cartesian_product()
        .map(|choice| choice.concat())
        .collect()
}

/// Extend `labelled` (old indices, in new-label order) by walking `order`.
fn walk(order: &[&Circle], labelled: Vec<usize>, labellings: &mut BTreeSet<Vec<usize>>) {
    let Some((circle, rest)) = order.split_first() else {
        labellings.insert(labelled);
        return;
    };
    let fresh = |idx: &usize| !labelled.contains(idx);
    let partners: Vec<usize> = circle.partners().into_iter().filter(fresh).collect();
    let contained: Vec<usize> = circle.contains().iter().copied().filter(fresh).collect();
    let own = (!labelled.contains(&circle.index())).then_some(circle.index());
    for partners in partners.iter().copied().permutations(partners.len()) {
        for contained in contained.iter().copied().permutations(contained.len()) {
            let mut next = labelled.clone();
            next.extend(&partners);
            next.extend(&contained);
            next.extend(own);
            walk(rest, next, labellings);
        }
    }
}

pub fn canonicalize(arrangement: &Arrangement) -> Arrangement {
    if arrangement.is_empty() {
        return arrangement.clone();
    }
    let mut labellings = BTreeSet::new();
    for order in visit_orders(arrangement) {
        walk(&order, Vec::with_capacity(arrangement.len()), &mut labellings);
    }
    labellings
        .iter()
        .map(|labelled| {
            let labels: BTreeMap<usize, usize> =
                labelled.iter().enumerate().map(|(new, &old)| (old, new)).collect();
            arrangement.relabel(&labels)
        })
        .min()
        .unwrap_or_else(|| arrangement.clone())
}

pub fn is_canonical(arrangement: &Arrangement) -> bool {
    canonicalize(arrangement) == *arrangement
}
