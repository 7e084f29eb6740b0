use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;

use crate::{circle::Circle, error::RelationError};

/// Every distinct angular order in which `partners` can cross a boundary, each partner crossing
/// exactly twice.
///
/// Orders are the distinct permutations of the doubled multiset, in lexicographic order. No
/// partners yields the single empty order.
pub fn crossing_orders(partners: &BTreeSet<usize>) -> Vec<Vec<usize>> {
    let mut counts: Vec<(usize, usize)> = partners.iter().map(|&partner| (partner, 2)).collect();
    let mut prefix = Vec::with_capacity(2 * counts.len());
    let mut orders = vec![];
    extend_orders(&mut counts, &mut prefix, &mut orders);
    orders
}

fn extend_orders(
    counts: &mut [(usize, usize)],
    prefix: &mut Vec<usize>,
    orders: &mut Vec<Vec<usize>>,
) {
    if counts.iter().all(|&(_, remaining)| remaining == 0) {
        orders.push(prefix.clone());
        return;
    }
    for idx in 0..counts.len() {
        let (partner, remaining) = counts[idx];
        if remaining == 0 {
            continue;
        }
        counts[idx].1 -= 1;
        prefix.push(partner);
        extend_orders(counts, prefix, orders);
        prefix.pop();
        counts[idx].1 += 1;
    }
}

/// All relation profiles circle `index` may take against `others`.
///
/// Any subset of `others` may be contained; any subset of the rest may cross, in any crossing
/// order. This includes the empty profile.
pub fn candidate_profiles(
    index: usize,
    others: &BTreeSet<usize>,
) -> Result<BTreeSet<Circle>, RelationError> {
    let mut profiles = BTreeSet::new();
    for contains in others.iter().copied().powerset() {
        let free = others.iter().copied().filter(|other| !contains.contains(other));
        for partners in free.powerset() {
            let partners: BTreeSet<usize> = partners.into_iter().collect();
            for order in crossing_orders(&partners) {
                profiles.insert(Circle::new(index, contains.iter().copied(), order)?);
            }
        }
    }
    debug!("circle {}: {} candidate profiles against {:?}", index, profiles.len(), others);
    Ok(profiles)
}
