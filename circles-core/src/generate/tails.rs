use std::{collections::{BTreeSet, HashMap}, rc::Rc};

use log::{debug, trace};

use crate::{arrangement::Arrangement, circle::Circle, error::{CirclesError, Result}};

use super::profiles::candidate_profiles;

/// Indices `other` may still relate to once the pivot has taken profile `pivot`.
///
/// - contained by the pivot: its siblings inside or crossing the pivot
/// - crossing the pivot: every other index
/// - unrelated to the pivot: every other index the pivot doesn't contain
pub fn available(pivot: &Circle, other: usize, others: &BTreeSet<usize>) -> BTreeSet<usize> {
    let mut available: BTreeSet<usize> = if pivot.encloses(other) {
        pivot.contains().iter().chain(pivot.intersects()).copied().collect()
    } else if pivot.crosses(other) {
        others.clone()
    } else {
        others.difference(pivot.contains()).copied().collect()
    };
    available.remove(&other);
    available
}

/// Recursive candidate generator, memoized on `(index, others)`.
///
/// `max_candidates` bounds the arrangements generated across every subproblem, checked before each
/// batch of tails is combined.
pub struct Generator {
    max_candidates: usize,
    generated: usize,
    memo: HashMap<(usize, BTreeSet<usize>), Rc<Vec<Arrangement>>>,
}

impl Generator {
    pub fn new(max_candidates: usize) -> Self {
        Self { max_candidates, generated: 0, memo: HashMap::new() }
    }

    /// Number of memoized subproblems.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Candidate arrangements generated so far, over all subproblems.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Every candidate arrangement of `index` together with `others`.
    ///
    /// Each candidate joins one pivot profile with one tail: an arrangement generated recursively
    /// for a single other index over the indices still [`available`] to it. Tails that leave some
    /// other index unplaced are skipped, so every candidate holds exactly one profile per index in
    /// `{index} ∪ others`.
    pub fn solve(
        &mut self,
        index: usize,
        others: &BTreeSet<usize>,
    ) -> Result<Rc<Vec<Arrangement>>> {
        let key = (index, others.clone());
        if let Some(solutions) = self.memo.get(&key) {
            return Ok(solutions.clone());
        }
        let solutions = Rc::new(self.compute(index, others)?);
        self.memo.insert(key, solutions.clone());
        Ok(solutions)
    }

    fn compute(&mut self, index: usize, others: &BTreeSet<usize>) -> Result<Vec<Arrangement>> {
        if others.is_empty() {
            return Ok(vec![Arrangement::from_circles(vec![Circle::empty(index)])]);
        }
        let profiles = candidate_profiles(index, others)?;
        let mut solutions: Vec<Arrangement> = vec![];
        for profile in &profiles {
            for &other in others {
                let available = available(profile, other, others);
                if available.len() + 1 != others.len() {
                    trace!(
                        "circle {} as {}: tail from {} covers {:?}, skipping",
                        index,
                        profile,
                        other,
                        available,
                    );
                    continue;
                }
                let tails = self.solve(other, &available)?;
                let requested = self.generated + tails.len();
                if requested > self.max_candidates {
                    return Err(CirclesError::ResourceExceeded {
                        what: "candidate arrangements",
                        limit: self.max_candidates,
                        requested,
                    });
                }
                self.generated = requested;
                solutions.extend(tails.iter().map(|tail| {
                    let mut circles = Vec::with_capacity(tail.len() + 1);
                    circles.push(profile.clone());
                    circles.extend(tail.iter().cloned());
                    Arrangement::from_circles(circles)
                }));
            }
        }
        debug!(
            "circle {} with {:?}: {} profiles, {} candidates ({} memoized subproblems)",
            index,
            others,
            profiles.len(),
            solutions.len(),
            self.memo.len(),
        );
        Ok(solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::circle;
    use test_log::test;

    fn set(idxs: &[usize]) -> BTreeSet<usize> {
        idxs.iter().copied().collect()
    }

    #[test]
    fn available_contained() {
        let pivot = circle(0, &[1, 2], &[3, 3]);
        assert_eq!(available(&pivot, 1, &set(&[1, 2, 3, 4])), set(&[2, 3]));
    }

    #[test]
    fn available_crossing() {
        let pivot = circle(0, &[1], &[3, 3]);
        assert_eq!(available(&pivot, 3, &set(&[1, 2, 3])), set(&[1, 2]));
    }

    #[test]
    fn available_unrelated() {
        let pivot = circle(0, &[1], &[3, 3]);
        assert_eq!(available(&pivot, 2, &set(&[1, 2, 3])), set(&[3]));
        let empty = Circle::empty(0);
        assert_eq!(available(&empty, 2, &set(&[1, 2, 3])), set(&[1, 3]));
    }

    #[test]
    fn single_circle() {
        let mut generator = Generator::new(100);
        let solutions = generator.solve(0, &BTreeSet::new()).unwrap();
        assert_eq!(*solutions, vec![Arrangement::from_circles(vec![Circle::empty(0)])]);
    }

    #[test]
    fn two_circles() {
        let mut generator = Generator::new(100);
        let solutions = generator.solve(0, &set(&[1])).unwrap();
        let expected: Vec<Arrangement> = vec![
            vec![circle(0, &[], &[]), circle(1, &[], &[])],
            vec![circle(0, &[], &[1, 1]), circle(1, &[], &[])],
            vec![circle(0, &[1], &[]), circle(1, &[], &[])],
        ]
        .into_iter()
        .map(Arrangement::from_circles)
        .collect();
        assert_eq!(*solutions, expected);
    }

    #[test]
    fn complete_candidates() {
        let mut generator = Generator::new(1_000_000);
        let others = set(&[1, 2, 3]);
        let solutions = generator.solve(0, &others).unwrap();
        assert!(!solutions.is_empty());
        for solution in solutions.iter() {
            assert_eq!(solution.indices(), set(&[0, 1, 2, 3]));
        }
    }

    #[test]
    fn memoized() {
        let mut generator = Generator::new(1_000_000);
        let first = generator.solve(0, &set(&[1, 2])).unwrap();
        let memoized = generator.memo_len();
        let second = generator.solve(0, &set(&[1, 2])).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(generator.memo_len(), memoized);
    }

    #[test]
    fn candidate_budget_spans_subproblems() {
        // 3 candidates each for (1, {2}) and (2, {1}), 72 for (0, {1, 2})
        let mut generator = Generator::new(78);
        assert_eq!(generator.solve(0, &set(&[1, 2])).unwrap().len(), 72);
        assert_eq!(generator.generated(), 78);

        let mut generator = Generator::new(77);
        let err = generator.solve(0, &set(&[1, 2])).unwrap_err();
        assert!(matches!(err, CirclesError::ResourceExceeded { limit: 77, .. }), "{:?}", err);
    }

    #[test]
    fn candidate_limit() {
        let mut generator = Generator::new(10);
        let err = generator.solve(0, &set(&[1, 2])).unwrap_err();
        assert!(matches!(err, CirclesError::ResourceExceeded { limit: 10, .. }), "{:?}", err);
    }
}
