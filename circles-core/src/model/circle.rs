use std::{collections::{BTreeMap, BTreeSet}, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::RelationError;

/// One circle's relations to every other circle in an
/// [`Arrangement`](super::arrangement::Arrangement).
///
/// - `contains`: circles strictly inside this one.
/// - `intersects`: boundary crossings in angular order around this circle; every crossing partner
///   appears exactly twice, and the two occurrences may interleave with other partners'.
///
/// Invariants (checked by [`Circle::new`]): no self-containment, no self-intersection, each partner
/// crosses exactly twice, and no index is both contained and crossed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCircle")]
pub struct Circle {
    index: usize,
    contains: BTreeSet<usize>,
    intersects: Vec<usize>,
}

/// Unvalidated wire form of a [`Circle`].
#[derive(Deserialize)]
struct RawCircle {
    index: usize,
    #[serde(default)]
    contains: BTreeSet<usize>,
    #[serde(default)]
    intersects: Vec<usize>,
}

impl TryFrom<RawCircle> for Circle {
    type Error = RelationError;
    fn try_from(raw: RawCircle) -> Result<Self, Self::Error> {
        Circle::new(raw.index, raw.contains, raw.intersects)
    }
}

impl Circle {
    pub fn new(
        index: usize,
        contains: impl IntoIterator<Item = usize>,
        intersects: Vec<usize>,
    ) -> Result<Self, RelationError> {
        let contains: BTreeSet<usize> = contains.into_iter().collect();
        if contains.contains(&index) {
            return Err(RelationError::SelfContainment { index });
        }
        if intersects.contains(&index) {
            return Err(RelationError::SelfIntersection { index });
        }
        let counts: BTreeMap<usize, usize> =
            intersects.iter().copied().counts().into_iter().collect();
        if let Some((&partner, &count)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(RelationError::OddIntersection { index, partner, count });
        }
        if let Some(&partner) = counts.keys().find(|partner| contains.contains(*partner)) {
            return Err(RelationError::ContainedAndIntersected { index, partner });
        }
        Ok(Circle { index, contains, intersects })
    }

    /// A circle with no relations to any other.
    pub fn empty(index: usize) -> Self {
        Circle { index, contains: BTreeSet::new(), intersects: vec![] }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn contains(&self) -> &BTreeSet<usize> {
        &self.contains
    }

    pub fn intersects(&self) -> &[usize] {
        &self.intersects
    }

    /// Distinct circles whose boundaries cross this one.
    pub fn partners(&self) -> BTreeSet<usize> {
        self.intersects.iter().copied().collect()
    }

    pub fn encloses(&self, other: usize) -> bool {
        self.contains.contains(&other)
    }

    pub fn crosses(&self, other: usize) -> bool {
        self.intersects.contains(&other)
    }

    /// Structural rank used to order circles before relabelling: more crossings first, then more
    /// containments.
    pub fn rank(&self) -> (usize, usize) {
        (self.intersects.len(), self.contains.len())
    }

    /// Rewrite every index through `label`.
    ///
    /// `label` must be injective over the indices this circle mentions, which preserves all of the
    /// construction invariants.
    pub(crate) fn relabel(&self, label: impl Fn(usize) -> usize) -> Circle {
        Circle {
            index: label(self.index),
            contains: self.contains.iter().map(|&i| label(i)).collect(),
            intersects: self.intersects.iter().map(|&i| label(i)).collect(),
        }
    }

    /// Same relations, with `intersects` replaced by its lexicographically smallest rotation.
    pub(crate) fn with_min_rotation(self) -> Circle {
        let intersects = min_rotation(&self.intersects);
        Circle { intersects, ..self }
    }
}

/// Smallest rotation of a cyclic sequence.
pub fn min_rotation(seq: &[usize]) -> Vec<usize> {
    (0..seq.len())
        .map(|start| seq[start..].iter().chain(&seq[..start]).copied().collect::<Vec<usize>>())
        .min()
        .unwrap_or_default()
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circle(index={}, contains={{{}}}, intersects=({}))",
            self.index,
            self.contains.iter().join(", "),
            self.intersects.iter().join(", "),
        )
    }
}

/// Test shorthand for a circle known to be valid.
#[cfg(test)]
pub(crate) fn circle(index: usize, contains: &[usize], intersects: &[usize]) -> Circle {
    Circle::new(index, contains.iter().copied(), intersects.to_vec()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn valid_circle() {
        let c = circle(0, &[3], &[1, 2, 1, 2]);
        assert_eq!(c.index(), 0);
        assert_eq!(c.contains(), &BTreeSet::from([3]));
        assert_eq!(c.intersects(), &[1, 2, 1, 2]);
        assert_eq!(c.partners(), BTreeSet::from([1, 2]));
        assert!(c.encloses(3));
        assert!(c.crosses(2));
        assert!(!c.crosses(3));
        assert_eq!(c.rank(), (4, 1));
    }

    #[test]
    fn self_containment() {
        assert_eq!(
            Circle::new(1, [0, 1], vec![]),
            Err(RelationError::SelfContainment { index: 1 }),
        );
    }

    #[test]
    fn self_intersection() {
        assert_eq!(
            Circle::new(2, BTreeSet::new(), vec![2, 2]),
            Err(RelationError::SelfIntersection { index: 2 }),
        );
    }

    #[test]
    fn odd_intersection() {
        assert_eq!(
            Circle::new(0, BTreeSet::new(), vec![1, 2, 1]),
            Err(RelationError::OddIntersection { index: 0, partner: 2, count: 1 }),
        );
        assert_eq!(
            Circle::new(0, BTreeSet::new(), vec![1, 1, 1, 1]),
            Err(RelationError::OddIntersection { index: 0, partner: 1, count: 4 }),
        );
    }

    #[test]
    fn contained_and_intersected() {
        assert_eq!(
            Circle::new(0, [1], vec![1, 1]),
            Err(RelationError::ContainedAndIntersected { index: 0, partner: 1 }),
        );
    }

    #[test]
    fn rotations() {
        assert_eq!(min_rotation(&[]), Vec::<usize>::new());
        assert_eq!(min_rotation(&[2, 0, 1, 1, 0, 2]), vec![0, 1, 1, 0, 2, 2]);
        assert_eq!(min_rotation(&[1, 0, 1, 0]), vec![0, 1, 0, 1]);
        let c = circle(3, &[], &[1, 0, 0, 1]).with_min_rotation();
        assert_eq!(c.intersects(), &[0, 0, 1, 1]);
    }

    #[test]
    fn relabel_indices() {
        let c = circle(0, &[2], &[1, 1]);
        let r = c.relabel(|i| 2 - i);
        assert_eq!(r, circle(2, &[0], &[1, 1]));
    }

    #[test]
    fn display() {
        let c = circle(0, &[3, 2], &[1, 4, 1, 4]);
        assert_eq!(c.to_string(), "Circle(index=0, contains={2, 3}, intersects=(1, 4, 1, 4))");
        assert_eq!(Circle::empty(5).to_string(), "Circle(index=5, contains={}, intersects=())");
    }

    #[test]
    fn serde_roundtrip() {
        let c = circle(0, &[2], &[1, 1]);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"index":0,"contains":[2],"intersects":[1,1]}"#);
        let back: Circle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        let bad: Result<Circle, _> = serde_json::from_str(r#"{"index":0,"intersects":[0,0]}"#);
        assert!(bad.is_err());
    }
}
