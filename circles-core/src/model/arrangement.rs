use std::{collections::{BTreeMap, BTreeSet}, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{circle::Circle, error::RelationError};

/// Distinct canonical arrangements, in ascending (lexicographic) order.
pub type Arrangements = BTreeSet<Arrangement>;

/// One full configuration: a [`Circle`] profile per index, sorted by index.
///
/// Every index mentioned in a profile's `contains` or `intersects` belongs to some circle of the
/// arrangement.
#[derive(
    Clone, Debug, derive_more::Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Vec<Circle>", into = "Vec<Circle>")]
pub struct Arrangement(Vec<Circle>);

impl Arrangement {
    pub fn new(circles: Vec<Circle>) -> Result<Self, RelationError> {
        let mut seen: BTreeSet<usize> = BTreeSet::new();
        for circle in &circles {
            if !seen.insert(circle.index()) {
                return Err(RelationError::DuplicateIndex { index: circle.index() });
            }
        }
        for circle in &circles {
            if let Some(&partner) = circle
                .contains()
                .iter()
                .chain(circle.intersects())
                .find(|partner| !seen.contains(*partner))
            {
                return Err(RelationError::UnknownIndex { index: circle.index(), partner });
            }
        }
        Ok(Self::from_circles(circles))
    }

    /// Assemble circles already known to satisfy the arrangement invariants.
    pub(crate) fn from_circles(mut circles: Vec<Circle>) -> Self {
        circles.sort_by_key(|circle| circle.index());
        Arrangement(circles)
    }

    pub fn circles(&self) -> &[Circle] {
        &self.0
    }

    pub fn circle(&self, index: usize) -> Option<&Circle> {
        self.0
            .binary_search_by_key(&index, |circle| circle.index())
            .ok()
            .map(|idx| &self.0[idx])
    }

    pub fn indices(&self) -> BTreeSet<usize> {
        self.0.iter().map(|circle| circle.index()).collect()
    }

    /// Apply a bijection of indices to every circle, normalizing each crossing sequence to its
    /// smallest rotation.
    ///
    /// `labels` must map every index of the arrangement.
    pub(crate) fn relabel(&self, labels: &BTreeMap<usize, usize>) -> Arrangement {
        let circles = self
            .0
            .iter()
            .map(|circle| circle.relabel(|idx| labels[&idx]).with_min_rotation())
            .collect();
        Arrangement::from_circles(circles)
    }

    /// Apply an arbitrary permutation `perm` (`idx` → `perm[idx]`) of `0..len`, keeping crossing
    /// sequences as-is.
    pub fn permute(&self, perm: &[usize]) -> Result<Arrangement, RelationError> {
        let circles = self
            .0
            .iter()
            .map(|circle| {
                let index = |idx: usize| {
                    perm.get(idx)
                        .copied()
                        .ok_or(RelationError::UnknownIndex { index: circle.index(), partner: idx })
                };
                let contains = circle.contains().iter().map(|&idx| index(idx));
                let intersects = circle.intersects().iter().map(|&idx| index(idx));
                Circle::new(
                    index(circle.index())?,
                    contains.collect::<Result<Vec<_>, _>>()?,
                    intersects.collect::<Result<Vec<_>, _>>()?,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Arrangement::new(circles)
    }
}

impl TryFrom<Vec<Circle>> for Arrangement {
    type Error = RelationError;
    fn try_from(circles: Vec<Circle>) -> Result<Self, Self::Error> {
        Arrangement::new(circles)
    }
}

impl From<Arrangement> for Vec<Circle> {
    fn from(arrangement: Arrangement) -> Self {
        arrangement.0
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}
