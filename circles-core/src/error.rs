/// Violation of a [`Circle`](crate::circle::Circle) invariant, raised at construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("Circle {index} cannot contain itself")]
    SelfContainment { index: usize },

    #[error("Circle {index} cannot intersect itself")]
    SelfIntersection { index: usize },

    #[error("Circle {index} crosses {partner} {count} times; expected exactly 2")]
    OddIntersection { index: usize, partner: usize, count: usize },

    #[error("Circle {index} both contains and intersects {partner}")]
    ContainedAndIntersected { index: usize, partner: usize },

    #[error("Index {index} appears more than once in an arrangement")]
    DuplicateIndex { index: usize },

    #[error("Circle {index} refers to {partner}, which is not in the arrangement")]
    UnknownIndex { index: usize, partner: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CirclesError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Resource limit exceeded: {what} would reach {requested}, limit is {limit}")]
    ResourceExceeded {
        what: &'static str,
        limit: usize,
        requested: usize,
    },

    #[error(transparent)]
    Relation(#[from] RelationError),
}

pub type Result<T> = std::result::Result<T, CirclesError>;
