//! Candidate generation: every relation assignment that is structurally possible for a pivot circle
//! and the circles still to be placed.
//!
//! Generation over-produces on purpose: the relation another circle reports back about the pivot is
//! not reconciled with what the pivot reports about it. [`validate`](crate::validate) filters.

pub mod profiles;
pub mod tails;

pub use profiles::{candidate_profiles, crossing_orders};
pub use tails::{available, Generator};
