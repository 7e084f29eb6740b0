//! Generate, validate, canonicalize and deduplicate arrangements of `n` circles.

use std::collections::BTreeSet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    arrangement::Arrangements,
    canonical::canonicalize,
    error::{CirclesError, Result},
    generate::Generator,
    validate::is_valid,
};

/// Bounds on the search; both grow super-exponentially with the number of circles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Largest circle count accepted (also the recursion depth).
    pub max_circles: usize,
    /// Largest number of candidate arrangements any subproblem may generate.
    pub max_candidates: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Config {
    pub const DEFAULT_MAX_CIRCLES: usize = 4;
    pub const DEFAULT_MAX_CANDIDATES: usize = 500_000;

    pub fn new(max_circles: Option<usize>, max_candidates: Option<usize>) -> Self {
        Self {
            max_circles: max_circles.unwrap_or(Self::DEFAULT_MAX_CIRCLES),
            max_candidates: max_candidates.unwrap_or(Self::DEFAULT_MAX_CANDIDATES),
        }
    }
}

/// Distinct canonical arrangements of `num_circles` circles, with the default [`Config`].
pub fn calculate_circles(num_circles: usize) -> Result<Arrangements> {
    calculate_circles_with(num_circles, &Config::default())
}

pub fn calculate_circles_with(num_circles: usize, config: &Config) -> Result<Arrangements> {
    if num_circles == 0 {
        return Err(CirclesError::InvalidArgument(
            "number of circles must be positive".to_string(),
        ));
    }
    if num_circles > config.max_circles {
        return Err(CirclesError::ResourceExceeded {
            what: "circles",
            limit: config.max_circles,
            requested: num_circles,
        });
    }
    let others: BTreeSet<usize> = (1..num_circles).collect();
    let mut generator = Generator::new(config.max_candidates);
    let candidates = generator.solve(0, &others)?;
    info!(
        "{} circles: {} candidates ({} generated over {} subproblems)",
        num_circles,
        candidates.len(),
        generator.generated(),
        generator.memo_len(),
    );

    let valid: Vec<_> = candidates.iter().filter(|candidate| is_valid(candidate)).collect();
    info!("{} circles: {} valid candidates", num_circles, valid.len());

    let arrangements: Arrangements = valid.into_iter().map(canonicalize).collect();
    info!("{} circles: {} distinct arrangements", num_circles, arrangements.len());
    Ok(arrangements)
}
