//! Enumerate the combinatorially distinct arrangements of N labeled circles in the plane.
//!
//! Each pair of circles is disjoint, nested, or crossing at two boundary points. Candidates are
//! generated broadly ([`generate`]), filtered for a consistent crossing structure ([`validate`]),
//! relabelled to a normal form ([`canonical`]) and deduplicated ([`pipeline`]).

pub mod canonical;
pub mod error;
pub mod generate;
pub mod model;
pub mod pipeline;
pub mod validate;

pub use model::arrangement;
pub use model::circle;

// Re-export key types for external use
pub use model::arrangement::{Arrangement, Arrangements};
pub use model::circle::Circle;
pub use error::{CirclesError, RelationError};
pub use pipeline::{calculate_circles, calculate_circles_with, Config};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> error::Result<log::LevelFilter> {
    match level {
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(CirclesError::InvalidArgument(format!("invalid log level: {}", level))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level(None), Ok(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("")), Ok(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("trace")), Ok(log::LevelFilter::Trace));
        assert!(parse_log_level(Some("loud")).is_err());
    }
}
