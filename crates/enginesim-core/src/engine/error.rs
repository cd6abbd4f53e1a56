//! Engine description errors
//!
//! Only the configuration boundary reports recoverable errors. Misusing an
//! engine at runtime (double initialize, querying an empty collection) is a
//! programmer error and panics instead.

use thiserror::Error;

/// Errors found while building an engine from an [`EngineConfig`](super::EngineConfig)
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Every cylinder needs exactly one connecting rod
    #[error("Engine has {pistons} pistons but {rods} connecting rods")]
    RodCountMismatch { pistons: usize, rods: usize },

    /// Heads are listed per bank (or omitted entirely)
    #[error("Engine has {banks} cylinder banks but {heads} cylinder heads")]
    HeadCountMismatch { banks: usize, heads: usize },

    /// Firing angles are listed per cylinder (or omitted entirely)
    #[error("Engine has {cylinders} cylinders but {angles} firing angles")]
    FiringOrderMismatch { cylinders: usize, angles: usize },

    /// Piston references a bank that does not exist
    #[error("Piston {piston} references cylinder bank {bank}, but only {count} exist")]
    MissingCylinderBank {
        piston: usize,
        bank: usize,
        count: usize,
    },

    /// Piston references a rod that does not exist
    #[error("Piston {piston} references connecting rod {rod}, but only {count} exist")]
    MissingConnectingRod {
        piston: usize,
        rod: usize,
        count: usize,
    },

    /// Rod references a crankshaft that does not exist
    #[error("Connecting rod {rod} references crankshaft {crankshaft}, but only {count} exist")]
    MissingCrankshaft {
        rod: usize,
        crankshaft: usize,
        count: usize,
    },

    /// Rod references a journal its crankshaft does not have
    #[error("Connecting rod {rod} references rod journal {journal}, but its crankshaft has {count}")]
    MissingRodJournal {
        rod: usize,
        journal: usize,
        count: usize,
    },

    /// A dimension that must be positive is not
    #[error("{component} {index}: {field} must be positive (got {value})")]
    InvalidDimension {
        component: &'static str,
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Result type for engine construction
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::MissingCrankshaft {
            rod: 2,
            crankshaft: 5,
            count: 1,
        };
        assert!(err.to_string().contains("crankshaft 5"));

        let err = EngineError::InvalidDimension {
            component: "Cylinder bank",
            index: 0,
            field: "bore",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Cylinder bank 0: bore must be positive (got -1)");
    }
}
