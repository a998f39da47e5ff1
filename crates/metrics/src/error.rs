//! Error types for the aeolus-metrics crate.

/// Error type for all fallible operations in the aeolus-metrics crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// Returned when a ratio in a metric would divide by zero.
    #[error("division by zero: {denominator} is 0")]
    DivisionByZero {
        /// Name of the vanishing quantity.
        denominator: String,
    },

    /// Returned when a metric has no meaningful value for its input.
    #[error("{metric} is undefined: {reason}")]
    UndefinedMetric {
        /// Metric name.
        metric: String,
        /// Why the value is undefined.
        reason: String,
    },

    /// Returned when a correlation cannot be computed (too few rows or
    /// constant input).
    #[error("correlation undefined over {rows} complete row(s)")]
    Undefined {
        /// Number of complete rows available.
        rows: usize,
    },

    /// Returned when two per-point inputs differ in length.
    #[error("length mismatch: reference has {reference} points, candidate has {candidate}")]
    LengthMismatch {
        /// Reference length.
        reference: usize,
        /// Candidate length.
        candidate: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_division_by_zero() {
        let e = MetricError::DivisionByZero {
            denominator: "reference mean".to_string(),
        };
        assert_eq!(e.to_string(), "division by zero: reference mean is 0");
    }

    #[test]
    fn display_undefined_metric() {
        let e = MetricError::UndefinedMetric {
            metric: "DAV".to_string(),
            reason: "low-resolution skill score is 0".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "DAV is undefined: low-resolution skill score is 0"
        );
    }

    #[test]
    fn display_undefined() {
        let e = MetricError::Undefined { rows: 2 };
        assert_eq!(e.to_string(), "correlation undefined over 2 complete row(s)");
    }

    #[test]
    fn display_length_mismatch() {
        let e = MetricError::LengthMismatch {
            reference: 3,
            candidate: 4,
        };
        assert!(e.to_string().contains("reference has 3 points"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetricError>();
    }
}
