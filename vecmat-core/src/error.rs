use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinalgError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinalgError {
    #[error("dimension mismatch in {op}: {left} vs {right}")]
    DimensionMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },

    #[error("index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },

    #[error("cell ({row}, {col}) out of range for {dimension}x{dimension} matrix")]
    CellOutOfRange {
        row: usize,
        col: usize,
        dimension: usize,
    },

    /// Dimension whose buffer cannot be allocated.
    #[error("invalid dimension {dimension}")]
    InvalidDimension { dimension: usize },

    #[error("row {row} has {len} elements, expected {dimension}")]
    RaggedRow {
        row: usize,
        len: usize,
        dimension: usize,
    },
}

impl LinalgError {
    pub(crate) fn check_dims(op: &'static str, left: usize, right: usize) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { op, left, right })
        }
    }
}

/// Unwraps for the operator and `Index` impls, which cannot return a `Result`.
pub(crate) fn or_panic<T>(res: Result<T>) -> T {
    res.unwrap_or_else(|err| panic!("{err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_dims_accepts_equal() {
        assert_eq!(LinalgError::check_dims("add", 3, 3), Ok(()));
    }

    #[test]
    fn check_dims_reports_both_sides() {
        let err = LinalgError::check_dims("dot", 2, 5).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch { op: "dot", left: 2, right: 5 }
        );
        assert_eq!(err.to_string(), "dimension mismatch in dot: 2 vs 5");
    }
}
