use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    #[error("Shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("Big-M must be finite and positive, got {0}")]
    InvalidBigM(f64),
    #[error("Non-finite value in {what}")]
    NonFinite { what: String },
    #[error("Column {column} is not a unit column for row {row}")]
    InvalidBasis { row: usize, column: usize },
    #[error("Negative right-hand side in canonical row {0}")]
    NegativeRhs(usize),
}

impl LpError {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, found: usize) -> Self {
        LpError::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}
