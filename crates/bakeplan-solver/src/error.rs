use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Vertex enumeration needs exactly 2 variables, found {0}")]
    Dimension(usize),
    #[error("Non-finite coefficient in {0}")]
    NonFinite(String),
    #[error("Simplex did not converge after {iterations} pivots")]
    NumericalStall { iterations: usize },
}
