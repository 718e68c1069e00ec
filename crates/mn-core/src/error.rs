use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Numeric degeneracy in {what}: |denominator|^2 = {magnitude_sq:e}")]
    NumericDegeneracy {
        what: &'static str,
        magnitude_sq: f64,
    },
}
