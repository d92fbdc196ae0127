//! Errors for the conversion and normalization routines.

use crate::Float;

/// Validation errors raised eagerly at the API boundary, plus numeric
/// failures propagated from the dense linear-algebra kernels.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidTimestep(Float),
    InvalidAlpha(Option<Float>),
    UnknownMethod(String),
    RadiiLength { len: usize, n: usize },
    InvalidRadii(Float),
    ShapeMismatch(&'static str),
    SisoRequired { inputs: usize, outputs: usize },
    DiscreteRequired,
    Unstable,
    Numerical(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidTimestep(v) => write!(f, "dt ({}) must be positive", v),
            Error::InvalidAlpha(Some(v)) => write!(f, "alpha ({}) must be in range [0, 1]", v),
            Error::InvalidAlpha(None) => write!(f, "alpha must be provided for the gbt method"),
            Error::UnknownMethod(s) => write!(f, "invalid method: '{}'", s),
            Error::RadiiLength { len, n } => {
                write!(f, "radii length {} must match state dimension {}", len, n)
            }
            Error::InvalidRadii(v) => {
                write!(f, "radii entries must be positive and finite (got {})", v)
            }
            Error::ShapeMismatch(s) => write!(f, "shape mismatch: {}", s),
            Error::SisoRequired { inputs, outputs } => write!(
                f,
                "expected a single-input single-output system (got {} inputs, {} outputs)",
                inputs, outputs
            ),
            Error::DiscreteRequired => write!(f, "expected a discrete-time system"),
            Error::Unstable => write!(f, "system must be asymptotically stable"),
            Error::Numerical(s) => write!(f, "numerical failure: {}", s),
        }
    }
}

impl std::error::Error for Error {}
