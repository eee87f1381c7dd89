//! Error type shared by varieties, divisors and the bundle construction.

use crate::fan::FanError;

/// Errors surfaced by the library. Ray coordinates are pre-formatted as `[a, b]`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ToricError {
    /// No summands were given.
    #[error("invalid argument: empty direct sum")]
    EmptyInput,
    /// Summands live on different base varieties.
    #[error("invalid argument: summands defined on different varieties")]
    InconsistentBase,
    #[error(transparent)]
    Fan(#[from] FanError),
    /// A cone ray is not a ray of the divisor's variety.
    #[error("ray {ray} is not a ray of the divisor's variety")]
    UnknownRay { ray: String },
    /// No polar ray pairs nonzero with this cone ray.
    #[error("no polar ray pairs nonzero with ray {ray}")]
    NoDualRay { ray: String },
    #[error("divisor needs {expected} coefficients (one per ray), got {got}")]
    CoefficientCount { expected: usize, got: usize },
    #[error("class vector has {got} entries, class group has rank {expected}")]
    ClassRank { expected: usize, got: usize },
    #[error("variety has no full-dimensional smooth maximal cone")]
    NoSmoothMaximalCone,
    #[error("divisor class is not integral")]
    NonIntegralClass,
    /// The fibre coordinate of a ray differs between two maximal cones.
    #[error("lift of ray {ray} for summand {summand} depends on the maximal cone")]
    ConeDependentLift { ray: String, summand: usize },
}
