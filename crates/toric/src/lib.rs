//! Toric varieties and projective bundles over them.
//!
//! Overview
//! - `lattice`: exact rational vectors and Gaussian elimination.
//! - `cone`, `fan`: rational polyhedral cones, their polars, and fans.
//! - `variety`, `divisor`: normal toric varieties, torus-invariant divisors and
//!   line bundles given by class-group coordinates.
//! - `bundle`: `P(D_1 ⊕ … ⊕ D_n)` as a new normal toric variety.
//!
//! API Policy
//! - Project-internal crate; the CLI is the only consumer. Breaking changes are
//!   fine when they simplify the code.

pub mod api;
pub mod bundle;
pub mod cone;
pub mod divisor;
pub mod error;
pub mod fan;
pub mod lattice;
pub mod variety;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use bundle::{projectivization, projectivization_with, BundleCfg};
pub use divisor::{BundleSummand, ToricDivisor, ToricLineBundle};
pub use error::ToricError;
pub use variety::NormalToricVariety;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bundle::{projectivization, projectivization_with, BundleCfg};
    pub use crate::cone::{Cone, PolarCone};
    pub use crate::divisor::{BundleSummand, ToricDivisor, ToricLineBundle};
    pub use crate::error::ToricError;
    pub use crate::fan::{Fan, FanError};
    pub use crate::lattice::{qvec, QVec};
    pub use crate::variety::NormalToricVariety;
}
