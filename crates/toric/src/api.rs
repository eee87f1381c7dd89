//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface for the CLI, benches and demos;
//!   breaking changes are allowed.

// Exact lattice arithmetic
pub use crate::lattice::{
    clear_denominators, combinations, determinant, fmt_qvec, int, integer_dual, nullspace,
    primitive, qvec, rank, solve, QVec, RayKey,
};
// Cones and fans
pub use crate::cone::{Cone, PolarCone};
pub use crate::fan::{Fan, FanError};
// Varieties, divisors, line bundles
pub use crate::divisor::{BundleSummand, ToricDivisor, ToricLineBundle};
pub use crate::variety::NormalToricVariety;
// Projectivization
pub use crate::bundle::{cartier_data, projectivization, projectivization_with, BundleCfg};
pub use crate::error::ToricError;
