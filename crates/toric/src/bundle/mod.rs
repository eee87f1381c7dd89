//! Projectivization `P(D_1 ⊕ … ⊕ D_n)` of a direct sum of toric line bundles.
//!
//! Purpose
//! - Build the fan of the projective bundle from the base fan `Σ_X`, the fan of
//!   `P^{n-1}` (`Fan::simplex(n)`) and one Cartier datum per (maximal cone,
//!   summand).
//!
//! Construction
//! - `cartier_data(σ, σ°, D) = -Σ_{ρ ∈ σ} a_ρ(D) · d(ρ)`, where `d(ρ)` is the
//!   lattice dual of `ρ`: zero on the other rays, negative on `ρ`, primitive in
//!   `M / σ^⊥`. Non-simplicial cones fall back to the polar ray from
//!   `PolarCone::dual_ray`, cleared of denominators.
//! - Each base ray is lifted once, via the first maximal cone containing it:
//!   `(ρ, -Σ_i ⟨m_σ(D_i), ρ⟩ · l_i)` with `l_i` the rays of `P^{n-1}`.
//! - Fibre rays `(0, l_i)` and cones `a ∪ (b + R)` come from `Fan::glue`.
//!
//! Assumptions and conventions
//! - The pairing `⟨m_σ(D), ρ⟩` is independent of the maximal cone `σ ∋ ρ` for
//!   smooth base fans, pure or not (it equals `a_ρ(D)`). Singular fans may violate this;
//!   `BundleCfg::verify_cone_independence` detects it.
//! - Output: `dim X + n - 1` dimensions, `R + n` rays, `M · n` maximal cones.
//!
//! Code cross-refs: `crate::cone::PolarCone::dual_ray`, `crate::fan::Fan::glue`.

use std::sync::Arc;

use num_rational::BigRational;
use num_traits::Zero;

use crate::cone::{Cone, PolarCone};
use crate::divisor::{same_variety, BundleSummand, ToricDivisor};
use crate::error::ToricError;
use crate::fan::Fan;
use crate::lattice::{self, QVec};
use crate::variety::NormalToricVariety;

/// Options for the projectivization engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundleCfg {
    /// Recompute every ray's pairing in every maximal cone containing it and
    /// fail on the first disagreement instead of trusting the first cone.
    pub verify_cone_independence: bool,
}

/// `m_σ` for maximal cone `cone` with polar `polar` and divisor `divisor`.
pub fn cartier_data(
    cone: &Cone,
    polar: &PolarCone,
    divisor: &ToricDivisor,
) -> Result<QVec, ToricError> {
    let simplicial = cone.is_simplicial();
    let mut m = lattice::zero(cone.ambient_dim());
    for (i, ray) in cone.rays().iter().enumerate() {
        let d = dual_generator(cone, polar, i, simplicial).ok_or_else(|| ToricError::NoDualRay {
            ray: lattice::fmt_qvec(ray),
        })?;
        let a = divisor
            .coefficient(ray)
            .ok_or_else(|| ToricError::UnknownRay {
                ray: lattice::fmt_qvec(ray),
            })?;
        add_scaled_neg(&mut m, a, &d);
    }
    Ok(m)
}

/// Dual of ray `i` used for the Cartier datum.
///
/// Simplicial cones: the integral generator of `(τ_i^⊥ ∩ M) / (σ^⊥ ∩ M)`,
/// with `τ_i` the facet opposite ray `i`. Inside `span(σ)` a primitive facet
/// normal can be a multiple of it when `σ` is not full-dimensional.
/// Otherwise: the polar ray from `PolarCone::dual_ray`, cleared of denominators.
fn dual_generator(cone: &Cone, polar: &PolarCone, i: usize, simplicial: bool) -> Option<QVec> {
    let rays = cone.rays();
    if simplicial {
        let others: Vec<QVec> = rays
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, r)| r.clone())
            .collect();
        return lattice::integer_dual(&others, &rays[i]);
    }
    polar
        .dual_ray(i, rays.len())
        .map(lattice::clear_denominators)
}

#[inline]
fn add_scaled_neg(acc: &mut QVec, a: &BigRational, v: &QVec) {
    if !a.is_zero() {
        lattice::add_scaled(acc, &-a, v);
    }
}

/// `P(D_1 ⊕ … ⊕ D_n)` with default options.
pub fn projectivization<S: BundleSummand>(
    summands: &[S],
) -> Result<NormalToricVariety, ToricError> {
    projectivization_with(summands, BundleCfg::default())
}

/// `P(D_1 ⊕ … ⊕ D_n)`.
///
/// - no summands: `EmptyInput`;
/// - one summand: its base variety, unchanged;
/// - summands on different bases: `InconsistentBase`.
pub fn projectivization_with<S: BundleSummand>(
    summands: &[S],
    cfg: BundleCfg,
) -> Result<NormalToricVariety, ToricError> {
    let first = summands.first().ok_or(ToricError::EmptyInput)?;
    let base: &Arc<NormalToricVariety> = first.base();
    if summands.len() == 1 {
        return Ok(base.as_ref().clone());
    }
    if !summands.iter().all(|s| same_variety(s.base(), base)) {
        return Err(ToricError::InconsistentBase);
    }
    let divisors = summands
        .iter()
        .map(|s| s.to_divisor())
        .collect::<Result<Vec<_>, _>>()?;

    let n = divisors.len();
    let fan = base.fan();
    tracing::debug!(
        dim = fan.dim(),
        rays = fan.n_rays(),
        cones = fan.n_maximal_cones(),
        summands = n,
        verify = cfg.verify_cone_independence,
        "projectivization"
    );

    let simplex = Fan::simplex(n);
    let pairings = ray_pairings(fan, &divisors, cfg)?;
    let fibre: Vec<QVec> = pairings
        .iter()
        .map(|p| fibre_coordinate(&simplex, p))
        .collect();
    let glued = fan.glue(&simplex, |i, ray| lattice::concat(ray, &fibre[i]))?;

    tracing::debug!(
        dim = glued.dim(),
        rays = glued.n_rays(),
        cones = glued.n_maximal_cones(),
        "projectivization done"
    );
    Ok(NormalToricVariety::new(glued))
}

/// `-Σ_i p_i · l_i` in the lattice of `P^{n-1}`.
fn fibre_coordinate(simplex: &Fan, pairings: &[BigRational]) -> QVec {
    let mut v = lattice::zero(simplex.dim());
    for (p, l) in pairings.iter().zip(simplex.rays()) {
        add_scaled_neg(&mut v, p, l);
    }
    v
}

/// `⟨m_σ(D_i), ρ⟩` for every base ray `ρ` and summand `i`, one cone per ray.
fn ray_pairings(
    fan: &Fan,
    divisors: &[ToricDivisor],
    cfg: BundleCfg,
) -> Result<Vec<Vec<BigRational>>, ToricError> {
    let mut cache: Vec<Option<Vec<BigRational>>> = vec![None; fan.n_rays()];
    let mut covered = 0;
    for (c, members) in fan.maximal_cones().iter().enumerate() {
        if covered == fan.n_rays() && !cfg.verify_cone_independence {
            break;
        }
        let cone = fan.cone(c);
        let polar = cone.polar();
        let ms = divisors
            .iter()
            .map(|d| cartier_data(&cone, &polar, d))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::trace!(cone = c, rays = members.len(), "cartier data");
        for &r in members {
            if cache[r].is_some() && !cfg.verify_cone_independence {
                continue;
            }
            let ray = fan.ray(r);
            let values: Vec<BigRational> = ms.iter().map(|m| m.dot(ray)).collect();
            match &cache[r] {
                None => {
                    cache[r] = Some(values);
                    covered += 1;
                }
                Some(prev) => {
                    if let Some(summand) = (0..values.len()).find(|&i| prev[i] != values[i]) {
                        return Err(ToricError::ConeDependentLift {
                            ray: lattice::fmt_qvec(ray),
                            summand,
                        });
                    }
                }
            }
        }
    }
    // the fan invariant puts every ray in some maximal cone
    Ok(cache.into_iter().map(Option::unwrap_or_default).collect())
}
