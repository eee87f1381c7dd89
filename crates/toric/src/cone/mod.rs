//! Rational polyhedral cones and their polar cones.
//!
//! Purpose
//! - Give the projectivization engine the one dual computation it needs: for a
//!   cone `σ` with rays `ρ_1..ρ_k`, the polar `σ° = {y : ⟨y,x⟩ ≤ 0 ∀x ∈ σ}` as a
//!   ray list, each ray tagged with the cone rays it vanishes on.
//!
//! Algorithm (explicit enumeration)
//! - Let `r = rank(σ)` and `L` a basis of `span(σ)^⊥`.
//! - For every `(r-1)`-subset of rays of rank `r-1`, the normals orthogonal to
//!   the subset and to `L` form a line. Orient it so all rays pair `≤ 0`; drop it
//!   when rays pair with both signs. Dedup by primitive generator.
//! - Append `±` each basis vector of `L` (the lineality space of `σ°`).
//!
//! Complexity: O(C(k, r-1)) eliminations. Fine for the small cones of fans.
//!
//! Code cross-refs: `crate::lattice::{nullspace, rank, combinations}`.

use std::collections::{BTreeMap, BTreeSet};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::lattice::{self, combinations, determinant, nullspace, rank, QVec, RayKey};

/// Cone spanned by `rays` in `Q^dim`.
///
/// Invariants:
/// - every ray has length `dim`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cone {
    dim: usize,
    rays: Vec<QVec>,
}

impl Cone {
    pub fn new(dim: usize, rays: Vec<QVec>) -> Self {
        debug_assert!(rays.iter().all(|r| r.len() == dim));
        Self { dim, rays }
    }

    #[inline]
    pub fn ambient_dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn rays(&self) -> &[QVec] {
        &self.rays
    }

    /// Dimension of the linear span.
    pub fn rank(&self) -> usize {
        rank(&self.rays)
    }

    pub fn is_full_dimensional(&self) -> bool {
        self.rank() == self.dim
    }

    /// Rays are linearly independent.
    pub fn is_simplicial(&self) -> bool {
        self.rank() == self.rays.len()
    }

    /// Rays extend to a lattice basis: simplicial, and the gcd of the maximal
    /// minors of the ray matrix is 1. Rays are expected to be integral.
    pub fn is_smooth(&self) -> bool {
        if !self.is_simplicial() {
            return false;
        }
        let k = self.rays.len();
        let mut g = BigInt::zero();
        for cols in combinations(self.dim, k) {
            let minor: Vec<QVec> = self
                .rays
                .iter()
                .map(|r| QVec::from_iterator(k, cols.iter().map(|&c| r[c].clone())))
                .collect();
            let det = determinant(&minor);
            if !det.is_integer() {
                return false;
            }
            g = g.gcd(det.numer());
            if g.is_one() {
                return true;
            }
        }
        // k == 0 (the zero cone) is trivially smooth
        k == 0
    }

    /// `|det|` of the ray matrix when the cone is full-dimensional and simplicial.
    pub fn multiplicity(&self) -> Option<BigInt> {
        if self.rays.len() != self.dim || !self.is_full_dimensional() {
            return None;
        }
        let det = determinant(&self.rays);
        det.is_integer().then(|| det.numer().abs())
    }

    /// Polar cone `σ°` with per-ray vanishing sets.
    pub fn polar(&self) -> PolarCone {
        let lineality = nullspace(&self.rays, self.dim);
        let r = self.dim - lineality.len();
        let mut rays = Vec::new();
        let mut vanishing = Vec::new();
        let mut seen: BTreeMap<RayKey, usize> = BTreeMap::new();

        if r > 0 {
            for subset in combinations(self.rays.len(), r - 1) {
                let mut rows: Vec<QVec> = subset.iter().map(|&i| self.rays[i].clone()).collect();
                if rank(&rows) != r - 1 {
                    continue;
                }
                rows.extend(lineality.iter().cloned());
                let normals = nullspace(&rows, self.dim);
                if normals.len() != 1 {
                    continue;
                }
                let Some(n) = orient_nonpositive(&normals[0], &self.rays) else {
                    // rays on both sides: not a facet
                    continue;
                };
                let Some(n) = lattice::primitive(&n) else {
                    continue;
                };
                if seen.contains_key(&lattice::key(&n)) {
                    continue;
                }
                let zeros: BTreeSet<usize> = (0..self.rays.len())
                    .filter(|&j| self.rays[j].dot(&n).is_zero())
                    .collect();
                seen.insert(lattice::key(&n), rays.len());
                rays.push(n);
                vanishing.push(zeros);
            }
        }

        let all: BTreeSet<usize> = (0..self.rays.len()).collect();
        for l in &lineality {
            if let Some(p) = lattice::primitive(l) {
                rays.push(lattice::neg(&p));
                rays.push(p);
                vanishing.push(all.clone());
                vanishing.push(all.clone());
            }
        }
        PolarCone {
            dim: self.dim,
            rays,
            vanishing,
            lineality_dim: lineality.len(),
        }
    }
}

/// Flip `n` so that every ray pairs `≤ 0` with it; `None` if rays lie on both sides.
fn orient_nonpositive(n: &QVec, rays: &[QVec]) -> Option<QVec> {
    let mut pos = false;
    let mut neg = false;
    for r in rays {
        let s = r.dot(n);
        pos |= s.is_positive();
        neg |= s.is_negative();
    }
    match (pos, neg) {
        (true, true) => None,
        (true, false) => Some(lattice::neg(n)),
        _ => Some(n.clone()),
    }
}

/// Polar cone as produced by [`Cone::polar`].
///
/// Invariants:
/// - `rays[j]` is primitive and integral; `vanishing[j]` lists the indices of
///   the original cone's rays orthogonal to it.
/// - Facet normals come first (lexicographic subset order), then `±` pairs
///   spanning the lineality space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolarCone {
    dim: usize,
    rays: Vec<QVec>,
    vanishing: Vec<BTreeSet<usize>>,
    lineality_dim: usize,
}

impl PolarCone {
    #[inline]
    pub fn ambient_dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn rays(&self) -> &[QVec] {
        &self.rays
    }

    /// Indices of the original cone's rays orthogonal to polar ray `j`.
    #[inline]
    pub fn vanishing(&self, j: usize) -> &BTreeSet<usize> {
        &self.vanishing[j]
    }

    /// Dimension of the largest linear subspace contained in the polar cone.
    #[inline]
    pub fn lineality_dim(&self) -> usize {
        self.lineality_dim
    }

    /// Polar ray dual to ray `i` of the original cone (which has `k` rays).
    ///
    /// Prefers the normal of the facet spanned by all other rays; for
    /// non-simplicial cones falls back to the first polar ray pairing nonzero
    /// with ray `i`.
    pub fn dual_ray(&self, i: usize, k: usize) -> Option<&QVec> {
        let opposite = |z: &BTreeSet<usize>| z.len() + 1 == k && !z.contains(&i);
        self.vanishing
            .iter()
            .position(opposite)
            .or_else(|| self.vanishing.iter().position(|z| !z.contains(&i)))
            .map(|j| &self.rays[j])
    }
}

#[cfg(test)]
mod tests;
