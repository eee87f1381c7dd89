//! Fans: rays plus maximal-cone incidence.
//!
//! Purpose
//! - Validated container for a fan given as `(rays, maximal cones)`, where a
//!   maximal cone is a set of ray indices.
//! - Host the one combinatorial construction shared by products and projective
//!   bundles: gluing a base fan with a fibre fan (`glue`).
//!
//! Assumptions and conventions
//! - Rays are stored as primitive integer generators; `Fan::new` normalizes.
//! - Maximal cones are `BTreeSet<usize>`, so iteration over a cone's rays is in
//!   increasing index order. Emission order of cones is preserved.
//! - The fan axiom (cones meet along common faces) is NOT checked.
//!
//! Code cross-refs: `crate::cone::Cone`, `crate::variety::NormalToricVariety`.

use std::collections::{BTreeMap, BTreeSet};

use crate::cone::Cone;
use crate::lattice::{self, QVec, RayKey};

/// Errors surfaced by fan validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FanError {
    #[error("fan has no maximal cones")]
    NoCones,
    #[error("ray {ray} has length {got}, expected {expected}")]
    DimensionMismatch {
        ray: usize,
        expected: usize,
        got: usize,
    },
    #[error("ray {ray} is zero")]
    ZeroRay { ray: usize },
    #[error("ray {ray} duplicates ray {first}")]
    DuplicateRay { ray: usize, first: usize },
    #[error("maximal cone {cone} references ray {index}, but there are {n_rays} rays")]
    IndexOutOfRange {
        cone: usize,
        index: usize,
        n_rays: usize,
    },
    #[error("ray {ray} lies in no maximal cone")]
    UnusedRay { ray: usize },
    #[error("incidence row {row} has {got} columns, expected {expected}")]
    IncidenceWidth {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// Fan in `Q^dim`.
///
/// Invariants (enforced by `new`):
/// - rays are primitive, pairwise distinct, of length `dim`;
/// - every ray lies in some maximal cone; at least one maximal cone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fan {
    dim: usize,
    rays: Vec<QVec>,
    cones: Vec<BTreeSet<usize>>,
    index: BTreeMap<RayKey, usize>,
}

impl Fan {
    /// Validate and build. Rays are replaced by their primitive generators.
    pub fn new(
        dim: usize,
        rays: Vec<QVec>,
        cones: Vec<BTreeSet<usize>>,
    ) -> Result<Self, FanError> {
        if cones.is_empty() {
            return Err(FanError::NoCones);
        }
        let mut prim = Vec::with_capacity(rays.len());
        let mut index = BTreeMap::new();
        for (i, r) in rays.iter().enumerate() {
            if r.len() != dim {
                return Err(FanError::DimensionMismatch {
                    ray: i,
                    expected: dim,
                    got: r.len(),
                });
            }
            let p = lattice::primitive(r).ok_or(FanError::ZeroRay { ray: i })?;
            if let Some(&first) = index.get(&lattice::key(&p)) {
                return Err(FanError::DuplicateRay { ray: i, first });
            }
            index.insert(lattice::key(&p), i);
            prim.push(p);
        }
        let mut used = vec![false; prim.len()];
        for (c, cone) in cones.iter().enumerate() {
            for &i in cone {
                if i >= prim.len() {
                    return Err(FanError::IndexOutOfRange {
                        cone: c,
                        index: i,
                        n_rays: prim.len(),
                    });
                }
                used[i] = true;
            }
        }
        if let Some(ray) = used.iter().position(|u| !u) {
            return Err(FanError::UnusedRay { ray });
        }
        Ok(Self {
            dim,
            rays: prim,
            cones,
            index,
        })
    }

    /// Build from a boolean incidence matrix (rows = maximal cones, columns = rays).
    pub fn from_incidence(
        dim: usize,
        rays: Vec<QVec>,
        incidence: &[Vec<bool>],
    ) -> Result<Self, FanError> {
        let mut cones = Vec::with_capacity(incidence.len());
        for (row, flags) in incidence.iter().enumerate() {
            if flags.len() != rays.len() {
                return Err(FanError::IncidenceWidth {
                    row,
                    expected: rays.len(),
                    got: flags.len(),
                });
            }
            cones.push(flags.iter().enumerate().filter(|(_, f)| **f).map(|(i, _)| i).collect());
        }
        Self::new(dim, rays, cones)
    }

    /// Normal fan of the standard `(n-1)`-simplex, i.e. the fan of `P^{n-1}`.
    ///
    /// Rays `e_1..e_{n-1}, -(e_1+…+e_{n-1})`; cone `b` omits ray `b`.
    /// `n <= 1` gives the fan of a point.
    pub fn simplex(n: usize) -> Self {
        let d = n.saturating_sub(1);
        if d == 0 {
            return Self::from_parts(0, Vec::new(), vec![BTreeSet::new()]);
        }
        let mut rays: Vec<QVec> = (0..d).map(|i| lattice::unit(d, i)).collect();
        rays.push(lattice::neg(&QVec::from_element(d, lattice::int(1))));
        let cones = (0..n).map(|b| (0..n).filter(|&i| i != b).collect()).collect();
        Self::from_parts(d, rays, cones)
    }

    /// Skip validation; callers guarantee the `new` invariants.
    pub(crate) fn from_parts(dim: usize, rays: Vec<QVec>, cones: Vec<BTreeSet<usize>>) -> Self {
        let index = rays
            .iter()
            .enumerate()
            .map(|(i, r)| (lattice::key(r), i))
            .collect();
        Self {
            dim,
            rays,
            cones,
            index,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn rays(&self) -> &[QVec] {
        &self.rays
    }

    #[inline]
    pub fn ray(&self, i: usize) -> &QVec {
        &self.rays[i]
    }

    #[inline]
    pub fn n_rays(&self) -> usize {
        self.rays.len()
    }

    #[inline]
    pub fn maximal_cones(&self) -> &[BTreeSet<usize>] {
        &self.cones
    }

    #[inline]
    pub fn n_maximal_cones(&self) -> usize {
        self.cones.len()
    }

    /// Maximal cone `c` as a [`Cone`] (rays in increasing index order).
    pub fn cone(&self, c: usize) -> Cone {
        Cone::new(
            self.dim,
            self.cones[c].iter().map(|&i| self.rays[i].clone()).collect(),
        )
    }

    /// Index of `ray` by exact coordinate equality.
    pub fn ray_index(&self, ray: &QVec) -> Option<usize> {
        self.index.get(&lattice::key(ray)).copied()
    }

    /// Maximal cones containing ray `i`, in emission order.
    pub fn cones_containing(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.cones
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.contains(&i))
            .map(|(c, _)| c)
    }

    /// Rows = maximal cones, columns = rays.
    pub fn incidence(&self) -> Vec<Vec<bool>> {
        self.cones
            .iter()
            .map(|c| (0..self.rays.len()).map(|i| c.contains(&i)).collect())
            .collect()
    }

    pub fn is_simplicial(&self) -> bool {
        (0..self.cones.len()).all(|c| self.cone(c).is_simplicial())
    }

    pub fn is_smooth(&self) -> bool {
        (0..self.cones.len()).all(|c| self.cone(c).is_smooth())
    }

    /// Product fan `self × other`.
    pub fn product(&self, other: &Fan) -> Result<Fan, FanError> {
        let pad = lattice::zero(other.dim);
        self.glue(other, |_, ray| lattice::concat(ray, &pad))
    }

    /// Glue `self` (base) with `fibre`.
    ///
    /// Rays: `lift(i, ρ_i)` for each base ray (must have length
    /// `self.dim + fibre.dim`), then `(0, l)` for each fibre ray `l`.
    /// Cones: `a ∪ (b + n_rays)` for every base cone `a` and fibre cone `b`,
    /// base-major.
    pub fn glue<F>(&self, fibre: &Fan, mut lift: F) -> Result<Fan, FanError>
    where
        F: FnMut(usize, &QVec) -> QVec,
    {
        let shift = self.rays.len();
        let base_zero = lattice::zero(self.dim);
        let mut rays: Vec<QVec> = self
            .rays
            .iter()
            .enumerate()
            .map(|(i, r)| lift(i, r))
            .collect();
        rays.extend(fibre.rays.iter().map(|l| lattice::concat(&base_zero, l)));
        let mut cones = Vec::with_capacity(self.cones.len() * fibre.cones.len());
        for a in &self.cones {
            for b in &fibre.cones {
                let mut c = a.clone();
                c.extend(b.iter().map(|&j| j + shift));
                cones.push(c);
            }
        }
        Fan::new(self.dim + fibre.dim, rays, cones)
    }

    /// Same rays and same maximal cones after matching rays by coordinates.
    pub fn same_up_to_relabeling(&self, other: &Fan) -> bool {
        if self.dim != other.dim
            || self.rays.len() != other.rays.len()
            || self.cones.len() != other.cones.len()
        {
            return false;
        }
        let mut relabel = Vec::with_capacity(self.rays.len());
        for r in &self.rays {
            match other.ray_index(r) {
                Some(j) => relabel.push(j),
                None => return false,
            }
        }
        let mine: BTreeSet<BTreeSet<usize>> = self
            .cones
            .iter()
            .map(|c| c.iter().map(|&i| relabel[i]).collect())
            .collect();
        let theirs: BTreeSet<BTreeSet<usize>> = other.cones.iter().cloned().collect();
        mine == theirs
    }
}
