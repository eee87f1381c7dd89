//! Normal toric varieties, identified with their fans.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ToricError;
use crate::fan::Fan;
use crate::lattice::{self, qvec, QVec};

/// Normal toric variety `X_Σ`. Two values are equal iff their fans are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalToricVariety {
    fan: Fan,
}

impl NormalToricVariety {
    #[inline]
    pub fn new(fan: Fan) -> Self {
        Self { fan }
    }

    /// Build from rays and maximal cones (ray-index sets); validates the input shape.
    pub fn from_rays_and_cones(
        dim: usize,
        rays: Vec<QVec>,
        cones: Vec<BTreeSet<usize>>,
    ) -> Result<Self, ToricError> {
        Ok(Self::new(Fan::new(dim, rays, cones)?))
    }

    /// `P^d`.
    pub fn projective_space(d: usize) -> Self {
        Self::new(Fan::simplex(d + 1))
    }

    /// `A^d`: one maximal cone spanned by the standard basis.
    pub fn affine_space(d: usize) -> Self {
        let rays = (0..d).map(|i| lattice::unit(d, i)).collect();
        Self::new(Fan::from_parts(d, rays, vec![(0..d).collect()]))
    }

    /// Hirzebruch surface `F_r`: rays `(1,0), (0,1), (-1,r), (0,-1)`.
    pub fn hirzebruch(r: i64) -> Self {
        let rays = vec![qvec(&[1, 0]), qvec(&[0, 1]), qvec(&[-1, r]), qvec(&[0, -1])];
        let cones = [[0, 1], [1, 2], [2, 3], [3, 0]]
            .iter()
            .map(|c| c.iter().copied().collect())
            .collect();
        Self::new(Fan::from_parts(2, rays, cones))
    }

    /// `self × other`.
    pub fn product(&self, other: &Self) -> Result<Self, ToricError> {
        Ok(Self::new(self.fan.product(&other.fan)?))
    }

    #[inline]
    pub fn fan(&self) -> &Fan {
        &self.fan
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.fan.dim()
    }

    #[inline]
    pub fn n_rays(&self) -> usize {
        self.fan.n_rays()
    }

    #[inline]
    pub fn n_maximal_cones(&self) -> usize {
        self.fan.n_maximal_cones()
    }

    pub fn is_smooth(&self) -> bool {
        self.fan.is_smooth()
    }

    pub fn is_simplicial(&self) -> bool {
        self.fan.is_simplicial()
    }
}

impl fmt::Display for NormalToricVariety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "normal toric variety of dimension {} ({} rays, {} maximal cones)",
            self.dim(),
            self.n_rays(),
            self.n_maximal_cones()
        )?;
        for (i, r) in self.fan.rays().iter().enumerate() {
            writeln!(f, "  ray {i}: {}", lattice::fmt_qvec(r))?;
        }
        for (c, cone) in self.fan.maximal_cones().iter().enumerate() {
            writeln!(f, "  cone {c}: {cone:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_constructors() {
        let p2 = NormalToricVariety::projective_space(2);
        assert_eq!((p2.dim(), p2.n_rays(), p2.n_maximal_cones()), (2, 3, 3));
        assert!(p2.is_smooth());

        let a3 = NormalToricVariety::affine_space(3);
        assert_eq!((a3.dim(), a3.n_rays(), a3.n_maximal_cones()), (3, 3, 1));

        let f2 = NormalToricVariety::hirzebruch(2);
        assert_eq!(f2.fan().ray(2), &qvec(&[-1, 2]));
        assert!(f2.is_smooth());
    }

    #[test]
    fn product_and_equality() {
        let p1 = NormalToricVariety::projective_space(1);
        let p1p1 = p1.product(&p1).unwrap();
        assert_eq!(p1p1.dim(), 2);
        assert_eq!(p1p1.n_maximal_cones(), 4);
        assert!(p1p1.fan().same_up_to_relabeling(NormalToricVariety::hirzebruch(0).fan()));
        assert_ne!(p1p1, NormalToricVariety::hirzebruch(0));
        assert_eq!(p1, NormalToricVariety::projective_space(1));
    }

    #[test]
    fn display_lists_rays_and_cones() {
        let s = NormalToricVariety::projective_space(1).to_string();
        assert!(s.starts_with("normal toric variety of dimension 1 (2 rays, 2 maximal cones)"));
        assert!(s.contains("ray 1: [-1]"));
        assert!(s.contains("cone 0: {1}"));
    }
}
