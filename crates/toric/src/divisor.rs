//! Torus-invariant divisors and line bundles.
//!
//! Purpose
//! - `ToricDivisor`: one rational coefficient per ray of the base fan, with
//!   lookup by exact ray equality.
//! - `ToricLineBundle`: a class in a fixed presentation of the class group,
//!   converted to a unique divisor representative.
//!
//! Class-group chart
//! - The first maximal cone that is full-dimensional and unimodular fixes a
//!   basis `B` of the lattice. Every divisor is linearly equivalent to exactly one
//!   divisor vanishing on `B` (subtract `div(χ^m)` with `⟨m, ρ_b⟩ = a_b`), so
//!   `Cl(X) ≅ Z^{R-d}` with coordinates = coefficients on the rays outside `B`.
//! - Cartier-ness of a class is not checked; on smooth varieties `Pic = Cl`.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::ToricError;
use crate::lattice::{self, solve, QVec};
use crate::variety::NormalToricVariety;

/// Anything that can be a summand of the direct sum being projectivized.
pub trait BundleSummand {
    /// Base variety the summand lives on.
    fn base(&self) -> &Arc<NormalToricVariety>;
    /// Divisor representative (coefficients per base ray).
    fn to_divisor(&self) -> Result<ToricDivisor, ToricError>;
}

/// `D = Σ a_ρ D_ρ` on `variety`.
///
/// Invariants:
/// - `coefficients.len() == variety.n_rays()`, in ray order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToricDivisor {
    variety: Arc<NormalToricVariety>,
    coefficients: Vec<BigRational>,
}

impl ToricDivisor {
    pub fn new(
        variety: Arc<NormalToricVariety>,
        coefficients: Vec<BigRational>,
    ) -> Result<Self, ToricError> {
        if coefficients.len() != variety.n_rays() {
            return Err(ToricError::CoefficientCount {
                expected: variety.n_rays(),
                got: coefficients.len(),
            });
        }
        Ok(Self {
            variety,
            coefficients,
        })
    }

    pub fn from_integers(
        variety: Arc<NormalToricVariety>,
        coefficients: &[i64],
    ) -> Result<Self, ToricError> {
        Self::new(variety, coefficients.iter().map(|&c| lattice::int(c)).collect())
    }

    /// The zero divisor (trivial line bundle).
    pub fn trivial(variety: Arc<NormalToricVariety>) -> Self {
        let coefficients = vec![BigRational::zero(); variety.n_rays()];
        Self {
            variety,
            coefficients,
        }
    }

    /// Prime divisor `D_ρ` of ray `ray`; `None` if out of range.
    pub fn prime(variety: Arc<NormalToricVariety>, ray: usize) -> Option<Self> {
        if ray >= variety.n_rays() {
            return None;
        }
        let mut d = Self::trivial(variety);
        d.coefficients[ray] = lattice::int(1);
        Some(d)
    }

    #[inline]
    pub fn variety(&self) -> &Arc<NormalToricVariety> {
        &self.variety
    }

    #[inline]
    pub fn coefficients(&self) -> &[BigRational] {
        &self.coefficients
    }

    #[inline]
    pub fn coefficient_at(&self, i: usize) -> &BigRational {
        &self.coefficients[i]
    }

    /// Coefficient on `ray`, matched by exact coordinates against the fan.
    pub fn coefficient(&self, ray: &QVec) -> Option<&BigRational> {
        self.variety
            .fan()
            .ray_index(ray)
            .map(|i| &self.coefficients[i])
    }

    pub fn is_trivial(&self) -> bool {
        self.coefficients.iter().all(Zero::is_zero)
    }

    /// Class-group coordinates (see module docs). Rational for Q-divisors.
    pub fn class(&self) -> Result<Vec<BigRational>, ToricError> {
        let chart = ClassChart::of(&self.variety)?;
        let fan = self.variety.fan();
        let basis: Vec<QVec> = chart.basis.iter().map(|&i| fan.ray(i).clone()).collect();
        let rhs = QVec::from_iterator(
            basis.len(),
            chart.basis.iter().map(|&i| self.coefficients[i].clone()),
        );
        // unimodular basis: always solvable
        let m = solve(&basis, &rhs).ok_or(ToricError::NoSmoothMaximalCone)?;
        Ok(chart
            .free
            .iter()
            .map(|&j| &self.coefficients[j] - fan.ray(j).dot(&m))
            .collect())
    }

    /// Same base and same class.
    pub fn is_linearly_equivalent(&self, other: &Self) -> Result<bool, ToricError> {
        if !same_variety(&self.variety, &other.variety) {
            return Ok(false);
        }
        Ok(self.class()? == other.class()?)
    }
}

impl BundleSummand for ToricDivisor {
    fn base(&self) -> &Arc<NormalToricVariety> {
        &self.variety
    }

    fn to_divisor(&self) -> Result<ToricDivisor, ToricError> {
        Ok(self.clone())
    }
}

/// Line bundle `O(D)` given by its class-group coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToricLineBundle {
    variety: Arc<NormalToricVariety>,
    class: Vec<BigInt>,
}

impl ToricLineBundle {
    pub fn new(variety: Arc<NormalToricVariety>, class: Vec<BigInt>) -> Result<Self, ToricError> {
        let chart = ClassChart::of(&variety)?;
        if class.len() != chart.free.len() {
            return Err(ToricError::ClassRank {
                expected: chart.free.len(),
                got: class.len(),
            });
        }
        Ok(Self { variety, class })
    }

    pub fn from_integers(
        variety: Arc<NormalToricVariety>,
        class: &[i64],
    ) -> Result<Self, ToricError> {
        Self::new(variety, class.iter().map(|&c| BigInt::from(c)).collect())
    }

    pub fn trivial(variety: Arc<NormalToricVariety>) -> Result<Self, ToricError> {
        let rank = ClassChart::of(&variety)?.free.len();
        Ok(Self {
            variety,
            class: vec![BigInt::zero(); rank],
        })
    }

    /// `O(D)`; fails for divisors whose class is not integral.
    pub fn from_divisor(divisor: &ToricDivisor) -> Result<Self, ToricError> {
        let class = divisor
            .class()?
            .into_iter()
            .map(|c| c.is_integer().then(|| c.to_integer()))
            .collect::<Option<Vec<_>>>()
            .ok_or(ToricError::NonIntegralClass)?;
        Ok(Self {
            variety: divisor.variety.clone(),
            class,
        })
    }

    #[inline]
    pub fn variety(&self) -> &Arc<NormalToricVariety> {
        &self.variety
    }

    #[inline]
    pub fn class(&self) -> &[BigInt] {
        &self.class
    }

    /// Rank of the class group the class lives in.
    #[inline]
    pub fn picard_rank(&self) -> usize {
        self.class.len()
    }
}

impl BundleSummand for ToricLineBundle {
    fn base(&self) -> &Arc<NormalToricVariety> {
        &self.variety
    }

    /// Representative vanishing on the chart basis.
    fn to_divisor(&self) -> Result<ToricDivisor, ToricError> {
        let chart = ClassChart::of(&self.variety)?;
        let mut coefficients = vec![BigRational::zero(); self.variety.n_rays()];
        for (&j, c) in chart.free.iter().zip(&self.class) {
            coefficients[j] = BigRational::from_integer(c.clone());
        }
        ToricDivisor::new(self.variety.clone(), coefficients)
    }
}

/// Same variety: shared allocation or equal fans.
pub(crate) fn same_variety(a: &Arc<NormalToricVariety>, b: &Arc<NormalToricVariety>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

/// Ray indices of the basis cone and of the remaining rays.
struct ClassChart {
    basis: Vec<usize>,
    free: Vec<usize>,
}

impl ClassChart {
    fn of(variety: &NormalToricVariety) -> Result<Self, ToricError> {
        let fan = variety.fan();
        let one = BigInt::from(1);
        let c = (0..fan.n_maximal_cones())
            .find(|&c| fan.cone(c).multiplicity() == Some(one.clone()))
            .ok_or(ToricError::NoSmoothMaximalCone)?;
        let basis: Vec<usize> = fan.maximal_cones()[c].iter().copied().collect();
        let free = (0..fan.n_rays()).filter(|i| !basis.contains(i)).collect();
        Ok(Self { basis, free })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p1() -> Arc<NormalToricVariety> {
        Arc::new(NormalToricVariety::projective_space(1))
    }

    #[test]
    fn coefficient_lookup_by_ray() {
        let d = ToricDivisor::from_integers(p1(), &[3, -1]).unwrap();
        assert_eq!(d.coefficient(&lattice::qvec(&[-1])), Some(&lattice::int(-1)));
        assert_eq!(d.coefficient(&lattice::qvec(&[2])), None);
        assert_eq!(d.coefficient_at(0), &lattice::int(3));
        assert!(!d.is_trivial());
        assert!(ToricDivisor::trivial(p1()).is_trivial());
        assert_eq!(
            ToricDivisor::from_integers(p1(), &[1]),
            Err(ToricError::CoefficientCount {
                expected: 2,
                got: 1
            })
        );
        assert!(ToricDivisor::prime(p1(), 2).is_none());
    }

    #[test]
    fn line_bundle_on_p1_vanishes_on_first_cone() {
        // first maximal cone of P^1 is spanned by [-1]
        let l = ToricLineBundle::from_integers(p1(), &[2]).unwrap();
        let d = l.to_divisor().unwrap();
        assert_eq!(d.coefficients(), &[lattice::int(2), lattice::int(0)][..]);
        assert_eq!(
            ToricLineBundle::from_integers(p1(), &[1, 2]),
            Err(ToricError::ClassRank {
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn class_respects_linear_equivalence() {
        let x = p1();
        let a = ToricDivisor::from_integers(x.clone(), &[1, 0]).unwrap();
        let b = ToricDivisor::from_integers(x.clone(), &[0, 1]).unwrap();
        let c = ToricDivisor::from_integers(x.clone(), &[2, 0]).unwrap();
        assert!(a.is_linearly_equivalent(&b).unwrap());
        assert!(!a.is_linearly_equivalent(&c).unwrap());
        assert_eq!(ToricLineBundle::from_divisor(&b).unwrap().class(), &[BigInt::from(1)][..]);

        let half = ToricDivisor::new(
            x,
            vec![BigRational::new(1.into(), 2.into()), BigRational::zero()],
        )
        .unwrap();
        assert_eq!(
            ToricLineBundle::from_divisor(&half),
            Err(ToricError::NonIntegralClass)
        );
    }

    #[test]
    fn class_group_of_hirzebruch_has_rank_two() {
        let f1 = Arc::new(NormalToricVariety::hirzebruch(1));
        let l = ToricLineBundle::trivial(f1.clone()).unwrap();
        assert_eq!(l.picard_rank(), 2);
        // round trip through the class group
        let d = ToricDivisor::from_integers(f1, &[1, -2, 3, 4]).unwrap();
        let l = ToricLineBundle::from_divisor(&d).unwrap();
        assert!(l.to_divisor().unwrap().is_linearly_equivalent(&d).unwrap());
    }

    #[test]
    fn affine_space_has_trivial_class_group() {
        let a2 = Arc::new(NormalToricVariety::affine_space(2));
        let d = ToricDivisor::from_integers(a2.clone(), &[5, -7]).unwrap();
        assert!(d.class().unwrap().is_empty());
        assert!(d.is_linearly_equivalent(&ToricDivisor::trivial(a2)).unwrap());
    }
}
