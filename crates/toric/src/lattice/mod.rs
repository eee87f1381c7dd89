//! Exact lattice vectors (rational coordinates, no floating point).
//!
//! Purpose
//! - Provide the vector type shared by cones, fans and divisors: a dynamic
//!   `nalgebra` column vector over `BigRational`.
//! - Keep normalization explicit: `clear_denominators` scales by the lcm of the
//!   coordinate denominators, `primitive` additionally divides by the content.
//!
//! Conventions
//! - Equality is exact and coordinate-wise. `BigRational` is always stored in
//!   lowest terms, so `key(v)` is a canonical map key.
//! - Dimension mismatches are caller bugs; helpers assume equal lengths.
//!
//! Code cross-refs: `linalg` (rank, nullspace, determinant), `util::combinations`.

pub(crate) mod linalg;
pub(crate) mod util;

use std::fmt::Write as _;

use nalgebra::DVector;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

pub use linalg::{determinant, integer_dual, nullspace, rank, solve};
pub use util::combinations;

/// Vector with exact rational coordinates.
pub type QVec = DVector<BigRational>;

/// Canonical, hashable and ordered form of a `QVec`.
pub type RayKey = Vec<BigRational>;

/// Build a vector from integer coordinates.
pub fn qvec(coords: &[i64]) -> QVec {
    QVec::from_iterator(coords.len(), coords.iter().map(|&c| int(c)))
}

/// Exact rational from an integer.
#[inline]
pub fn int(c: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(c))
}

/// Zero vector of length `n`.
#[inline]
pub fn zero(n: usize) -> QVec {
    QVec::from_element(n, BigRational::zero())
}

/// `e_i` in `Q^n`.
pub fn unit(n: usize, i: usize) -> QVec {
    let mut v = zero(n);
    v[i] = BigRational::one();
    v
}

#[inline]
pub fn is_zero(v: &QVec) -> bool {
    v.iter().all(Zero::is_zero)
}

/// Concatenation `(a, b)`.
pub fn concat(a: &QVec, b: &QVec) -> QVec {
    QVec::from_iterator(a.len() + b.len(), a.iter().chain(b.iter()).cloned())
}

/// Scalar multiple `s · v`.
pub fn scale(v: &QVec, s: &BigRational) -> QVec {
    v.map(|x| &x * s)
}

#[inline]
pub fn neg(v: &QVec) -> QVec {
    v.map(|x| -x)
}

/// `acc += s · v`.
pub fn add_scaled(acc: &mut QVec, s: &BigRational, v: &QVec) {
    for (a, x) in acc.iter_mut().zip(v.iter()) {
        *a += s * x;
    }
}

/// Least common multiple of the coordinate denominators (1 for the empty vector).
pub fn denominator_lcm(v: &QVec) -> BigInt {
    v.iter().fold(BigInt::one(), |acc, x| acc.lcm(x.denom()))
}

/// Rescale by `denominator_lcm(v)` so every coordinate is an integer.
pub fn clear_denominators(v: &QVec) -> QVec {
    let l = BigRational::from_integer(denominator_lcm(v));
    scale(v, &l)
}

/// Primitive integer generator of the ray through `v`; `None` for the zero vector.
pub fn primitive(v: &QVec) -> Option<QVec> {
    if is_zero(v) {
        return None;
    }
    let ints = clear_denominators(v);
    let content = ints.iter().fold(BigInt::zero(), |acc, x| acc.gcd(x.numer()));
    let c = BigRational::from_integer(content);
    Some(ints.map(|x| x / &c))
}

/// Canonical key for exact lookups.
#[inline]
pub fn key(v: &QVec) -> RayKey {
    v.iter().cloned().collect()
}

/// `[a, b, c]` with rationals printed as `p/q`.
pub fn fmt_qvec(v: &QVec) -> String {
    let mut s = String::from("[");
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        let _ = write!(s, "{x}");
    }
    s.push(']');
    s
}

#[cfg(test)]
mod tests;
