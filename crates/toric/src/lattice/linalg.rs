//! Exact Gaussian elimination over `BigRational`.
//!
//! Rows are passed as slices of `QVec`; all rows must share the length `ncols`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::QVec;

type Rows = Vec<Vec<BigRational>>;

fn to_rows(rows: &[QVec]) -> Rows {
    rows.iter().map(|r| r.iter().cloned().collect()).collect()
}

/// Reduced row echelon form in place; returns the pivot columns.
///
/// Pivots are searched in the first `ncols` columns only; trailing columns
/// (an augmented right-hand side) are carried along.
fn rref(m: &mut Rows, ncols: usize) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..ncols {
        if row >= m.len() {
            break;
        }
        let Some(p) = (row..m.len()).find(|&r| !m[r][col].is_zero()) else {
            continue;
        };
        m.swap(row, p);
        let inv = BigRational::one() / &m[row][col];
        for x in m[row].iter_mut() {
            *x *= &inv;
        }
        for r in 0..m.len() {
            if r == row || m[r][col].is_zero() {
                continue;
            }
            let f = m[r][col].clone();
            for c in col..m[row].len() {
                let delta = &f * &m[row][c];
                m[r][c] -= delta;
            }
        }
        pivots.push(col);
        row += 1;
    }
    pivots
}

/// Rank of the row space.
pub fn rank(rows: &[QVec]) -> usize {
    let Some(first) = rows.first() else {
        return 0;
    };
    let ncols = first.len();
    let mut m = to_rows(rows);
    rref(&mut m, ncols).len()
}

/// Basis of `{x in Q^ncols : r·x = 0 for every row r}`, one vector per free column.
pub fn nullspace(rows: &[QVec], ncols: usize) -> Vec<QVec> {
    let mut m = to_rows(rows);
    let pivots = rref(&mut m, ncols);
    let free: Vec<usize> = (0..ncols).filter(|c| !pivots.contains(c)).collect();
    free.iter()
        .map(|&f| {
            let mut x = super::zero(ncols);
            x[f] = BigRational::one();
            for (r, &pc) in pivots.iter().enumerate() {
                x[pc] = -m[r][f].clone();
            }
            x
        })
        .collect()
}

/// Determinant of a square matrix given by rows (1 for the empty matrix).
pub fn determinant(rows: &[QVec]) -> BigRational {
    let n = rows.len();
    let mut m = to_rows(rows);
    let mut det = BigRational::one();
    for col in 0..n {
        let Some(p) = (col..n).find(|&r| !m[r][col].is_zero()) else {
            return BigRational::zero();
        };
        if p != col {
            m.swap(col, p);
            det = -det;
        }
        let pivot = m[col][col].clone();
        det *= &pivot;
        for r in col + 1..n {
            if m[r][col].is_zero() {
                continue;
            }
            let f = &m[r][col] / &pivot;
            for c in col..n {
                let delta = &f * &m[col][c];
                m[r][c] -= delta;
            }
        }
    }
    det
}

/// Solve `A x = b` for square, nonsingular `A` (given by rows); `None` if singular.
pub fn solve(rows: &[QVec], b: &QVec) -> Option<QVec> {
    let n = rows.len();
    if b.len() != n {
        return None;
    }
    let mut m: Rows = rows
        .iter()
        .zip(b.iter())
        .map(|(r, bi)| r.iter().cloned().chain(std::iter::once(bi.clone())).collect())
        .collect();
    let pivots = rref(&mut m, n);
    if pivots.len() != n {
        return None;
    }
    Some(QVec::from_iterator(n, m.iter().map(|r| r[n].clone())))
}

/// Integral `m` with `⟨m, o⟩ = 0` for every row `o` of `others` and
/// `⟨m, target⟩ = -g`, where `g > 0` generates `{⟨x, target⟩ : x ∈ Z^n, x ⊥ others}`.
///
/// Column-style Hermite reduction with a tracked unimodular transform: after
/// processing a row, the columns right of the pivot span the integer kernel of
/// the rows seen so far. `None` when `target` lies in the span of `others`.
pub fn integer_dual(others: &[QVec], target: &QVec) -> Option<QVec> {
    let n = target.len();
    let mut rows: Vec<Vec<BigInt>> = others
        .iter()
        .chain(std::iter::once(target))
        .map(|r| {
            super::clear_denominators(r)
                .iter()
                .map(|x| x.to_integer())
                .collect()
        })
        .collect();
    // cols[c] is column c of the unimodular transform
    let mut cols: Vec<Vec<BigInt>> = (0..n)
        .map(|c| (0..n).map(|r| BigInt::from(u8::from(r == c))).collect())
        .collect();
    let last = rows.len() - 1;
    let mut pivot = 0;
    for r in 0..rows.len() {
        if pivot >= n {
            return None;
        }
        for c in pivot + 1..n {
            if rows[r][c].is_zero() {
                continue;
            }
            let a = rows[r][pivot].clone();
            let b = rows[r][c].clone();
            let e = a.extended_gcd(&b);
            let (p, q) = (&b / &e.gcd, &a / &e.gcd);
            // [x  -p]
            // [y   q]   has determinant 1
            let mix = |u: &BigInt, v: &BigInt| (&e.x * u + &e.y * v, &q * v - &p * u);
            for row in rows.iter_mut() {
                let (np, nc) = mix(&row[pivot], &row[c]);
                row[pivot] = np;
                row[c] = nc;
            }
            let (np, nc): (Vec<_>, Vec<_>) = cols[pivot]
                .iter()
                .zip(&cols[c])
                .map(|(u, v)| mix(u, v))
                .unzip();
            cols[pivot] = np;
            cols[c] = nc;
        }
        if rows[r][pivot].is_zero() {
            if r == last {
                return None;
            }
            continue;
        }
        if r == last {
            let m = QVec::from_iterator(
                n,
                cols[pivot].iter().map(|x| BigRational::from_integer(x.clone())),
            );
            return Some(if rows[r][pivot].is_positive() { super::neg(&m) } else { m });
        }
        pivot += 1;
    }
    None
}
