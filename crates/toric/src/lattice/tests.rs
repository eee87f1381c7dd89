use super::*;

fn q(p: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(p), BigInt::from(d))
}

#[test]
fn combinations_lexicographic_and_edges() {
    assert_eq!(
        combinations(4, 2),
        vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 3],
            vec![1, 2],
            vec![1, 3],
            vec![2, 3]
        ]
    );
    assert_eq!(combinations(3, 0), vec![Vec::<usize>::new()]);
    assert_eq!(combinations(3, 3), vec![vec![0, 1, 2]]);
    assert!(combinations(2, 3).is_empty());
}

#[test]
fn primitive_clears_denominators_and_content() {
    let v = QVec::from_vec(vec![q(1, 2), q(-3, 4), int(0)]);
    assert_eq!(denominator_lcm(&v), BigInt::from(4));
    assert_eq!(clear_denominators(&v), qvec(&[2, -3, 0]));
    assert_eq!(primitive(&qvec(&[4, -6, 2])), Some(qvec(&[2, -3, 1])));
    assert_eq!(primitive(&qvec(&[0, 0])), None);
}

#[test]
fn rank_nullspace_det_solve() {
    let rows = vec![qvec(&[1, 2, 3]), qvec(&[2, 4, 6]), qvec(&[0, 1, 1])];
    assert_eq!(rank(&rows), 2);
    let ns = nullspace(&rows, 3);
    assert_eq!(ns.len(), 1);
    for r in &rows {
        assert!(r.dot(&ns[0]).is_zero());
    }
    // empty system: whole space
    assert_eq!(nullspace(&[], 2), vec![qvec(&[1, 0]), qvec(&[0, 1])]);

    let m = vec![qvec(&[2, 1]), qvec(&[1, 1])];
    assert_eq!(determinant(&m), int(1));
    assert_eq!(determinant(&[qvec(&[0, 1]), qvec(&[1, 0])]), int(-1));
    assert_eq!(determinant(&rows), int(0));
    let x = solve(&m, &qvec(&[3, 2])).expect("nonsingular");
    assert_eq!(x, qvec(&[1, 1]));
    assert!(solve(&rows, &qvec(&[1, 1, 1])).is_none());
}

#[test]
fn integer_dual_generates_the_quotient_lattice() {
    // w = (0,-1,1) next to e1: the rational normal inside span(e1, w) is
    // (0,1,-1), which pairs -2 with w; the lattice generator pairs -1
    let w = qvec(&[0, -1, 1]);
    let m = integer_dual(&[qvec(&[1, 0, 0])], &w).unwrap();
    assert_eq!(m.dot(&w), int(-1));
    assert!(m[0].is_zero());

    // full-dimensional: the primitive facet normal
    let m = integer_dual(&[qvec(&[-1, -2])], &qvec(&[1, 0])).unwrap();
    assert_eq!(m, qvec(&[-2, 1]));

    // singular cone: the generator is not a unit
    let m = integer_dual(&[qvec(&[1, 0])], &qvec(&[1, 2])).unwrap();
    assert_eq!(m.dot(&qvec(&[1, 2])), int(-2));

    assert!(integer_dual(&[qvec(&[1, 1])], &qvec(&[2, 2])).is_none());
    assert_eq!(integer_dual(&[], &qvec(&[-1])), Some(qvec(&[1])));
}

#[test]
fn concat_and_fmt() {
    let v = concat(&qvec(&[1]), &QVec::from_vec(vec![q(-1, 2)]));
    assert_eq!(fmt_qvec(&v), "[1, -1/2]");
    let mut acc = zero(2);
    add_scaled(&mut acc, &int(-2), &unit(2, 1));
    assert_eq!(acc, qvec(&[0, -2]));
}
