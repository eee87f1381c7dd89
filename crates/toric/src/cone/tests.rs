use super::*;
use crate::lattice::qvec;

fn cone(rays: &[&[i64]]) -> Cone {
    let dim = rays[0].len();
    Cone::new(dim, rays.iter().map(|r| qvec(r)).collect())
}

#[test]
fn polar_of_positive_quadrant() {
    let c = cone(&[&[1, 0], &[0, 1]]);
    let p = c.polar();
    assert_eq!(p.lineality_dim(), 0);
    // facet through ray 0 first, then facet through ray 1
    assert_eq!(p.rays(), &[qvec(&[0, -1]), qvec(&[-1, 0])][..]);
    // ray 0 is dual to the facet spanned by ray 1
    assert_eq!(p.dual_ray(0, 2), Some(&qvec(&[-1, 0])));
    assert_eq!(p.dual_ray(1, 2), Some(&qvec(&[0, -1])));
    for (j, d) in p.rays().iter().enumerate() {
        for (i, r) in c.rays().iter().enumerate() {
            let s = r.dot(d);
            assert!(!s.is_positive());
            assert_eq!(s.is_zero(), p.vanishing(j).contains(&i));
        }
    }
}

#[test]
fn polar_of_one_dimensional_cones() {
    let p = cone(&[&[1]]).polar();
    assert_eq!(p.rays(), &[qvec(&[-1])][..]);
    let p = cone(&[&[-1]]).polar();
    assert_eq!(p.rays(), &[qvec(&[1])][..]);
    assert_eq!(p.dual_ray(0, 1), Some(&qvec(&[1])));
}

#[test]
fn polar_of_non_simplicial_cone() {
    // cone over a square: four facets
    let c = cone(&[&[1, 0, 1], &[0, 1, 1], &[-1, 0, 1], &[0, -1, 1]]);
    assert!(c.is_full_dimensional());
    assert!(!c.is_simplicial());
    let p = c.polar();
    assert_eq!(p.rays().len(), 4);
    for d in p.rays() {
        assert!(c.rays().iter().all(|r| !r.dot(d).is_positive()));
    }
    // each ray sits on two facets, so the fallback picks a nonvanishing one
    let d = p.dual_ray(0, 4).expect("dual ray");
    assert!(!c.rays()[0].dot(d).is_zero());
}

#[test]
fn polar_of_lower_dimensional_cone_has_lineality() {
    let c = cone(&[&[1, 0, 0]]);
    assert!(!c.is_full_dimensional());
    let p = c.polar();
    assert_eq!(p.lineality_dim(), 2);
    assert_eq!(p.rays()[0], qvec(&[-1, 0, 0]));
    assert_eq!(p.rays().len(), 5);
    assert_eq!(p.dual_ray(0, 1), Some(&qvec(&[-1, 0, 0])));
}

#[test]
fn smoothness_and_multiplicity() {
    assert!(cone(&[&[1, 0], &[1, 1]]).is_smooth());
    let singular = cone(&[&[-1, -2], &[1, 0]]);
    assert!(singular.is_simplicial());
    assert!(!singular.is_smooth());
    assert_eq!(singular.multiplicity(), Some(BigInt::from(2)));
    // part of a lattice basis although not full-dimensional
    assert!(cone(&[&[1, 1, 0]]).is_smooth());
    assert!(!cone(&[&[1, 0], &[0, 1], &[1, 1]]).is_simplicial());
}
