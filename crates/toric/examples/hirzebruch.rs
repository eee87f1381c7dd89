//! Hirzebruch surfaces as projective bundles over `P^1`.
//!
//! Builds `P(O ⊕ O(r))` for a few `r`, prints the fan, and checks it against
//! `F_r` up to the lattice automorphism `(x, y) ↦ (-x, y)`.
//!
//! Run: `cargo run -p toric --example hirzebruch -- 3`

use std::sync::Arc;

use toric::api::{fmt_qvec, ToricLineBundle};
use toric::{projectivization, NormalToricVariety, ToricError};

fn main() -> Result<(), ToricError> {
    let max_r: i64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);
    let p1 = Arc::new(NormalToricVariety::projective_space(1));
    for r in 0..=max_r {
        let sum = [
            ToricLineBundle::from_integers(p1.clone(), &[0])?,
            ToricLineBundle::from_integers(p1.clone(), &[r])?,
        ];
        let v = projectivization(&sum)?;
        print!("P(O + O({r})): {v}");

        let reflected: Vec<String> = v
            .fan()
            .rays()
            .iter()
            .map(|ray| {
                let mut w = ray.clone();
                let x = -&w[0];
                w[0] = x;
                fmt_qvec(&w)
            })
            .collect();
        let expected = NormalToricVariety::hirzebruch(r);
        let matches = expected
            .fan()
            .rays()
            .iter()
            .all(|ray| reflected.contains(&fmt_qvec(ray)));
        println!("  matches F_{r} after (x, y) -> (-x, y): {matches}");
    }
    Ok(())
}
