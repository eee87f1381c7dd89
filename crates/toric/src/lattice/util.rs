//! Small utilities: index combinations.

/// k-combinations of `0..n` in lexicographic order.
///
/// `k == 0` yields the single empty combination; `k > n` yields nothing.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(idxs.clone());
        // rightmost position that can still advance
        let Some(i) = (0..k).rev().find(|&i| idxs[i] != i + n - k) else {
            break;
        };
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
    out
}
