//! 3-point median filter for single-sample noise suppression.

/// Median of three values under the standard total order.
///
/// Any of three equal inputs is a valid median; no special-casing.
pub fn median3<T: PartialOrd + Copy>(a: T, b: T, c: T) -> T {
    if a > b {
        if b > c {
            b // a > b > c
        } else if a > c {
            c // a > c >= b
        } else {
            a // c >= a > b
        }
    } else if a > c {
        a // b >= a > c
    } else if b > c {
        c // b > c >= a
    } else {
        b // c >= b >= a
    }
}

/// Sliding median-of-3 over a sequence.
///
/// Boundary samples pass through unfiltered (no neighbor on one side);
/// interior samples become the median of themselves and both neighbors.
/// Output length always equals input length.
pub fn median_filter3<T: PartialOrd + Copy>(seq: &[T]) -> Vec<T> {
    let n = seq.len();
    if n < 3 {
        return seq.to_vec();
    }

    let mut out = Vec::with_capacity(n);
    out.push(seq[0]);
    for i in 1..n - 1 {
        out.push(median3(seq[i - 1], seq[i], seq[i + 1]));
    }
    out.push(seq[n - 1]);
    out
}
