//! Small helpers over fixed-size coordinate arrays.

pub fn dot<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn norm<const D: usize>(v: &[f64; D]) -> f64 {
    dot(v, v).sqrt()
}

pub fn sub<const D: usize>(a: &[f64; D], b: &[f64; D]) -> [f64; D] {
    std::array::from_fn(|i| a[i] - b[i])
}

/// Returns `v / |v|`, or `None` when the norm is zero or not finite.
pub fn normalized<const D: usize>(v: [f64; D]) -> Option<[f64; D]> {
    let len = norm(&v);
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some(v.map(|x| x / len))
}
