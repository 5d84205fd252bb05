/// In-place L2 normalization. Zero vectors are left untouched.
///
/// Returns `true` when the vector was rescaled. The norm is accumulated in
/// `f64` so long vectors of small components do not lose precision.
pub fn l2_normalize(v: &mut [f32]) -> bool {
    let norm_sq: f64 = v.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    if norm_sq == 0.0 || !norm_sq.is_finite() {
        return false;
    }
    let inv_norm = norm_sq.sqrt().recip();
    for x in v.iter_mut() {
        *x = (f64::from(*x) * inv_norm) as f32;
    }
    true
}

/// Cosine similarity; `0.0` when either side is a zero vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0f64, 0f64, 0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na.sqrt() * nb.sqrt())) as f32
}
