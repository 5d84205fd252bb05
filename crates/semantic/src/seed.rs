use fxhash::hash64;

/// Deterministic seed for a token list, so the same document always starts
/// inference from the same point.
pub(crate) fn seed_for_tokens(tokens: &[String]) -> u64 {
    hash64(tokens.join(" ").as_bytes())
}

/// Small random starting vector for doc2vec inference, derived from `seed`.
/// Components lie in `(-0.5 / dim, 0.5 / dim)`.
pub(crate) fn seeded_vector(seed: u64, dim: usize) -> Vec<f32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let scale = dim.max(1) as f32;
    (0..dim).map(|_| (rng.f32() - 0.5) / scale).collect()
}
