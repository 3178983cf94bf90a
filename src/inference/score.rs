//! Score normalization
//!
//! Converts raw classifier logits into a probability distribution. The
//! softmax subtracts the maximum logit before exponentiating so large logits
//! cannot overflow to infinity.

/// Stabilized softmax: `p_i = exp(l_i - max) / sum_j exp(l_j - max)`.
///
/// Returns a distribution aligned with the input, every entry in [0, 1],
/// summing to 1 within floating-point tolerance. An empty slice returns an
/// empty vector.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return vec![0.0; logits.len()];
    }

    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest entry.
///
/// On exact ties the earliest index wins, keeping argmax deterministic.
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best
}
