/// Cosine similarity of two embeddings, clamped to `[0, 1]`.
///
/// A missing vector, mismatched lengths or a zero vector score 0.0.
/// Negative similarity also scores 0.0: an opposite direction counts the
/// same as no relation.
pub fn similarity(a: Option<&[f32]>, b: Option<&[f32]>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    if a.is_empty() || a.len() != b.len() {
        if a.len() != b.len() {
            tracing::warn!(
                "Cannot compare embeddings of different lengths ({} vs {})",
                a.len(),
                b.len()
            );
        }
        return 0.0;
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let cosine: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (f64::from(*x) / norm_a) * (f64::from(*y) / norm_b))
        .sum();

    if cosine.is_finite() {
        cosine.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Score each resume vector against one job description vector, in input order.
///
/// Empty input or a missing job description vector yields an empty list.
pub fn batch_similarity(resume_vectors: &[Option<Vec<f32>>], jd_vector: Option<&[f32]>) -> Vec<f64> {
    let Some(jd_vector) = jd_vector else {
        return Vec::new();
    };
    resume_vectors
        .iter()
        .map(|v| similarity(v.as_deref(), Some(jd_vector)))
        .collect()
}

fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}
