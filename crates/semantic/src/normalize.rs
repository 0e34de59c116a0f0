/// In-place L2 normalization. A zero vector is left untouched.
pub fn l2_normalize_in_place(v: &mut [f32]) {
    let norm_sq: f32 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

/// Decodes a stored vector (a JSON array of numbers).
///
/// An empty array is treated as unreadable so that callers recompute
/// instead of ranking against nothing.
pub fn decode_vector(serialized: &str) -> Result<Vec<f32>, crate::SemanticError> {
    let values: Vec<f32> = serde_json::from_str(serialized.trim())
        .map_err(|e| crate::SemanticError::CachedVector(e.to_string()))?;
    if values.is_empty() {
        return Err(crate::SemanticError::CachedVector("empty vector".into()));
    }
    Ok(values)
}

/// Encodes a vector the way [`decode_vector`] reads it back.
pub fn encode_vector(values: &[f32]) -> String {
    // non-finite values come out as null and fail to decode later
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}
