use std::cmp::Ordering;

use crate::types::{normalize_paging, Page, SimilarityResult};

/// Cosine similarity over the shared prefix of `a` and `b`.
///
/// Vectors of different lengths are compared on their first
/// `min(a.len(), b.len())` components. Returns 0 when either vector is empty
/// or either prefix has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0f64, 0f64, 0f64);
    for (x, y) in a[..n].iter().zip(&b[..n]) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

/// Scores every candidate against `query` and sorts by descending score.
///
/// The sort is stable: candidates with equal scores keep their input order.
pub fn rank<K: Copy>(query: &[f32], candidates: &[(K, Vec<f32>)]) -> Vec<SimilarityResult<K>> {
    let mut scored: Vec<(K, f32)> = candidates
        .iter()
        .map(|(id, vector)| (*id, cosine_similarity(query, vector)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (id, score))| SimilarityResult { id, score, rank })
        .collect()
}

/// Applies the TopK cutoff, then slices out the requested 1-based page.
///
/// `top_k == 0` means no cutoff. Paging is normalized the same way
/// requests are. A page past the end comes back empty with correct totals.
pub fn paginate<T>(mut ranked: Vec<T>, top_k: usize, page: usize, page_size: usize) -> Page<T> {
    let (page, page_size) = normalize_paging(page, page_size);
    if top_k > 0 {
        ranked.truncate(top_k);
    }

    let total = ranked.len();
    let total_pages = total.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items = if start >= total {
        Vec::new()
    } else {
        let end = (start + page_size).min(total);
        ranked.drain(start..end).collect()
    };

    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}
