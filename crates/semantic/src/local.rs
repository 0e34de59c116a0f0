use sha2::{Digest, Sha256};

use crate::normalize::l2_normalize_in_place;

/// Dimension of every locally built vector.
pub const LOCAL_DIMENSION: usize = 256;

/// Deterministic hashed bag-of-words embedder.
///
/// Each token lands in bucket `u32::from_be_bytes(sha256(token)[..4]) % 256`
/// and bumps it by one; the result is then L2-normalized. Collisions are
/// accepted. Text without tokens produces the zero vector, which scores 0
/// against everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEmbedder;

impl LocalEmbedder {
    pub fn new() -> Self {
        Self
    }

    pub fn dimension(&self) -> usize {
        LOCAL_DIMENSION
    }

    /// Builds the vector for `text`. Never fails.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; LOCAL_DIMENSION];
        for token in canonical::tokenize(text) {
            v[bucket_for(&token)] += 1.0;
        }
        l2_normalize_in_place(&mut v);
        v
    }
}

/// Bucket index for an already lowercased token.
pub fn bucket_for(token: &str) -> usize {
    let digest = Sha256::digest(token.as_bytes());
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    head as usize % LOCAL_DIMENSION
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn dimension_is_fixed() {
        let e = LocalEmbedder::new();
        assert_eq!(e.embed("hello world").len(), LOCAL_DIMENSION);
        assert_eq!(e.embed("").len(), LOCAL_DIMENSION);
        assert_eq!(e.dimension(), 256);
    }

    #[test]
    fn deterministic() {
        let e = LocalEmbedder::new();
        assert_eq!(e.embed("graph theory notes"), e.embed("graph theory notes"));
    }

    #[test]
    fn unit_length_for_tokenized_text() {
        let e = LocalEmbedder::new();
        for text in ["a", "hello world", "数据结构 与 算法", "x y z x y z"] {
            let n = norm(&e.embed(text));
            assert!((n - 1.0).abs() < 1e-5, "{text}: norm={n}");
        }
    }

    #[test]
    fn no_tokens_means_zero_vector() {
        let e = LocalEmbedder::new();
        for text in ["", "   ", ",,,。。！", "()[]{}"] {
            assert!(e.embed(text).iter().all(|x| *x == 0.0), "{text:?}");
        }
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        let e = LocalEmbedder::new();
        assert_eq!(e.embed("Hello, World!"), e.embed("hello world"));
    }

    #[test]
    fn single_token_hits_its_bucket() {
        let v = LocalEmbedder::new().embed("rust");
        let idx = bucket_for("rust");
        assert!((v[idx] - 1.0).abs() < 1e-6);
        assert_eq!(v.iter().filter(|x| **x != 0.0).count(), 1);
    }

    #[test]
    fn repeated_tokens_weigh_more() {
        let e = LocalEmbedder::new();
        let v = e.embed("alpha alpha beta");
        let a = bucket_for("alpha");
        let b = bucket_for("beta");
        if a != b {
            assert!(v[a] > v[b]);
            assert!((v[a] / v[b] - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn bucket_is_in_range() {
        for token in ["a", "bb", "数据", "🌍", "very-long-token-with-lots-of-characters"] {
            assert!(bucket_for(token) < LOCAL_DIMENSION);
        }
    }
}
