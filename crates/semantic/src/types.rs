use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an [`EmbeddingVector`] came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingSource {
    /// Returned by the remote provider, unnormalized.
    Remote,
    /// Built by the hashed bag-of-words embedder.
    Local,
    /// Decoded from a document's stored vector.
    Cached,
}

impl EmbeddingSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingSource::Remote => "remote",
            EmbeddingSource::Local => "local",
            EmbeddingSource::Cached => "cached",
        }
    }
}

impl fmt::Display for EmbeddingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedding output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingVector {
    /// Vector components. Local vectors have 256 of them.
    pub values: Vec<f32>,
    /// Which stage of the pipeline produced [`values`](Self::values).
    pub source: EmbeddingSource,
}

impl EmbeddingVector {
    pub fn new(values: Vec<f32>, source: EmbeddingSource) -> Self {
        Self { values, source }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Euclidean norm of the vector.
    pub fn norm(&self) -> f32 {
        self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// `true` for the empty vector and for all-zero vectors.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|x| *x == 0.0)
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}
