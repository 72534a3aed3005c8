use serde::{Deserialize, Serialize};

/// Supported embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingModel {
    /// OpenAI text-embedding-3-small (1536 dimensions)
    TextEmbedding3Small,
    /// OpenAI text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
    /// Custom dimension count (provider-dependent)
    Custom(u32),
}

impl EmbeddingModel {
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::TextEmbedding3Small => "text-embedding-3-small",
            Self::TextEmbedding3Large => "text-embedding-3-large",
            Self::Custom(_) => "text-embedding-3-small",
        }
    }

    pub fn dimension(&self) -> u32 {
        match self {
            Self::TextEmbedding3Small => 1536,
            Self::TextEmbedding3Large => 3072,
            Self::Custom(dim) => *dim,
        }
    }
}

impl Default for EmbeddingModel {
    fn default() -> Self {
        Self::TextEmbedding3Small
    }
}

/// A generated embedding with usage accounting
#[derive(Debug, Clone)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_names() {
        assert_eq!(
            EmbeddingModel::TextEmbedding3Small.model_name(),
            "text-embedding-3-small"
        );
        assert_eq!(
            EmbeddingModel::TextEmbedding3Large.model_name(),
            "text-embedding-3-large"
        );
    }

    #[test]
    fn test_model_dimensions() {
        assert_eq!(EmbeddingModel::TextEmbedding3Small.dimension(), 1536);
        assert_eq!(EmbeddingModel::TextEmbedding3Large.dimension(), 3072);
        assert_eq!(EmbeddingModel::Custom(768).dimension(), 768);
    }
}
