use async_trait::async_trait;

use super::EmbeddingProvider;
use crate::error::AiResult;
use crate::models::{EmbeddingModel, EmbeddingResult};

/// Deterministic embedding provider for tests and local development.
///
/// Hashes the input text into a repeatable pseudo-random vector, so the
/// same text always maps to the same embedding without network access.
#[derive(Debug, Clone, Default)]
pub struct StaticEmbeddingProvider;

impl StaticEmbeddingProvider {
    pub fn new() -> Self {
        Self
    }

    fn vector_for(model: EmbeddingModel, text: &str) -> Vec<f32> {
        let dimension = model.dimension() as usize;
        let mut state = text
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
                (acc ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
            });

        (0..dimension)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbeddingProvider {
    async fn embed(&self, model: EmbeddingModel, text: &str) -> AiResult<EmbeddingResult> {
        let values = Self::vector_for(model, text);
        Ok(EmbeddingResult {
            dimension: values.len() as u32,
            values,
            tokens_used: 0,
        })
    }

    async fn embed_batch(
        &self,
        model: EmbeddingModel,
        texts: &[String],
    ) -> AiResult<Vec<EmbeddingResult>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(model, text).await?);
        }
        Ok(results)
    }
}
