use std::sync::Arc;

use crate::embedding::{EmbeddingProvider, OpenAIProvider};
use crate::error::{AiError, AiResult};
use crate::models::EmbeddingModel;

/// Facade over the embedding provider used for catalog semantic search.
///
/// When no provider is configured the facade reports itself disabled and
/// callers fall back to plain text search.
#[derive(Clone)]
pub struct CatalogAi {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    model: EmbeddingModel,
}

impl CatalogAi {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: EmbeddingModel) -> Self {
        Self {
            provider: Some(provider),
            model,
        }
    }

    pub fn disabled() -> Self {
        Self {
            provider: None,
            model: EmbeddingModel::default(),
        }
    }

    /// Enables embeddings when OPENAI_API_KEY is present, otherwise disabled.
    pub fn from_env() -> AiResult<Self> {
        if std::env::var("OPENAI_API_KEY").is_err() {
            tracing::info!("OPENAI_API_KEY not set, semantic search disabled");
            return Ok(Self::disabled());
        }

        let provider = OpenAIProvider::from_env()?;
        Ok(Self::new(Arc::new(provider), EmbeddingModel::default()))
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> EmbeddingModel {
        self.model
    }

    /// Embeds free text typed by a user searching the catalog.
    pub async fn embed_query(&self, text: &str) -> AiResult<Vec<f32>> {
        let provider = self.provider.as_ref().ok_or(AiError::Disabled)?;
        let result = provider.embed(self.model, text).await?;
        Ok(result.values)
    }

    /// Embeds the searchable text of a catalog item.
    pub async fn embedding_for_item(&self, name: &str, description: &str) -> AiResult<Vec<f32>> {
        self.embed_query(&format!("{} {}", name, description)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;
    use crate::models::EmbeddingResult;

    #[test]
    fn test_disabled_reports_disabled() {
        let ai = CatalogAi::disabled();
        assert!(!ai.is_enabled());
    }

    #[tokio::test]
    async fn test_embed_query_when_disabled_errors() {
        let ai = CatalogAi::disabled();
        let result = ai.embed_query("mountain bike").await;
        assert!(matches!(result, Err(AiError::Disabled)));
    }

    #[tokio::test]
    async fn test_embed_query_returns_provider_values() {
        let mut provider = MockEmbeddingProvider::new();
        provider.expect_embed().times(1).returning(|_, _| {
            Ok(EmbeddingResult {
                values: vec![0.1, 0.2, 0.3],
                dimension: 3,
                tokens_used: 2,
            })
        });

        let ai = CatalogAi::new(Arc::new(provider), EmbeddingModel::Custom(3));
        let values = ai.embed_query("mountain bike").await.unwrap();
        assert_eq!(values, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embedding_for_item_joins_name_and_description() {
        let mut provider = MockEmbeddingProvider::new();
        provider
            .expect_embed()
            .withf(|_, text| text == "Alpine Fork Light aluminium suspension fork")
            .times(1)
            .returning(|_, _| {
                Ok(EmbeddingResult {
                    values: vec![1.0],
                    dimension: 1,
                    tokens_used: 1,
                })
            });

        let ai = CatalogAi::new(Arc::new(provider), EmbeddingModel::Custom(1));
        ai.embedding_for_item("Alpine Fork", "Light aluminium suspension fork")
            .await
            .unwrap();
    }
}
