mod openai;
mod provider;
mod static_provider;

pub use openai::{OpenAIConfig, OpenAIProvider};
pub use provider::EmbeddingProvider;
pub use static_provider::StaticEmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
