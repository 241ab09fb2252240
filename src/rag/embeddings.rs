//! Embedding providers.
//!
//! The embedder is constructed once at startup and shared across requests.
//! Two providers are available:
//!
//! - [`HashEmbedder`] - deterministic token feature hashing. No model files,
//!   no network; the default, and what the test suite runs against.
//! - `FastembedEmbedder` - ONNX models via fastembed, behind the
//!   `local-embeddings` feature (does not build on Windows MSVC).

use crate::types::Result;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Text embedding interface.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Dimensionality of produced vectors.
    fn dimensions(&self) -> usize;

    /// Identifier of the underlying model.
    fn model_id(&self) -> &str;
}

// ============================================================================
// Hashed Embedder
// ============================================================================

/// Deterministic feature-hashing embedder.
///
/// Each alphanumeric token is hashed into a bucket with a hash-derived sign,
/// and the resulting vector is L2-normalized. Texts sharing tokens land in
/// shared buckets, so cosine similarity tracks lexical overlap. Same input
/// always yields the same output.
pub struct HashEmbedder {
    model_id: String,
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(model_id: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model_id: model_id.into(),
            dimensions,
        }
    }

    fn embed_tokens(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let hashed = hasher.finish();

            let bucket = (hashed % self.dimensions as u64) as usize;
            let sign = if hashed & (1 << 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_tokens(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Fastembed Embedder (optional)
// ============================================================================

#[cfg(feature = "local-embeddings")]
pub use fastembed_impl::FastembedEmbedder;

#[cfg(feature = "local-embeddings")]
mod fastembed_impl {
    use super::Embedder;
    use crate::types::{AppError, Result};
    use async_trait::async_trait;
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use parking_lot::Mutex;

    /// ONNX embedding models via fastembed.
    pub struct FastembedEmbedder {
        model: Mutex<TextEmbedding>,
        model_id: String,
        dimensions: usize,
    }

    impl FastembedEmbedder {
        pub fn new(model_id: &str) -> Result<Self> {
            let (model, dimensions) = match model_id {
                "BAAI/bge-base-en-v1.5" => (EmbeddingModel::BGEBaseENV15, 768),
                "sentence-transformers/all-MiniLM-L6-v2" => (EmbeddingModel::AllMiniLML6V2, 384),
                _ => (EmbeddingModel::BGESmallENV15, 384),
            };

            let embedding = TextEmbedding::try_new(
                InitOptions::new(model).with_show_download_progress(true),
            )
            .map_err(|e| AppError::Embedding(e.to_string()))?;

            Ok(Self {
                model: Mutex::new(embedding),
                model_id: model_id.to_string(),
                dimensions,
            })
        }
    }

    #[async_trait]
    impl Embedder for FastembedEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut vectors = self
                .model
                .lock()
                .embed(vec![text], None)
                .map_err(|e| AppError::Embedding(e.to_string()))?;
            vectors
                .pop()
                .ok_or_else(|| AppError::Embedding("Empty embedding batch".to_string()))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let refs: Vec<&str> = texts.iter().map(|t| t.as_str()).collect();
            self.model
                .lock()
                .embed(refs, None)
                .map_err(|e| AppError::Embedding(e.to_string()))
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }

        fn model_id(&self) -> &str {
            &self.model_id
        }
    }
}

// ============================================================================
// Provider Selection
// ============================================================================

/// Embedding provider configuration.
#[derive(Debug, Clone)]
pub enum EmbeddingProvider {
    /// Feature-hashing embedder (default).
    Hashed { model_id: String, dimensions: usize },

    /// fastembed ONNX models (requires the `local-embeddings` feature).
    #[cfg(feature = "local-embeddings")]
    Local { model_id: String },
}

impl EmbeddingProvider {
    /// Select a provider from configuration.
    ///
    /// `EMBEDDING_PROVIDER=local` selects fastembed when the feature is
    /// compiled in; anything else falls back to the hashed provider.
    pub fn from_env(rag: &crate::utils::config::RagConfig) -> Self {
        #[cfg(feature = "local-embeddings")]
        if std::env::var("EMBEDDING_PROVIDER").as_deref() == Ok("local") {
            return EmbeddingProvider::Local {
                model_id: rag.embedding_model.clone(),
            };
        }

        EmbeddingProvider::Hashed {
            model_id: rag.embedding_model.clone(),
            dimensions: rag.embedding_dimensions,
        }
    }

    /// Build the embedder for this provider.
    pub fn create_embedder(&self) -> Result<std::sync::Arc<dyn Embedder>> {
        match self {
            EmbeddingProvider::Hashed {
                model_id,
                dimensions,
            } => Ok(std::sync::Arc::new(HashEmbedder::new(
                model_id.clone(),
                *dimensions,
            ))),

            #[cfg(feature = "local-embeddings")]
            EmbeddingProvider::Local { model_id } => Ok(std::sync::Arc::new(
                FastembedEmbedder::new(model_id)?,
            )),
        }
    }
}
