//! Named-index operations over the embedder and vector store.
//!
//! [`VectorStoreHandler`] is the service's retrieval surface: it chunks and
//! embeds incoming documents, maintains named indexes, and answers retrieve
//! requests with scored nodes. A retrieve against a name that was never
//! indexed fails with [`AppError::NotFound`], which the API layer surfaces
//! as HTTP 404.

use crate::db::VectorStore;
use crate::rag::cache::{CacheStats, EmbeddingCache};
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::Embedder;
use crate::types::{
    AppError, Document, IndexInfo, IndexedDocument, Node, NodeResult, Result, RetrieveResponse,
};
use crate::utils::config::RagConfig;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Default number of entries the embedding cache holds.
const EMBEDDING_CACHE_ENTRIES: usize = 4096;

pub struct VectorStoreHandler {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    cache: EmbeddingCache,
    chunker: TextChunker,
    default_max_node_count: usize,
}

impl VectorStoreHandler {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>, rag: &RagConfig) -> Self {
        Self {
            store,
            embedder,
            cache: EmbeddingCache::new(EMBEDDING_CACHE_ENTRIES),
            chunker: TextChunker::new(rag.chunk_size, rag.chunk_overlap),
            default_max_node_count: rag.default_max_node_count,
        }
    }

    async fn embed_cached(&self, text: &str) -> Result<Vec<f32>> {
        let key = self.cache.compute_key(text, self.embedder.model_id());
        if let Some(embedding) = self.cache.get(&key) {
            return Ok(embedding);
        }

        let embedding = self.embedder.embed(text).await?;
        self.cache.set(&key, embedding.clone());
        Ok(embedding)
    }

    /// Chunk, embed, and store documents under `index_name`, creating the
    /// index on first use. Returns the id assigned to each document.
    ///
    /// Indexing an empty document list still creates the index.
    pub async fn index_documents(
        &self,
        index_name: &str,
        documents: &[Document],
    ) -> Result<Vec<String>> {
        if index_name.is_empty() {
            return Err(AppError::InvalidInput("Index name required".into()));
        }

        let start = Instant::now();

        if !self.store.index_exists(index_name).await? {
            self.store
                .create_index(index_name, self.embedder.dimensions())
                .await?;
        }

        let mut document_ids = Vec::with_capacity(documents.len());
        let mut nodes = Vec::new();

        for document in documents {
            let doc_id = Uuid::new_v4().to_string();

            for (i, chunk) in self.chunker.chunk(&document.text).into_iter().enumerate() {
                let embedding = self.embed_cached(&chunk).await?;
                nodes.push(Node {
                    id: format!("{}_{}", doc_id, i),
                    doc_id: doc_id.clone(),
                    content: chunk,
                    metadata: document.metadata.clone(),
                    created_at: chrono::Utc::now(),
                    embedding: Some(embedding),
                });
            }

            document_ids.push(doc_id);
        }

        let node_count = self.store.upsert(index_name, &nodes).await?;

        tracing::info!(
            index = %index_name,
            documents = documents.len(),
            nodes = node_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Documents indexed"
        );

        Ok(document_ids)
    }

    /// Retrieve the nodes most similar to `query` from `index_name`.
    ///
    /// Returns at most `max_node_count` results (the configured default when
    /// omitted), so `count <= max_node_count` always holds.
    pub async fn retrieve(
        &self,
        index_name: &str,
        query: &str,
        max_node_count: Option<usize>,
    ) -> Result<RetrieveResponse> {
        let start = Instant::now();
        let limit = max_node_count.unwrap_or(self.default_max_node_count);

        let embedding = self.embed_cached(query).await?;
        let matches = self.store.search(index_name, &embedding, limit).await?;

        let results: Vec<NodeResult> = matches
            .into_iter()
            .map(|m| NodeResult {
                doc_id: m.node.doc_id,
                node_id: m.node.id,
                text: m.node.content,
                score: m.score,
                metadata: m.node.metadata,
            })
            .collect();

        tracing::info!(
            index = %index_name,
            limit = limit,
            results = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Retrieve completed"
        );

        let count = results.len();
        Ok(RetrieveResponse {
            query: query.to_string(),
            results,
            count,
        })
    }

    /// List all indexes.
    pub async fn list_indexes(&self) -> Result<Vec<IndexInfo>> {
        self.store.list_indexes().await
    }

    /// List the stored chunks of an index.
    pub async fn list_documents(&self, index_name: &str) -> Result<Vec<IndexedDocument>> {
        let nodes = self.store.list_nodes(index_name).await?;
        Ok(nodes
            .into_iter()
            .map(|node| IndexedDocument {
                doc_id: node.doc_id,
                node_id: node.id,
                text: node.content,
                metadata: node.metadata,
            })
            .collect())
    }

    /// Delete an index. Returns the number of nodes removed.
    pub async fn delete_index(&self, index_name: &str) -> Result<usize> {
        let removed = self.store.delete_index(index_name).await?;
        tracing::info!(index = %index_name, nodes = removed, "Index deleted");
        Ok(removed)
    }

    /// Embedding cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
