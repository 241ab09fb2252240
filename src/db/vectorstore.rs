//! Vector store abstraction layer.
//!
//! This module provides a unified interface for vector index operations.
//! Named indexes hold embedded document chunks ([`Node`]s) and answer
//! similarity searches with exact cosine scoring.
//!
//! # Example
//!
//! ```rust,ignore
//! use retrieva::db::{InMemoryVectorStore, VectorStore};
//!
//! let store = InMemoryVectorStore::new();
//! store.create_index("documents", 384).await?;
//! store.upsert("documents", &nodes).await?;
//! let results = store.search("documents", &query_embedding, 5).await?;
//! ```

use crate::types::{AppError, IndexInfo, Node, Result, SearchResult};
use async_trait::async_trait;

// ============================================================================
// Index Statistics
// ============================================================================

/// Statistics about a vector index.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Name of the index.
    pub name: String,
    /// Number of nodes in the index.
    pub node_count: usize,
    /// Dimensionality of vectors in the index.
    pub dimensions: usize,
    /// Distance metric used.
    pub distance_metric: &'static str,
}

// ============================================================================
// Vector Store Trait
// ============================================================================

/// Abstract trait for vector index operations.
///
/// Defines a common interface so the retrieval layer can work with different
/// storage backends interchangeably. A missing index surfaces as
/// [`AppError::NotFound`], which the API layer maps to HTTP 404.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the name of this vector store backend.
    fn backend_name(&self) -> &'static str;

    /// Create a new index with the specified vector dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the index already exists.
    async fn create_index(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Delete an index and all its nodes. Returns the number of nodes removed.
    async fn delete_index(&self, name: &str) -> Result<usize>;

    /// List all indexes in the store.
    async fn list_indexes(&self) -> Result<Vec<IndexInfo>>;

    /// Check if an index exists.
    async fn index_exists(&self, name: &str) -> Result<bool>;

    /// Get statistics about an index.
    async fn index_stats(&self, name: &str) -> Result<IndexStats>;

    /// Upsert nodes into an index.
    ///
    /// Nodes are identified by their `id` field; an existing node with the
    /// same id is replaced. Every node must carry an embedding.
    async fn upsert(&self, index: &str, nodes: &[Node]) -> Result<usize>;

    /// Search an index for the nodes most similar to `embedding`.
    ///
    /// Returns up to `limit` results sorted by similarity score, descending.
    /// Result nodes have their embeddings stripped.
    async fn search(&self, index: &str, embedding: &[f32], limit: usize)
        -> Result<Vec<SearchResult>>;

    /// List all nodes in an index, embeddings stripped.
    async fn list_nodes(&self, index: &str) -> Result<Vec<Node>>;

    /// Delete nodes by id. Returns the number of nodes actually deleted.
    async fn delete(&self, index: &str, ids: &[String]) -> Result<usize>;

    /// Get a node by id.
    async fn get(&self, index: &str, id: &str) -> Result<Option<Node>>;

    /// Count nodes in an index.
    async fn count(&self, index: &str) -> Result<usize> {
        let stats = self.index_stats(index).await?;
        Ok(stats.node_count)
    }
}

// ============================================================================
// In-Memory Vector Store
// ============================================================================

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory vector store.
///
/// Nodes live for the process lifetime only. Searches are exact cosine
/// similarity scans; suitable for the corpus sizes this service targets.
pub struct InMemoryVectorStore {
    indexes: Arc<RwLock<HashMap<String, InMemoryIndex>>>,
}

struct InMemoryIndex {
    dimensions: usize,
    nodes: HashMap<String, Node>,
}

impl InMemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self {
            indexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Calculate cosine similarity between two vectors.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }

    fn not_found(name: &str) -> AppError {
        AppError::NotFound(format!("Index '{}' not found", name))
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    async fn create_index(&self, name: &str, dimensions: usize) -> Result<()> {
        let mut indexes = self.indexes.write();
        if indexes.contains_key(name) {
            return Err(AppError::InvalidInput(format!(
                "Index '{}' already exists",
                name
            )));
        }
        indexes.insert(
            name.to_string(),
            InMemoryIndex {
                dimensions,
                nodes: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> Result<usize> {
        let mut indexes = self.indexes.write();
        let index = indexes.remove(name).ok_or_else(|| Self::not_found(name))?;
        Ok(index.nodes.len())
    }

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>> {
        let indexes = self.indexes.read();
        Ok(indexes
            .iter()
            .map(|(name, index)| IndexInfo {
                name: name.clone(),
                document_count: index.nodes.len(),
                dimensions: index.dimensions,
            })
            .collect())
    }

    async fn index_exists(&self, name: &str) -> Result<bool> {
        let indexes = self.indexes.read();
        Ok(indexes.contains_key(name))
    }

    async fn index_stats(&self, name: &str) -> Result<IndexStats> {
        let indexes = self.indexes.read();
        let index = indexes.get(name).ok_or_else(|| Self::not_found(name))?;

        Ok(IndexStats {
            name: name.to_string(),
            node_count: index.nodes.len(),
            dimensions: index.dimensions,
            distance_metric: "cosine",
        })
    }

    async fn upsert(&self, index: &str, nodes: &[Node]) -> Result<usize> {
        let mut indexes = self.indexes.write();
        let target = indexes
            .get_mut(index)
            .ok_or_else(|| Self::not_found(index))?;

        let mut count = 0;
        for node in nodes {
            if node.embedding.is_none() {
                return Err(AppError::InvalidInput(format!(
                    "Node '{}' is missing embedding",
                    node.id
                )));
            }
            target.nodes.insert(node.id.clone(), node.clone());
            count += 1;
        }

        Ok(count)
    }

    async fn search(
        &self,
        index: &str,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let indexes = self.indexes.read();
        let target = indexes.get(index).ok_or_else(|| Self::not_found(index))?;

        let mut results: Vec<SearchResult> = target
            .nodes
            .values()
            .filter_map(|node| {
                let node_embedding = node.embedding.as_ref()?;
                let score = Self::cosine_similarity(embedding, node_embedding);
                Some(SearchResult {
                    node: Node {
                        id: node.id.clone(),
                        doc_id: node.doc_id.clone(),
                        content: node.content.clone(),
                        metadata: node.metadata.clone(),
                        created_at: node.created_at,
                        embedding: None,
                    },
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn list_nodes(&self, index: &str) -> Result<Vec<Node>> {
        let indexes = self.indexes.read();
        let target = indexes.get(index).ok_or_else(|| Self::not_found(index))?;

        Ok(target
            .nodes
            .values()
            .map(|node| Node {
                id: node.id.clone(),
                doc_id: node.doc_id.clone(),
                content: node.content.clone(),
                metadata: node.metadata.clone(),
                created_at: node.created_at,
                embedding: None,
            })
            .collect())
    }

    async fn delete(&self, index: &str, ids: &[String]) -> Result<usize> {
        let mut indexes = self.indexes.write();
        let target = indexes
            .get_mut(index)
            .ok_or_else(|| Self::not_found(index))?;

        let mut count = 0;
        for id in ids {
            if target.nodes.remove(id).is_some() {
                count += 1;
            }
        }

        Ok(count)
    }

    async fn get(&self, index: &str, id: &str) -> Result<Option<Node>> {
        let indexes = self.indexes.read();
        let target = indexes.get(index).ok_or_else(|| Self::not_found(index))?;

        Ok(target.nodes.get(id).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    fn test_node(id: &str, content: &str, embedding: Vec<f32>) -> Node {
        Node {
            id: id.to_string(),
            doc_id: format!("doc_{}", id),
            content: content.to_string(),
            metadata: Metadata::new(),
            created_at: chrono::Utc::now(),
            embedding: Some(embedding),
        }
    }

    #[tokio::test]
    async fn test_create_index() {
        let store = InMemoryVectorStore::new();

        store.create_index("test", 384).await.unwrap();

        assert!(store.index_exists("test").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_index_error() {
        let store = InMemoryVectorStore::new();

        store.create_index("test", 384).await.unwrap();
        let result = store.create_index("test", 384).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_upsert_and_search() {
        let store = InMemoryVectorStore::new();
        store.create_index("test", 3).await.unwrap();

        let node1 = test_node("n1", "Hello world", vec![1.0, 0.0, 0.0]);
        let node2 = test_node("n2", "Goodbye world", vec![0.0, 1.0, 0.0]);
        let node3 = test_node("n3", "Hello again", vec![0.9, 0.1, 0.0]);

        store.upsert("test", &[node1, node2, node3]).await.unwrap();

        let results = store.search("test", &[1.0, 0.0, 0.0], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].node.id, "n1");
        assert_eq!(results[1].node.id, "n3");
        // Embeddings are stripped from results
        assert!(results[0].node.embedding.is_none());
    }

    #[tokio::test]
    async fn test_search_missing_index_is_not_found() {
        let store = InMemoryVectorStore::new();

        let result = store.search("nope", &[1.0, 0.0], 5).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upsert_without_embedding_rejected() {
        let store = InMemoryVectorStore::new();
        store.create_index("test", 3).await.unwrap();

        let mut node = test_node("n1", "no vector", vec![]);
        node.embedding = None;

        let result = store.upsert("test", &[node]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_nodes() {
        let store = InMemoryVectorStore::new();
        store.create_index("test", 3).await.unwrap();

        let node = test_node("n1", "Test", vec![1.0, 0.0, 0.0]);
        store.upsert("test", &[node]).await.unwrap();

        assert_eq!(store.count("test").await.unwrap(), 1);

        let deleted = store.delete("test", &["n1".to_string()]).await.unwrap();
        assert_eq!(deleted, 1);

        assert_eq!(store.count("test").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_index_reports_node_count() {
        let store = InMemoryVectorStore::new();
        store.create_index("test", 3).await.unwrap();
        store
            .upsert(
                "test",
                &[
                    test_node("n1", "one", vec![1.0, 0.0, 0.0]),
                    test_node("n2", "two", vec![0.0, 1.0, 0.0]),
                ],
            )
            .await
            .unwrap();

        let removed = store.delete_index("test").await.unwrap();
        assert_eq!(removed, 2);
        assert!(!store.index_exists("test").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_indexes() {
        let store = InMemoryVectorStore::new();

        store.create_index("idx1", 384).await.unwrap();
        store.create_index("idx2", 768).await.unwrap();

        let indexes = store.list_indexes().await.unwrap();
        assert_eq!(indexes.len(), 2);
    }

    #[tokio::test]
    async fn test_get() {
        let store = InMemoryVectorStore::new();
        store.create_index("test", 3).await.unwrap();

        let node = test_node("n1", "Test content", vec![1.0, 0.0, 0.0]);
        store.upsert("test", &[node]).await.unwrap();

        let retrieved = store.get("test", "n1").await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().content, "Test content");

        let missing = store.get("test", "nonexistent").await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_cosine_similarity() {
        // Identical vectors
        assert!(
            (InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 0.001
        );

        // Orthogonal vectors
        assert!(InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 0.001);

        // Opposite vectors
        assert!(
            (InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 0.001
        );
    }
}
