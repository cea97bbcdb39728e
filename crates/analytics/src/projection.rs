//! Undirected view of the visible subgraph
//!
//! Betweenness and k-core ignore citation direction. Instead of touching the
//! directed store, they work on this index-based projection: visible ids are
//! numbered in ascending order and every citation between two visible papers
//! becomes a symmetric pair. Neighbor lists are sorted, so traversals over the
//! projection are deterministic.

use crate::graph::GraphStore;
use std::collections::HashMap;

/// Symmetric adjacency over the visible nodes
#[derive(Debug, Clone, Default)]
pub struct UndirectedProjection {
    ids: Vec<String>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl UndirectedProjection {
    /// Project the visible induced subgraph of `store`
    pub fn from_visible(store: &GraphStore) -> Self {
        let ids: Vec<String> = store.visible_ids().map(str::to_string).collect();
        let index: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];

        for (u, id) in ids.iter().enumerate() {
            for target in store.out_neighbors(id) {
                if let Some(&v) = index.get(target.as_str()) {
                    // A paper citing itself is not its own neighbor
                    if u != v {
                        adjacency[u].push(v);
                        adjacency[v].push(u);
                    }
                }
            }
        }

        let mut endpoints = 0;
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
            endpoints += neighbors.len();
        }

        Self {
            ids,
            adjacency,
            edge_count: endpoints / 2,
        }
    }

    /// Number of projected nodes
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of node `index`
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Sorted neighbors of node `index`
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
