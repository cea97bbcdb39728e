//! K-core of the visible subgraph
//!
//! The k-core is the maximal subgraph in which every node has at least `k`
//! neighbors inside the subgraph. Uses the undirected view (edge u->v is
//! treated as u--v) and peels whole rounds of low-degree nodes until nothing
//! changes; the fixpoint does not depend on peeling order.

use crate::graph::GraphStore;
use crate::projection::UndirectedProjection;
use serde::Serialize;
use std::collections::BTreeSet;

/// Nodes and undirected edges of one k-core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KCoreResult {
    pub k: usize,

    /// Core members in ascending id order
    pub nodes: Vec<String>,

    /// Each undirected edge once, as (smaller id, larger id), ascending
    pub edges: Vec<(String, String)>,
}

impl KCoreResult {
    fn empty(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_set(&self) -> BTreeSet<String> {
        self.nodes.iter().cloned().collect()
    }
}

/// K-core engine (stateless)
#[derive(Debug, Default, Clone, Copy)]
pub struct KCoreEngine;

impl KCoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the k-core. `k == 0` or an empty overlay gives an empty result.
    pub fn compute(&self, store: &GraphStore, k: usize) -> KCoreResult {
        if k < 1 || store.visible_node_count() == 0 {
            return KCoreResult::empty(k);
        }

        let projection = UndirectedProjection::from_visible(store);
        let n = projection.len();
        let mut remaining = vec![true; n];

        loop {
            let to_remove: Vec<usize> = (0..n)
                .filter(|&u| remaining[u])
                .filter(|&u| {
                    let degree = projection
                        .neighbors(u)
                        .iter()
                        .filter(|&&v| remaining[v])
                        .count();
                    degree < k
                })
                .collect();

            if to_remove.is_empty() {
                break;
            }

            for u in to_remove {
                remaining[u] = false;
            }
        }

        // Pair key (min, max) deduplicates the symmetric adjacency
        let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
        for u in (0..n).filter(|&u| remaining[u]) {
            for &v in projection.neighbors(u) {
                if remaining[v] {
                    pairs.insert((u.min(v), u.max(v)));
                }
            }
        }

        // Indices follow ascending id order, so both lists come out sorted
        let nodes = (0..n)
            .filter(|&u| remaining[u])
            .map(|u| projection.id(u).to_string())
            .collect();

        let edges = pairs
            .into_iter()
            .map(|(u, v)| (projection.id(u).to_string(), projection.id(v).to_string()))
            .collect();

        KCoreResult { k, nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citegraph_common::Paper;
    use std::collections::HashMap;

    fn paper(id: &str, refs: &[&str]) -> Paper {
        Paper::new(id, refs.iter().map(|r| r.to_string()).collect())
    }

    fn visible_store(papers: Vec<Paper>) -> GraphStore {
        let ids: Vec<String> = papers.iter().map(|p| p.id.clone()).collect();
        let mut store = GraphStore::from_papers(papers);
        store.add_visible_many(ids);
        store
    }

    /// Triangle A-B-C with a tail C-D and an isolated E
    fn triangle_with_tail() -> GraphStore {
        visible_store(vec![
            paper("A", &["B"]),
            paper("B", &["C"]),
            paper("C", &["A", "D"]),
            paper("D", &[]),
            paper("E", &[]),
        ])
    }

    fn assert_fixpoint(result: &KCoreResult) {
        let mut degree: HashMap<&str, usize> = HashMap::new();
        for (a, b) in &result.edges {
            *degree.entry(a.as_str()).or_default() += 1;
            *degree.entry(b.as_str()).or_default() += 1;
        }
        for node in &result.nodes {
            assert!(
                degree.get(node.as_str()).copied().unwrap_or(0) >= result.k,
                "{} has degree below {}",
                node,
                result.k
            );
        }
    }

    #[test]
    fn test_two_nodes_one_edge() {
        let store = visible_store(vec![paper("A", &["B"]), paper("B", &[])]);
        let result = KCoreEngine::new().compute(&store, 1);

        assert_eq!(result.nodes, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(result.edges, vec![("A".to_string(), "B".to_string())]);
    }

    #[test]
    fn test_mutual_citation_single_edge() {
        let store = visible_store(vec![paper("A", &["B"]), paper("B", &["A"])]);
        let result = KCoreEngine::new().compute(&store, 1);
        assert_eq!(result.edge_count(), 1);
    }

    #[test]
    fn test_one_core_drops_isolated() {
        let result = KCoreEngine::new().compute(&triangle_with_tail(), 1);
        assert_eq!(result.nodes, vec!["A", "B", "C", "D"]);
        assert_eq!(result.edge_count(), 4);
        assert_fixpoint(&result);
    }

    #[test]
    fn test_two_core_is_triangle() {
        let result = KCoreEngine::new().compute(&triangle_with_tail(), 2);
        assert_eq!(result.nodes, vec!["A", "B", "C"]);
        assert_eq!(
            result.edges,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
        assert_fixpoint(&result);
    }

    #[test]
    fn test_three_core_empty() {
        let result = KCoreEngine::new().compute(&triangle_with_tail(), 3);
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
        assert_eq!(result.k, 3);
    }

    #[test]
    fn test_cascading_peel() {
        // Path A-B-C-D: removing the ends exposes the middle in the next round
        let store = visible_store(vec![
            paper("A", &["B"]),
            paper("B", &["C"]),
            paper("C", &["D"]),
            paper("D", &[]),
        ]);
        let result = KCoreEngine::new().compute(&store, 2);
        assert!(result.nodes.is_empty());
    }

    #[test]
    fn test_zero_k_and_empty_overlay() {
        let store = triangle_with_tail();
        assert_eq!(KCoreEngine::new().compute(&store, 0), KCoreResult::empty(0));

        let hidden = GraphStore::from_papers(vec![paper("A", &["B"]), paper("B", &[])]);
        let result = KCoreEngine::new().compute(&hidden, 1);
        assert!(result.nodes.is_empty());
    }

    #[test]
    fn test_serializes_edges_as_pairs() {
        let store = visible_store(vec![paper("A", &["B"]), paper("B", &[])]);
        let result = KCoreEngine::new().compute(&store, 1);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["k"], 1);
        assert_eq!(json["nodes"], serde_json::json!(["A", "B"]));
        assert_eq!(json["edges"], serde_json::json!([["A", "B"]]));
    }

    #[test]
    fn test_hidden_neighbors_do_not_count() {
        let mut store = GraphStore::from_papers(vec![
            paper("A", &["B", "C"]),
            paper("B", &["C"]),
            paper("C", &[]),
        ]);
        store.add_visible_many(["A", "B"]);

        let result = KCoreEngine::new().compute(&store, 2);
        assert!(result.nodes.is_empty());

        let result = KCoreEngine::new().compute(&store, 1);
        assert_eq!(result.nodes, vec!["A", "B"]);
        assert_fixpoint(&result);
    }
}
