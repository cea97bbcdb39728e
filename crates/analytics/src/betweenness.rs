//! Betweenness centrality
//!
//! Measures how often a visible paper lies on shortest paths between other
//! visible papers, using Brandes' algorithm on the undirected projection.
//! Complexity: O(V*E) for V visible nodes and E visible undirected edges.
//!
//! Sources and neighbors are visited in ascending id order and the sources
//! are processed sequentially, so repeated runs give bit-identical scores.

use crate::graph::GraphStore;
use crate::projection::UndirectedProjection;
use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};

/// Betweenness engine (stateless)
#[derive(Debug, Default, Clone, Copy)]
pub struct BetweennessEngine;

impl BetweennessEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score every visible node. Fewer than two visible nodes yields zeros.
    pub fn compute(&self, store: &GraphStore) -> BTreeMap<String, f64> {
        let projection = UndirectedProjection::from_visible(store);
        let n = projection.len();

        let mut bc = vec![0.0f64; n];

        if n >= 2 {
            for s in 0..n {
                single_source_betweenness(&projection, s, &mut bc);
            }

            // Each unordered pair was counted once from either endpoint
            for score in &mut bc {
                *score /= 2.0;
            }
        }

        projection
            .ids()
            .iter()
            .cloned()
            .zip(bc)
            .collect()
    }
}

/// Single-source dependency accumulation (one Brandes pass).
fn single_source_betweenness(projection: &UndirectedProjection, source: usize, bc: &mut [f64]) {
    let n = projection.len();

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut pred: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0f64; n];

    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in projection.neighbors(v) {
            // First visit to w
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }

            // v is on a shortest path to w
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                pred[w].push(v);
            }
        }
    }

    // The BFS stack popped in reverse is non-increasing in distance
    while let Some(w) = stack.pop() {
        for &v in &pred[w] {
            delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
        }

        if w != source {
            bc[w] += delta[w];
        }
    }
}

/// Highest scores first, ties by ascending id, at most `limit` entries
pub fn top_scores(scores: &BTreeMap<String, f64>, limit: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores
        .iter()
        .map(|(id, &score)| (id.clone(), score))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    ranked.truncate(limit);
    ranked
}
