//! Citation graph representation
//!
//! Provides the in-memory citation graph and the visible overlay that scopes
//! every analytics call. Papers are kept in a `BTreeMap` so any iteration that
//! can decide a tie (most cited, short id lookup, search) runs in ascending id
//! order; adjacency lives in hash maps for constant-time neighbor lookup.

use citegraph_common::Paper;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

static NO_NEIGHBORS: BTreeSet<String> = BTreeSet::new();

/// In-memory citation graph plus the visible overlay
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    /// All papers keyed by id
    papers: BTreeMap<String, Paper>,

    /// Adjacency list: paper_id -> papers it cites
    outgoing: HashMap<String, BTreeSet<String>>,

    /// Reverse adjacency: paper_id -> papers citing it
    incoming: HashMap<String, BTreeSet<String>>,

    /// Number of directed citation edges
    edge_count: usize,

    /// Subset of `papers` keys currently under exploration
    visible: BTreeSet<String>,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph loaded from `papers`
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        let mut store = Self::new();
        store.load(papers);
        store
    }

    /// Replace the whole graph with `papers`.
    ///
    /// References to ids outside the corpus are dropped. When an id repeats,
    /// the later paper wins. The overlay is kept but filtered down to ids that
    /// still exist.
    pub fn load(&mut self, papers: Vec<Paper>) {
        let mut nodes: BTreeMap<String, Paper> = BTreeMap::new();
        for paper in papers {
            nodes.insert(paper.id.clone(), paper);
        }

        let mut outgoing: HashMap<String, BTreeSet<String>> = nodes
            .keys()
            .map(|id| (id.clone(), BTreeSet::new()))
            .collect();
        let mut incoming = outgoing.clone();

        let mut edge_count = 0;
        let mut dropped = 0;

        for paper in nodes.values() {
            for reference in &paper.referenced_works {
                if !nodes.contains_key(reference) {
                    dropped += 1;
                    continue;
                }
                if let Some(refs) = outgoing.get_mut(&paper.id) {
                    if refs.insert(reference.clone()) {
                        edge_count += 1;
                    }
                }
                if let Some(citing) = incoming.get_mut(reference) {
                    citing.insert(paper.id.clone());
                }
            }
        }

        self.papers = nodes;
        self.outgoing = outgoing;
        self.incoming = incoming;
        self.edge_count = edge_count;

        let papers = &self.papers;
        self.visible.retain(|id| papers.contains_key(id));

        debug!(
            nodes = self.papers.len(),
            edges = self.edge_count,
            dropped_references = dropped,
            "Citation graph loaded"
        );
    }

    /// Add one id to the overlay. Unknown ids are ignored.
    ///
    /// Returns true when the id was not visible before.
    pub fn add_visible(&mut self, id: &str) -> bool {
        if self.papers.contains_key(id) {
            self.visible.insert(id.to_string())
        } else {
            false
        }
    }

    /// Add several ids to the overlay, returning how many were new
    pub fn add_visible_many<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter(|id| self.add_visible(id.as_ref()))
            .count()
    }

    /// Empty the overlay
    pub fn clear_visible(&mut self) {
        self.visible.clear();
    }

    /// Copy of the overlay in ascending id order
    pub fn visible_nodes(&self) -> BTreeSet<String> {
        self.visible.clone()
    }

    /// Borrowing iterator over the overlay in ascending id order
    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Papers cited by `id` (full graph)
    pub fn out_neighbors(&self, id: &str) -> &BTreeSet<String> {
        self.outgoing.get(id).unwrap_or(&NO_NEIGHBORS)
    }

    /// Papers citing `id` (full graph)
    pub fn in_neighbors(&self, id: &str) -> &BTreeSet<String> {
        self.incoming.get(id).unwrap_or(&NO_NEIGHBORS)
    }

    /// Citations of `id` coming from visible papers
    pub fn visible_in_degree(&self, id: &str) -> usize {
        self.in_neighbors(id)
            .iter()
            .filter(|c| self.visible.contains(*c))
            .count()
    }

    /// References of `id` pointing at visible papers
    pub fn visible_out_degree(&self, id: &str) -> usize {
        self.out_neighbors(id)
            .iter()
            .filter(|r| self.visible.contains(*r))
            .count()
    }

    /// Citation count across the whole corpus
    pub fn global_in_degree(&self, id: &str) -> usize {
        self.in_neighbors(id).len()
    }

    /// Reference count across the whole corpus
    pub fn global_out_degree(&self, id: &str) -> usize {
        self.out_neighbors(id).len()
    }

    /// Lookup by exact id
    pub fn paper(&self, id: &str) -> Option<&Paper> {
        self.papers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.papers.contains_key(id)
    }

    /// Case-insensitive exact match on the short id; smallest id wins
    pub fn find_by_short_id(&self, short_id: &str) -> Option<&Paper> {
        let wanted = short_id.to_lowercase();
        self.papers
            .values()
            .find(|paper| paper.short_id().to_lowercase() == wanted)
    }

    /// Exact id first, then short id
    pub fn resolve(&self, id_or_short: &str) -> Option<&Paper> {
        self.paper(id_or_short)
            .or_else(|| self.find_by_short_id(id_or_short))
    }

    /// All papers in ascending id order
    pub fn papers(&self) -> impl Iterator<Item = &Paper> {
        self.papers.values()
    }

    /// Visible papers in ascending id order
    pub fn visible_papers(&self) -> impl Iterator<Item = &Paper> {
        self.visible.iter().filter_map(|id| self.papers.get(id))
    }

    /// Case-insensitive substring search over short id, title and authors
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Paper> {
        let query = query.to_lowercase();
        self.papers
            .values()
            .filter(|paper| {
                paper.short_id().to_lowercase().contains(&query)
                    || paper.title.to_lowercase().contains(&query)
                    || paper.authors_text().to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }

    /// Visible paper with the most visible citations
    pub fn most_cited_visible(&self) -> Option<(&Paper, usize)> {
        self.max_by_count(self.visible.iter(), |id| self.visible_in_degree(id))
    }

    /// Visible paper with the most visible references
    pub fn most_referencing_visible(&self) -> Option<(&Paper, usize)> {
        self.max_by_count(self.visible.iter(), |id| self.visible_out_degree(id))
    }

    /// Most cited paper in the corpus
    pub fn most_cited_global(&self) -> Option<(&Paper, usize)> {
        self.max_by_count(self.papers.keys(), |id| self.global_in_degree(id))
    }

    /// Paper with the most references in the corpus
    pub fn most_referencing_global(&self) -> Option<(&Paper, usize)> {
        self.max_by_count(self.papers.keys(), |id| self.global_out_degree(id))
    }

    // Strict `>` over ascending ids: ties keep the smallest id
    fn max_by_count<'a, I, F>(&'a self, ids: I, count: F) -> Option<(&'a Paper, usize)>
    where
        I: Iterator<Item = &'a String>,
        F: Fn(&str) -> usize,
    {
        let mut best: Option<(&'a Paper, usize)> = None;
        let mut max_count = 0;

        for id in ids {
            let c = count(id.as_str());
            if c > max_count {
                if let Some(paper) = self.papers.get(id) {
                    max_count = c;
                    best = Some((paper, c));
                }
            }
        }

        best
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.papers.len()
    }

    /// Get directed edge count
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn visible_node_count(&self) -> usize {
        self.visible.len()
    }

    /// Directed edges with both endpoints visible
    pub fn visible_edge_count(&self) -> usize {
        self.visible
            .iter()
            .map(|id| self.visible_out_degree(id))
            .sum()
    }
}
