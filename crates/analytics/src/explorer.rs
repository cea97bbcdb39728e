//! Exploration session
//!
//! Owns the graph store, the engines and the state a user builds up while
//! exploring: the selected paper, the nodes added by the last action, and the
//! last betweenness or k-core result (only one of the two is kept at a time).

use crate::betweenness::BetweennessEngine;
use crate::graph::GraphStore;
use crate::hindex::{HIndexEngine, HIndexResult};
use crate::kcore::{KCoreEngine, KCoreResult};
use citegraph_common::Paper;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Outcome of an h-index request
#[derive(Debug, Clone, PartialEq)]
pub struct HIndexReport {
    pub result: HIndexResult,

    /// Core members that were not visible before the request
    pub new_nodes: usize,
}

/// Graph store plus session state
#[derive(Debug, Default)]
pub struct Explorer {
    store: GraphStore,
    betweenness: BetweennessEngine,
    kcore: KCoreEngine,
    hindex: HIndexEngine,
    selected: Option<String>,
    newly_added: BTreeSet<String>,
    last_betweenness: Option<BTreeMap<String, f64>>,
    last_kcore: Option<KCoreResult>,
}

impl Explorer {
    /// Build a session over a freshly loaded corpus
    pub fn new(papers: Vec<Paper>) -> Self {
        Self::from_store(GraphStore::from_papers(papers))
    }

    pub fn from_store(store: GraphStore) -> Self {
        Self {
            store,
            ..Default::default()
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn newly_added(&self) -> &BTreeSet<String> {
        &self.newly_added
    }

    pub fn last_betweenness(&self) -> Option<&BTreeMap<String, f64>> {
        self.last_betweenness.as_ref()
    }

    pub fn last_kcore(&self) -> Option<&KCoreResult> {
        self.last_kcore.as_ref()
    }

    /// Put a paper on the canvas by id or short id.
    ///
    /// The paper becomes the only newly added node. Returns `None` when the
    /// query resolves to nothing; the session is left untouched then.
    pub fn select(&mut self, query: &str) -> Option<Paper> {
        let paper = self.store.resolve(query)?.clone();

        self.newly_added.clear();
        self.newly_added.insert(paper.id.clone());
        self.store.add_visible(&paper.id);

        info!(paper_id = %paper.id, short_id = %paper.short_id(), "Paper selected");
        Some(paper)
    }

    /// Compute the h-index of a paper and import its h-core.
    ///
    /// The paper becomes the selected node. Core members that were hidden are
    /// added to the overlay and become the newly added set; the paper itself
    /// is not added.
    pub fn h_index(&mut self, query: &str) -> Option<HIndexReport> {
        let paper_id = self.store.resolve(query)?.id.clone();
        let result = self.hindex.compute(&self.store, &paper_id);

        self.newly_added.clear();
        for core_id in &result.h_core {
            if self.store.add_visible(core_id) {
                self.newly_added.insert(core_id.clone());
            }
        }

        info!(
            paper_id = %paper_id,
            h_index = result.h_index,
            h_median = result.h_median,
            new_nodes = self.newly_added.len(),
            "H-index computed"
        );

        self.selected = Some(paper_id);

        Some(HIndexReport {
            new_nodes: self.newly_added.len(),
            result,
        })
    }

    /// Score the visible nodes and remember the scores. Forgets the last k-core.
    pub fn betweenness(&mut self) -> &BTreeMap<String, f64> {
        let scores = self.betweenness.compute(&self.store);
        info!(nodes = scores.len(), "Betweenness computed");

        self.last_kcore = None;
        self.last_betweenness.insert(scores)
    }

    /// Compute and remember the k-core. Forgets the last betweenness scores.
    pub fn k_core(&mut self, k: usize) -> &KCoreResult {
        let result = self.kcore.compute(&self.store, k);
        info!(
            k,
            nodes = result.node_count(),
            edges = result.edge_count(),
            "K-core computed"
        );

        self.last_betweenness = None;
        self.last_kcore.insert(result)
    }

    /// Empty the overlay and forget all session state
    pub fn clear(&mut self) {
        self.store.clear_visible();
        self.newly_added.clear();
        self.selected = None;
        self.last_betweenness = None;
        self.last_kcore = None;

        info!("Exploration cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, refs: &[&str]) -> Paper {
        Paper::new(id, refs.iter().map(|r| r.to_string()).collect())
    }

    /// T is cited by C1 and C2; C1 is cited twice, C2 once
    fn explorer() -> Explorer {
        Explorer::new(vec![
            paper("https://openalex.org/T", &[]),
            paper("https://openalex.org/C1", &["https://openalex.org/T"]),
            paper("https://openalex.org/C2", &["https://openalex.org/T"]),
            paper("https://openalex.org/X1", &["https://openalex.org/C1", "https://openalex.org/C2"]),
            paper("https://openalex.org/X2", &["https://openalex.org/C1"]),
        ])
    }

    #[test]
    fn test_select_by_short_id() {
        let mut explorer = explorer();
        let paper = explorer.select("t").unwrap();

        assert_eq!(paper.id, "https://openalex.org/T");
        assert!(explorer.store().is_visible("https://openalex.org/T"));
        assert_eq!(explorer.newly_added().len(), 1);
        assert!(explorer.selected().is_none());
    }

    #[test]
    fn test_select_replaces_newly_added() {
        let mut explorer = explorer();
        explorer.select("T").unwrap();
        explorer.select("C1").unwrap();

        let added: Vec<&str> = explorer.newly_added().iter().map(String::as_str).collect();
        assert_eq!(added, vec!["https://openalex.org/C1"]);
        assert_eq!(explorer.store().visible_node_count(), 2);
    }

    #[test]
    fn test_select_unknown_leaves_session_untouched() {
        let mut explorer = explorer();
        explorer.select("T").unwrap();

        assert!(explorer.select("nope").is_none());
        assert_eq!(explorer.newly_added().len(), 1);
        assert_eq!(explorer.store().visible_node_count(), 1);
    }

    #[test]
    fn test_h_index_imports_core() {
        let mut explorer = explorer();
        explorer.select("T").unwrap();

        let report = explorer.h_index("T").unwrap();
        assert_eq!(report.result.h_index, 1);
        assert_eq!(report.result.h_core, vec!["https://openalex.org/C1"]);
        assert_eq!(report.new_nodes, 1);

        assert_eq!(explorer.selected(), Some("https://openalex.org/T"));
        assert!(explorer.store().is_visible("https://openalex.org/C1"));
        assert!(explorer.newly_added().contains("https://openalex.org/C1"));
    }

    #[test]
    fn test_h_index_does_not_add_the_paper_itself() {
        let mut explorer = explorer();
        explorer.h_index("T").unwrap();
        assert!(!explorer.store().is_visible("https://openalex.org/T"));
    }

    #[test]
    fn test_h_index_already_visible_core_adds_nothing() {
        let mut explorer = explorer();
        explorer.select("C1").unwrap();

        let report = explorer.h_index("T").unwrap();
        assert_eq!(report.new_nodes, 0);
        assert!(explorer.newly_added().is_empty());
    }

    #[test]
    fn test_betweenness_and_kcore_replace_each_other() {
        let mut explorer = explorer();
        explorer.select("T").unwrap();
        explorer.select("C1").unwrap();

        explorer.k_core(1);
        assert!(explorer.last_kcore().is_some());

        let scores = explorer.betweenness();
        assert_eq!(scores.len(), 2);
        assert!(explorer.last_kcore().is_none());
        assert!(explorer.last_betweenness().is_some());

        let core = explorer.k_core(1);
        assert_eq!(core.node_count(), 2);
        assert!(explorer.last_betweenness().is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut explorer = explorer();
        explorer.h_index("T").unwrap();
        explorer.betweenness();

        explorer.clear();
        assert_eq!(explorer.store().visible_node_count(), 0);
        assert!(explorer.newly_added().is_empty());
        assert!(explorer.selected().is_none());
        assert!(explorer.last_betweenness().is_none());
        assert!(explorer.last_kcore().is_none());

        explorer.clear();
        assert_eq!(explorer.store().visible_node_count(), 0);
    }
}
