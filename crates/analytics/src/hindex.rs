//! H-index of a single paper
//!
//! The citing papers are ranked by how often *they* are cited across the
//! whole corpus; the h-index is the largest rank `h` whose paper has at least
//! `h` citations.
//!
//! Citing papers are taken from the visible overlay. When none of them is
//! visible yet, every citing paper in the corpus is used instead, so a freshly
//! selected paper does not report a degenerate zero. This mixes scopes on
//! purpose: the visible set, once it holds any citing paper, fully decides
//! which citing papers count.

use crate::graph::GraphStore;
use serde::Serialize;

/// H-index, h-core and h-median of one paper
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HIndexResult {
    pub paper_id: String,
    pub h_index: usize,

    /// Top `h_index` citing papers, most cited first
    pub h_core: Vec<String>,

    /// Global citation counts parallel to `h_core`
    pub h_core_citations: Vec<usize>,

    pub h_median: f64,
}

/// H-index engine (stateless)
#[derive(Debug, Default, Clone, Copy)]
pub struct HIndexEngine;

impl HIndexEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute for `paper_id`. Unknown ids give a zero result.
    pub fn compute(&self, store: &GraphStore, paper_id: &str) -> HIndexResult {
        let mut result = HIndexResult {
            paper_id: paper_id.to_string(),
            ..Default::default()
        };

        if !store.contains(paper_id) {
            return result;
        }

        let citing = store.in_neighbors(paper_id);
        let mut citing_ids: Vec<&String> = citing.iter().filter(|id| store.is_visible(id)).collect();

        if citing_ids.is_empty() {
            citing_ids = citing.iter().collect();
        }

        let mut counts: Vec<(&String, usize)> = citing_ids
            .into_iter()
            .map(|id| (id, store.global_in_degree(id)))
            .collect();

        // Most cited first; equal counts by ascending id
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let h_index = counts
            .iter()
            .enumerate()
            .take_while(|(rank, (_, citations))| *citations > *rank)
            .count();

        result.h_index = h_index;
        result.h_core = counts[..h_index].iter().map(|(id, _)| (*id).clone()).collect();
        result.h_core_citations = counts[..h_index].iter().map(|(_, c)| *c).collect();
        result.h_median = h_median(&result.h_core_citations);

        result
    }
}

/// Median of citation counts; mean of the middle pair for even lengths
pub fn h_median(citations: &[usize]) -> f64 {
    if citations.is_empty() {
        return 0.0;
    }

    let mut sorted = citations.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citegraph_common::Paper;

    fn paper(id: &str, refs: &[&str]) -> Paper {
        Paper::new(id, refs.iter().map(|r| r.to_string()).collect())
    }

    /// T is cited by C1, C2, C3. C1 is cited 3 times, C2 twice, C3 never.
    fn corpus() -> Vec<Paper> {
        vec![
            paper("T", &[]),
            paper("C1", &["T"]),
            paper("C2", &["T"]),
            paper("C3", &["T"]),
            paper("X1", &["C1", "C2"]),
            paper("X2", &["C1", "C2"]),
            paper("X3", &["C1"]),
        ]
    }

    #[test]
    fn test_median() {
        assert_eq!(h_median(&[5, 3]), 4.0);
        assert_eq!(h_median(&[7, 5, 3]), 5.0);
        assert_eq!(h_median(&[]), 0.0);
        assert_eq!(h_median(&[2]), 2.0);
    }

    #[test]
    fn test_global_fallback_when_no_citing_paper_visible() {
        let mut store = GraphStore::from_papers(corpus());
        store.add_visible("T");

        let result = HIndexEngine::new().compute(&store, "T");
        // Ranked: C1 (3), C2 (2), C3 (0) -> h = 2
        assert_eq!(result.h_index, 2);
        assert_eq!(result.h_core, vec!["C1", "C2"]);
        assert_eq!(result.h_core_citations, vec![3, 2]);
        assert_eq!(result.h_median, 2.5);
    }

    #[test]
    fn test_visible_citing_papers_take_precedence() {
        let mut store = GraphStore::from_papers(corpus());
        store.add_visible("C2");

        let result = HIndexEngine::new().compute(&store, "T");
        // Only C2 counts, with its global count of 2
        assert_eq!(result.h_index, 1);
        assert_eq!(result.h_core, vec!["C2"]);
        assert_eq!(result.h_core_citations, vec![2]);
        assert_eq!(result.h_median, 2.0);
    }

    #[test]
    fn test_uses_global_counts_not_visible_counts() {
        let mut store = GraphStore::from_papers(corpus());
        // X papers citing C1/C2 stay hidden
        store.add_visible_many(["C1", "C2", "C3"]);

        let result = HIndexEngine::new().compute(&store, "T");
        assert_eq!(result.h_core_citations, vec![3, 2]);
    }

    #[test]
    fn test_uncited_paper() {
        let store = GraphStore::from_papers(corpus());
        let result = HIndexEngine::new().compute(&store, "X1");

        assert_eq!(result.h_index, 0);
        assert!(result.h_core.is_empty());
        assert!(result.h_core_citations.is_empty());
        assert_eq!(result.h_median, 0.0);
    }

    #[test]
    fn test_unknown_paper() {
        let store = GraphStore::from_papers(corpus());
        let result = HIndexEngine::new().compute(&store, "missing");
        assert_eq!(result.paper_id, "missing");
        assert_eq!(result.h_index, 0);
        assert!(result.h_core.is_empty());
    }

    #[test]
    fn test_cited_only_by_uncited_papers() {
        let store = GraphStore::from_papers(vec![paper("T", &[]), paper("A", &["T"]), paper("B", &["T"])]);
        let result = HIndexEngine::new().compute(&store, "T");
        assert_eq!(result.h_index, 0);
        assert_eq!(result.h_median, 0.0);
    }

    #[test]
    fn test_ties_ordered_by_id() {
        // B and A both cited once; both cite T
        let store = GraphStore::from_papers(vec![
            paper("T", &[]),
            paper("B", &["T"]),
            paper("A", &["T"]),
            paper("Z", &["A", "B"]),
        ]);
        let result = HIndexEngine::new().compute(&store, "T");
        assert_eq!(result.h_index, 1);
        assert_eq!(result.h_core, vec!["A"]);
    }

    #[test]
    fn test_monotone_when_qualifying_citers_added() {
        let mut papers = corpus();
        let before = HIndexEngine::new().compute(&GraphStore::from_papers(papers.clone()), "T");

        // C4 cites T and is itself cited three times
        papers.push(paper("C4", &["T"]));
        papers.push(paper("Y1", &["C4"]));
        papers.push(paper("Y2", &["C4"]));
        papers.push(paper("Y3", &["C4"]));
        let after = HIndexEngine::new().compute(&GraphStore::from_papers(papers), "T");

        assert!(after.h_index >= before.h_index);
        assert_eq!(after.h_index, 2);
        assert_eq!(after.h_core, vec!["C1", "C4"]);
    }
}
