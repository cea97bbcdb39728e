//! Visualization views of the exploration session
//!
//! Turns the explorer state into the node/edge lists the web page draws and
//! the summary numbers shown next to it.

use citegraph_analytics::{Explorer, GraphStore};
use citegraph_common::Paper;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const SELECTED_COLOR: &str = "#E74C3C";
pub const KCORE_COLOR: &str = "#9B59B6";
pub const NEW_NODE_COLOR: &str = "#F39C12";
pub const DEFAULT_COLOR: &str = "#95A5A6";
pub const NEW_EDGE_COLOR: &str = "#E67E22";

const BASE_NODE_SIZE: u32 = 15;
const NODE_SIZE_RANGE: f64 = 25.0;

/// Visible subgraph in vis-network shape
#[derive(Debug, Serialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    /// Tooltip text
    pub title: String,
    pub color: &'static str,
    pub size: u32,
}

#[derive(Debug, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub color: &'static str,
    pub arrows: &'static str,
    pub width: f64,
}

/// Visible-scope summary
#[derive(Debug, Serialize)]
pub struct StatsView {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub visible_nodes: usize,
    pub visible_edges: usize,
    pub total_given: usize,
    pub total_received: usize,
    pub max_cited_id: String,
    pub max_cited_count: usize,
    pub max_cited_title: String,
    pub max_ref_id: String,
    pub max_ref_count: usize,
    pub max_ref_title: String,
}

/// Whole-corpus extremes
#[derive(Debug, Serialize)]
pub struct GlobalStatsView {
    pub global_max_cited_id: String,
    pub global_max_cited_count: usize,
    pub global_max_cited_title: String,
    pub global_max_ref_id: String,
    pub global_max_ref_count: usize,
    pub global_max_ref_title: String,
}

/// Build the drawable graph from the current session
pub fn graph_view(explorer: &Explorer) -> GraphView {
    let store = explorer.store();
    let newly_added = explorer.newly_added();
    let kcore: Option<BTreeSet<String>> = explorer.last_kcore().map(|core| core.node_set());
    let in_kcore = |id: &str| kcore.as_ref().is_some_and(|core| core.contains(id));

    let max_score = explorer
        .last_betweenness()
        .map(|scores| scores.values().copied().fold(0.0f64, f64::max))
        .unwrap_or(0.0);

    let nodes = store
        .visible_papers()
        .map(|paper| {
            let id = paper.id.as_str();

            let color = if explorer.selected() == Some(id) {
                SELECTED_COLOR
            } else if in_kcore(id) {
                KCORE_COLOR
            } else if newly_added.contains(id) {
                NEW_NODE_COLOR
            } else {
                DEFAULT_COLOR
            };

            NodeView {
                id: paper.id.clone(),
                label: format!("[{}]\n{}", store.visible_in_degree(id), paper.short_id()),
                title: tooltip(store, paper),
                color,
                size: node_size(explorer.last_betweenness(), id, max_score),
            }
        })
        .collect();

    // Out-neighbor sets are already deduplicated
    let mut edges = Vec::new();
    for from in store.visible_ids() {
        for to in store.out_neighbors(from) {
            if !store.is_visible(to) {
                continue;
            }

            let (color, width) = if in_kcore(from) && in_kcore(to.as_str()) {
                (KCORE_COLOR, 2.0)
            } else if newly_added.contains(from) || newly_added.contains(to.as_str()) {
                (NEW_EDGE_COLOR, 1.5)
            } else {
                (DEFAULT_COLOR, 1.0)
            };

            edges.push(EdgeView {
                from: from.to_string(),
                to: to.clone(),
                color,
                arrows: "to",
                width,
            });
        }
    }

    GraphView { nodes, edges }
}

fn node_size(scores: Option<&BTreeMap<String, f64>>, id: &str, max_score: f64) -> u32 {
    match scores.and_then(|scores| scores.get(id)) {
        Some(&score) if max_score > 0.0 => {
            BASE_NODE_SIZE + (NODE_SIZE_RANGE * score / max_score).floor() as u32
        }
        _ => BASE_NODE_SIZE,
    }
}

fn tooltip(store: &GraphStore, paper: &Paper) -> String {
    format!(
        "ID: {}\nAuthors: {}\n{}\nYear: {}\nCitations: {}\nReferences: {}",
        paper.short_id(),
        paper.authors_text(),
        paper.short_title(),
        paper.year,
        store.visible_in_degree(&paper.id),
        store.visible_out_degree(&paper.id),
    )
}

/// Summary of the visible overlay
pub fn stats_view(store: &GraphStore) -> StatsView {
    let total_given = store.visible_ids().map(|id| store.visible_out_degree(id)).sum();
    let total_received = store.visible_ids().map(|id| store.visible_in_degree(id)).sum();

    let (max_cited_id, max_cited_count, max_cited_title) = summary(store.most_cited_visible());
    let (max_ref_id, max_ref_count, max_ref_title) = summary(store.most_referencing_visible());

    StatsView {
        total_nodes: store.node_count(),
        total_edges: store.edge_count(),
        visible_nodes: store.visible_node_count(),
        visible_edges: store.visible_edge_count(),
        total_given,
        total_received,
        max_cited_id,
        max_cited_count,
        max_cited_title,
        max_ref_id,
        max_ref_count,
        max_ref_title,
    }
}

/// Most cited and most referencing papers of the whole corpus
pub fn global_stats_view(store: &GraphStore) -> GlobalStatsView {
    let (global_max_cited_id, global_max_cited_count, global_max_cited_title) =
        summary(store.most_cited_global());
    let (global_max_ref_id, global_max_ref_count, global_max_ref_title) =
        summary(store.most_referencing_global());

    GlobalStatsView {
        global_max_cited_id,
        global_max_cited_count,
        global_max_cited_title,
        global_max_ref_id,
        global_max_ref_count,
        global_max_ref_title,
    }
}

/// (short id, count, short title), or ("-", 0, "") when absent
fn summary(entry: Option<(&Paper, usize)>) -> (String, usize, String) {
    match entry {
        Some((paper, count)) => (paper.short_id().to_string(), count, paper.short_title()),
        None => ("-".to_string(), 0, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, refs: &[&str]) -> Paper {
        Paper::new(
            format!("https://openalex.org/{}", id),
            refs.iter().map(|r| format!("https://openalex.org/{}", r)).collect(),
        )
    }

    /// Path A -> B -> C plus a hidden D citing A
    fn explorer() -> Explorer {
        let mut explorer = Explorer::new(vec![
            paper("A", &["B"]),
            paper("B", &["C"]),
            paper("C", &[]),
            paper("D", &["A"]),
        ]);
        explorer.select("A");
        explorer.select("B");
        explorer.select("C");
        explorer
    }

    fn node<'a>(view: &'a GraphView, short_id: &str) -> &'a NodeView {
        let id = format!("https://openalex.org/{}", short_id);
        view.nodes.iter().find(|n| n.id == id).unwrap()
    }

    #[test]
    fn test_nodes_and_edges_only_visible() {
        let view = graph_view(&explorer());
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.edges.len(), 2);
        assert!(view.edges.iter().all(|e| e.arrows == "to"));
    }

    #[test]
    fn test_label_and_tooltip() {
        let view = graph_view(&explorer());
        let b = node(&view, "B");
        assert_eq!(b.label, "[1]\nB");
        assert!(b.title.starts_with("ID: B\nAuthors: Unknown\n"));
        assert!(b.title.ends_with("Citations: 1\nReferences: 1"));
    }

    #[test]
    fn test_colors_follow_precedence() {
        let mut explorer = explorer();
        let view = graph_view(&explorer);
        // Only C was added by the last selection
        assert_eq!(node(&view, "C").color, NEW_NODE_COLOR);
        assert_eq!(node(&view, "A").color, DEFAULT_COLOR);

        explorer.k_core(1);
        explorer.h_index("B");
        let view = graph_view(&explorer);
        assert_eq!(node(&view, "B").color, SELECTED_COLOR);
        assert_eq!(node(&view, "A").color, KCORE_COLOR);
        assert!(view.edges.iter().all(|e| e.color == KCORE_COLOR && e.width == 2.0));
    }

    #[test]
    fn test_new_node_edges_highlighted() {
        let view = graph_view(&explorer());
        let into_c = view
            .edges
            .iter()
            .find(|e| e.to.ends_with("/C"))
            .unwrap();
        assert_eq!(into_c.color, NEW_EDGE_COLOR);
        assert_eq!(into_c.width, 1.5);

        let a_to_b = view.edges.iter().find(|e| e.from.ends_with("/A")).unwrap();
        assert_eq!(a_to_b.color, DEFAULT_COLOR);
        assert_eq!(a_to_b.width, 1.0);
    }

    #[test]
    fn test_sizes_scale_with_betweenness() {
        let mut explorer = explorer();
        assert!(graph_view(&explorer).nodes.iter().all(|n| n.size == 15));

        explorer.betweenness();
        let view = graph_view(&explorer);
        assert_eq!(node(&view, "B").size, 40);
        assert_eq!(node(&view, "A").size, 15);
    }

    #[test]
    fn test_stats() {
        let explorer = explorer();
        let stats = stats_view(explorer.store());

        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.visible_nodes, 3);
        assert_eq!(stats.visible_edges, 2);
        assert_eq!(stats.total_given, 2);
        assert_eq!(stats.total_received, 2);
        // B and C tie on one visible citation; ascending id keeps B
        assert_eq!(stats.max_cited_id, "B");
        assert_eq!(stats.max_ref_id, "A");
    }

    #[test]
    fn test_stats_empty_overlay() {
        let explorer = Explorer::new(vec![paper("A", &[])]);
        let stats = stats_view(explorer.store());
        assert_eq!(stats.max_cited_id, "-");
        assert_eq!(stats.max_cited_count, 0);
        assert_eq!(stats.max_cited_title, "");
    }

    #[test]
    fn test_global_stats() {
        let explorer = explorer();
        let global = global_stats_view(explorer.store());
        // A, B and C are each cited once; ascending id keeps A
        assert_eq!(global.global_max_cited_id, "A");
        assert_eq!(global.global_max_cited_count, 1);
        assert_eq!(global.global_max_ref_id, "A");
    }
}
