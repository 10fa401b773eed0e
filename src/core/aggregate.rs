use crate::core::{ColorConfig, FlowEdge, FlowGraph, FlowNode, FlowRecord};
use std::collections::HashMap;

/// d3's category10, assigned to nodes in order.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Folds rows sharing a (source, target) pair into one edge. Nodes and edges
/// keep the order in which they first appear.
pub fn aggregate(records: &[FlowRecord]) -> FlowGraph {
    let mut graph = FlowGraph::default();
    let mut node_index: HashMap<String, usize> = HashMap::new();
    let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();

    let mut intern = |graph: &mut FlowGraph, label: &str| -> usize {
        if let Some(&idx) = node_index.get(label) {
            return idx;
        }
        let idx = graph.nodes.len();
        graph.nodes.push(FlowNode {
            label: label.to_string(),
            color: None,
        });
        node_index.insert(label.to_string(), idx);
        idx
    };

    for record in records {
        let source = intern(&mut graph, &record.source);
        let target = intern(&mut graph, &record.target);

        match edge_index.get(&(source, target)) {
            Some(&idx) => {
                let edge = &mut graph.edges[idx];
                edge.total += &record.value;
                edge.rows += 1;
            }
            None => {
                edge_index.insert((source, target), graph.edges.len());
                graph.edges.push(FlowEdge {
                    source,
                    target,
                    total: record.value.clone(),
                    rows: 1,
                    color: None,
                });
            }
        }
    }

    for edge in graph.edges.iter().filter(|e| e.rows > 1) {
        tracing::debug!(
            "Merged {} rows for {} -> {} into {}",
            edge.rows,
            graph.label(edge.source),
            graph.label(edge.target),
            edge.total
        );
    }

    tracing::debug!(
        "Aggregated {} rows into {} edges across {} nodes",
        records.len(),
        graph.edges.len(),
        graph.nodes.len()
    );
    graph
}

/// Sets node and flow colors from the config. With `auto_colors`, nodes the
/// config leaves out take the next palette entry.
pub fn apply_colors(graph: &mut FlowGraph, config: &ColorConfig, auto_colors: bool) {
    let mut next = 0;
    for node in &mut graph.nodes {
        node.color = match config.node_color(&node.label) {
            Some(color) => Some(color.to_string()),
            None if auto_colors => {
                let color = PALETTE[next % PALETTE.len()];
                next += 1;
                Some(color.to_string())
            }
            None => None,
        };
    }

    for idx in 0..graph.edges.len() {
        let edge = &graph.edges[idx];
        let color = config
            .flow_color(graph.label(edge.source), graph.label(edge.target))
            .map(str::to_string);
        graph.edges[idx].color = color;
    }

    for flow in &config.flows {
        let known = graph.edges.iter().any(|e| {
            graph.label(e.source) == flow.source && graph.label(e.target) == flow.target
        });
        if !known {
            tracing::warn!(
                "Color configured for {} -> {} but no such flow exists",
                flow.source,
                flow.target
            );
        }
    }
}
