use crate::app::formatters::{list, quote, quote_path};
use crate::core::{DataMode, Dialect, FlowGraph, Formatter, RenderOptions};
use crate::utils::error::Result;

const DEFAULT_NODE_COLOR: &str = "lightgray";
const DEFAULT_LINK_COLOR: &str = "rgba(0, 0, 0, 0.2)";

/// Python script drawing the diagram with plotly.graph_objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlotlyFormatter;

impl Formatter for PlotlyFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::Plotly
    }

    fn format(&self, graph: &FlowGraph, options: &RenderOptions) -> Result<String> {
        match options.data_mode {
            DataMode::Inline => inline_script(graph),
            DataMode::File => file_script(graph, options),
        }
    }
}

fn inline_script(graph: &FlowGraph) -> Result<String> {
    let labels = graph
        .nodes
        .iter()
        .map(|n| quote(&n.label))
        .collect::<Result<Vec<_>>>()?;

    let mut lines = vec![
        "import plotly.graph_objects as go".to_string(),
        String::new(),
        format!("labels = {}", list(&labels)),
    ];

    if graph.has_node_colors() {
        let colors = graph
            .nodes
            .iter()
            .map(|n| quote(n.color.as_deref().unwrap_or(DEFAULT_NODE_COLOR)))
            .collect::<Result<Vec<_>>>()?;
        lines.push(format!("node_colors = {}", list(&colors)));
    }

    let sources: Vec<String> = graph.edges.iter().map(|e| e.source.to_string()).collect();
    let targets: Vec<String> = graph.edges.iter().map(|e| e.target.to_string()).collect();
    let values: Vec<String> = graph.edges.iter().map(|e| e.total.to_string()).collect();
    lines.push(format!("source = {}", list(&sources)));
    lines.push(format!("target = {}", list(&targets)));
    lines.push(format!("value = {}", list(&values)));

    if graph.has_flow_colors() {
        let colors = graph
            .edges
            .iter()
            .map(|e| quote(e.color.as_deref().unwrap_or(DEFAULT_LINK_COLOR)))
            .collect::<Result<Vec<_>>>()?;
        lines.push(format!("link_colors = {}", list(&colors)));
    }

    lines.push(String::new());
    push_figure(
        &mut lines,
        graph.has_node_colors().then_some("node_colors"),
        graph.has_flow_colors().then_some("link_colors"),
    );
    Ok(lines.join("\n"))
}

fn file_script(graph: &FlowGraph, options: &RenderOptions) -> Result<String> {
    let columns = &options.columns;
    let mut lines = vec![
        "import pandas as pd".to_string(),
        "import plotly.graph_objects as go".to_string(),
        String::new(),
        format!("source_col = {}", quote(&columns.source)?),
        format!("target_col = {}", quote(&columns.target)?),
        format!("value_col = {}", quote(&columns.value)?),
        String::new(),
        "# Read the CSV file".to_string(),
        format!("data = pd.read_csv({})", quote_path(options)?),
        String::new(),
        "# Aggregate values by source and target".to_string(),
        "aggregated_data = data.groupby([source_col, target_col], sort=False, as_index=False)[value_col].sum()"
            .to_string(),
        String::new(),
        "# Create a unique list of nodes".to_string(),
        "labels = list(pd.unique(aggregated_data[[source_col, target_col]].values.ravel()))".to_string(),
        "node_indices = {node: i for i, node in enumerate(labels)}".to_string(),
        String::new(),
        "# Map source and target to indices".to_string(),
        "source = aggregated_data[source_col].map(node_indices)".to_string(),
        "target = aggregated_data[target_col].map(node_indices)".to_string(),
        "value = aggregated_data[value_col]".to_string(),
    ];

    if graph.has_node_colors() {
        let entries = graph
            .nodes
            .iter()
            .filter_map(|n| n.color.as_ref().map(|c| (n, c)))
            .map(|(n, c)| Ok(format!("{}: {}", quote(&n.label)?, quote(c)?)))
            .collect::<Result<Vec<_>>>()?;
        lines.push(String::new());
        lines.push(format!("node_color_map = {{{}}}", entries.join(", ")));
        lines.push(format!(
            "node_colors = [node_color_map.get(node, {}) for node in labels]",
            quote(DEFAULT_NODE_COLOR)?
        ));
    }

    if graph.has_flow_colors() {
        let entries = graph
            .edges
            .iter()
            .filter_map(|e| e.color.as_ref().map(|c| (e, c)))
            .map(|(e, c)| {
                Ok(format!(
                    "({}, {}): {}",
                    quote(graph.label(e.source))?,
                    quote(graph.label(e.target))?,
                    quote(c)?
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        lines.push(String::new());
        lines.push(format!("link_color_map = {{{}}}", entries.join(", ")));
        lines.push(format!(
            "link_colors = [link_color_map.get(pair, {}) for pair in zip(aggregated_data[source_col], aggregated_data[target_col])]",
            quote(DEFAULT_LINK_COLOR)?
        ));
    }

    lines.push(String::new());
    push_figure(
        &mut lines,
        graph.has_node_colors().then_some("node_colors"),
        graph.has_flow_colors().then_some("link_colors"),
    );
    Ok(lines.join("\n"))
}

/// Appends the figure; the script must already define `labels`, `source`,
/// `target`, `value` and any color lists that are passed in.
fn push_figure(lines: &mut Vec<String>, node_colors: Option<&str>, link_colors: Option<&str>) {
    lines.push("# Create the Sankey diagram".to_string());
    lines.push("fig = go.Figure(data=[go.Sankey(".to_string());
    lines.push("    node=dict(".to_string());
    lines.push("        pad=15,".to_string());
    lines.push("        thickness=20,".to_string());
    lines.push("        line=dict(color=\"black\", width=0.5),".to_string());
    lines.push("        label=labels,".to_string());
    if let Some(colors) = node_colors {
        lines.push(format!("        color={},", colors));
    }
    lines.push("    ),".to_string());
    lines.push("    link=dict(".to_string());
    lines.push("        source=source,".to_string());
    lines.push("        target=target,".to_string());
    lines.push("        value=value,".to_string());
    if let Some(colors) = link_colors {
        lines.push(format!("        color={},", colors));
    }
    lines.push("    ),".to_string());
    lines.push(")])".to_string());
    lines.push(String::new());
    lines.push("fig.update_layout(title_text=\"Sankey Diagram\", font_size=10)".to_string());
    lines.push("fig.show()".to_string());
}
