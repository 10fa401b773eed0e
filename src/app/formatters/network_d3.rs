use crate::app::formatters::{quote, quote_path};
use crate::core::{DataMode, Dialect, FlowGraph, Formatter, RenderOptions};
use crate::utils::error::Result;

const DEFAULT_LINK_COLOR: &str = "#cccccc";

// Node and link groups share one colour scale, so their keys carry
// different prefixes.
const NODE_GROUP_PREFIX: &str = "node:";
const LINK_GROUP_PREFIX: &str = "link:";

fn node_group(label: &str) -> String {
    format!("{}{}", NODE_GROUP_PREFIX, label)
}

/// Flows without their own color share the bare prefix.
fn link_group(color: Option<&str>) -> String {
    format!("{}{}", LINK_GROUP_PREFIX, color.unwrap_or_default())
}

/// R script drawing the diagram with networkD3::sankeyNetwork.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkD3Formatter;

impl Formatter for NetworkD3Formatter {
    fn dialect(&self) -> Dialect {
        Dialect::NetworkD3
    }

    fn format(&self, graph: &FlowGraph, options: &RenderOptions) -> Result<String> {
        match options.data_mode {
            DataMode::Inline => inline_script(graph),
            DataMode::File => file_script(graph, options),
        }
    }
}

fn inline_script(graph: &FlowGraph) -> Result<String> {
    let names = graph
        .nodes
        .iter()
        .map(|n| quote(&n.label))
        .collect::<Result<Vec<_>>>()?;
    let sources: Vec<String> = graph.edges.iter().map(|e| e.source.to_string()).collect();
    let targets: Vec<String> = graph.edges.iter().map(|e| e.target.to_string()).collect();
    let values: Vec<String> = graph.edges.iter().map(|e| e.total.to_string()).collect();

    let node_groups = graph.has_node_colors();
    let mut lines = vec![
        "library(networkD3)".to_string(),
        String::new(),
        "nodes <- data.frame(".to_string(),
        format!("  name = c({}),", names.join(", ")),
    ];
    if node_groups {
        let groups = graph
            .nodes
            .iter()
            .map(|n| quote(&node_group(&n.label)))
            .collect::<Result<Vec<_>>>()?;
        lines.push(format!("  group = c({}),", groups.join(", ")));
    }
    lines.extend([
        "  stringsAsFactors = FALSE".to_string(),
        ")".to_string(),
        String::new(),
        "links <- data.frame(".to_string(),
        format!("  source = c({}),", sources.join(", ")),
        format!("  target = c({}),", targets.join(", ")),
    ]);

    let link_groups = graph.has_flow_colors();
    if link_groups {
        lines.push(format!("  value = c({}),", values.join(", ")));
        let groups = graph
            .edges
            .iter()
            .map(|e| quote(&link_group(e.color.as_deref())))
            .collect::<Result<Vec<_>>>()?;
        lines.push(format!("  group = c({}),", groups.join(", ")));
        lines.push("  stringsAsFactors = FALSE".to_string());
    } else {
        lines.push(format!("  value = c({})", values.join(", ")));
    }
    lines.push(")".to_string());

    let scale = colour_scale(graph, link_groups)?;
    if let Some(scale) = &scale {
        lines.push(String::new());
        lines.push(format!("colour_scale <- {}", scale));
    }

    lines.push(String::new());
    push_sankey_call(&mut lines, scale.is_some(), node_groups, link_groups);
    Ok(lines.join("\n"))
}

fn file_script(graph: &FlowGraph, options: &RenderOptions) -> Result<String> {
    let columns = &options.columns;
    let mut lines = vec![
        "library(networkD3)".to_string(),
        "library(dplyr)".to_string(),
        "library(readr)".to_string(),
        String::new(),
        format!("source_col <- {}", quote(&columns.source)?),
        format!("target_col <- {}", quote(&columns.target)?),
        format!("value_col <- {}", quote(&columns.value)?),
        String::new(),
        "# Read the CSV file".to_string(),
        format!("data <- read_csv({}, show_col_types = FALSE)", quote_path(options)?),
        String::new(),
        "# Aggregate values by source and target".to_string(),
        "links <- data %>%".to_string(),
        "  group_by(across(all_of(c(source_col, target_col)))) %>%".to_string(),
        "  summarise(value = sum(.data[[value_col]]), .groups = \"drop\")".to_string(),
        String::new(),
        "# Create a unique list of nodes".to_string(),
        "nodes <- data.frame(".to_string(),
        "  name = unique(c(links[[source_col]], links[[target_col]])),".to_string(),
        "  stringsAsFactors = FALSE".to_string(),
        ")".to_string(),
        String::new(),
        "# Map source and target to zero-based indices".to_string(),
        "links <- links %>%".to_string(),
        "  mutate(source = match(.data[[source_col]], nodes$name) - 1,".to_string(),
        "         target = match(.data[[target_col]], nodes$name) - 1)".to_string(),
    ];

    let node_groups = graph.has_node_colors();
    if node_groups {
        lines.push(format!(
            "nodes$group <- paste0({}, nodes$name)",
            quote(NODE_GROUP_PREFIX)?
        ));
    }

    if graph.has_flow_colors() {
        tracing::debug!("Flow colors are not carried into R scripts that read the CSV");
    }

    let scale = colour_scale(graph, false)?;
    if let Some(scale) = &scale {
        lines.push(String::new());
        lines.push(format!("colour_scale <- {}", scale));
    }

    lines.push(String::new());
    push_sankey_call(&mut lines, scale.is_some(), node_groups, false);
    Ok(lines.join("\n"))
}

/// Builds a `d3.scaleOrdinal` expression as a quoted R string. Node groups
/// map to node colors; with link groups each flow color maps to itself.
fn colour_scale(graph: &FlowGraph, link_groups: bool) -> Result<Option<String>> {
    let mut domain: Vec<String> = Vec::new();
    let mut range: Vec<&str> = Vec::new();

    for node in &graph.nodes {
        if let Some(color) = &node.color {
            domain.push(node_group(&node.label));
            range.push(color.as_str());
        }
    }

    if link_groups {
        for edge in &graph.edges {
            let color = edge.color.as_deref();
            let group = link_group(color);
            if domain.contains(&group) {
                continue;
            }
            domain.push(group);
            range.push(color.unwrap_or(DEFAULT_LINK_COLOR));
        }
    }

    if domain.is_empty() {
        return Ok(None);
    }

    let js = format!(
        "d3.scaleOrdinal().domain({}).range({})",
        serde_json::to_string(&domain)?,
        serde_json::to_string(&range)?
    );
    Ok(Some(quote(&js)?))
}

fn push_sankey_call(
    lines: &mut Vec<String>,
    with_scale: bool,
    with_node_groups: bool,
    with_link_groups: bool,
) {
    let mut args = vec![
        "Links = links",
        "Nodes = nodes",
        "Source = \"source\"",
        "Target = \"target\"",
        "Value = \"value\"",
        "NodeID = \"name\"",
        "units = \"value\"",
    ];
    if with_node_groups {
        args.push("NodeGroup = \"group\"");
    }
    if with_link_groups {
        args.push("LinkGroup = \"group\"");
    }
    if with_scale {
        args.push("colourScale = JS(colour_scale)");
    }

    lines.push("# Create the Sankey diagram".to_string());
    lines.push("sankey <- sankeyNetwork(".to_string());
    let last = args.len() - 1;
    for (i, arg) in args.iter().enumerate() {
        let comma = if i == last { "" } else { "," };
        lines.push(format!("  {}{}", arg, comma));
    }
    lines.push(")".to_string());
    lines.push(String::new());
    lines.push("print(sankey)".to_string());
}
