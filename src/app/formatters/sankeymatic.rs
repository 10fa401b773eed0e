use crate::core::{Dialect, FlowGraph, Formatter, RenderOptions};
use crate::utils::error::{Result, SankeyError};

/// Rejects labels the SankeyMATIC line syntax would read as something else.
fn check_label(label: &str) -> Result<&str> {
    let reason = if label.contains(|c: char| c == '[' || c == ']') {
        "brackets delimit the flow amount"
    } else if label.starts_with(':') {
        "a leading ':' starts a node color line"
    } else if label.starts_with("//") {
        "a leading '//' starts a comment"
    } else if label.contains(|c: char| c == '\n' || c == '\r') {
        "each flow must fit on one line"
    } else {
        return Ok(label);
    };

    Err(SankeyError::UnsupportedLabel {
        dialect: "SankeyMATIC",
        label: label.to_string(),
        reason,
    })
}

/// Plain-text input for sankeymatic.com.
#[derive(Debug, Default, Clone, Copy)]
pub struct SankeyMaticFormatter;

impl Formatter for SankeyMaticFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::SankeyMatic
    }

    fn format(&self, graph: &FlowGraph, _options: &RenderOptions) -> Result<String> {
        let mut lines = vec!["// Enter Flows between Nodes, like this:".to_string()];

        for edge in &graph.edges {
            let mut line = format!(
                "{} [{}] {}",
                check_label(graph.label(edge.source))?,
                edge.total,
                check_label(graph.label(edge.target))?
            );
            if let Some(color) = &edge.color {
                line.push(' ');
                line.push_str(color);
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push("// You can set a Node's color, like this:".to_string());
        for node in &graph.nodes {
            if let Some(color) = &node.color {
                lines.push(format!(":{} {}", node.label, color));
            }
        }

        lines.push(String::new());
        lines.push("// Use the controls below to customize".to_string());
        lines.push("// your diagram's appearance...".to_string());

        Ok(lines.join("\n"))
    }
}
