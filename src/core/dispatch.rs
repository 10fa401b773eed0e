use crate::app::formatters::formatter_for;
use crate::core::{FlowGraph, OutputTarget, RenderOptions};
use crate::utils::error::Result;

/// Runs the formatters `target` selects. One dialect prints bare; several are
/// titled and separated by a blank line.
pub fn render(target: OutputTarget, graph: &FlowGraph, options: &RenderOptions) -> Result<String> {
    let dialects = target.dialects();
    let mut sections = Vec::with_capacity(dialects.len());

    for &dialect in dialects {
        let formatter = formatter_for(dialect);
        tracing::debug!("Formatting {:?}", formatter.dialect());
        let block = formatter.format(graph, options)?;
        if dialects.len() == 1 {
            sections.push(block);
        } else {
            sections.push(format!("{}\n{}", formatter.dialect().title(), block));
        }
    }

    Ok(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::formatters::test_support::{graph, options};

    #[test]
    fn test_single_dialect_has_no_title() {
        let out = render(OutputTarget::Sankeymatic, &graph(&[("A", "B", "1")]), &options()).unwrap();
        assert!(out.starts_with("// Enter Flows"));
        assert!(!out.contains("SankeyMATIC Format:"));
    }

    #[test]
    fn test_all_contains_every_dialect_in_order() {
        let out = render(OutputTarget::All, &graph(&[("A", "B", "10"), ("B", "C", "5")]), &options()).unwrap();

        let sankeymatic = out.find("SankeyMATIC Format:\n// Enter Flows").unwrap();
        let python = out.find("\n\nPython Code for Sankey Diagram:\nimport plotly.graph_objects as go").unwrap();
        let r = out.find("\n\nR Code for Sankey Diagram:\nlibrary(networkD3)").unwrap();
        assert!(sankeymatic < python && python < r);
        assert!(out.lines().any(|l| l == "A [10] B"));
    }
}
