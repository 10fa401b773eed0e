use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline through extract, transform and render.
pub struct SankeyEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SankeyEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::debug!("Starting Sankey generation");

        let table = self.pipeline.extract()?;
        tracing::info!("Loaded {} flow records", table.records.len());

        let graph = self.pipeline.transform(&table)?;
        tracing::info!(
            "Built {} flows between {} nodes",
            graph.edges.len(),
            graph.nodes.len()
        );

        let output = self.pipeline.render(&table, &graph)?;
        tracing::debug!("Rendered {} bytes", output.len());

        Ok(output)
    }
}
