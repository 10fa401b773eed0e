use crate::core::aggregate::{aggregate, apply_colors};
use crate::core::dispatch::render;
use crate::core::{ConfigProvider, FlowGraph, FlowSource, FlowTable, Pipeline, RenderOptions};
use crate::utils::error::Result;

pub struct SankeyPipeline<S: FlowSource, C: ConfigProvider> {
    pub(crate) source: S,
    pub(crate) config: C,
}

impl<S: FlowSource, C: ConfigProvider> SankeyPipeline<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self { source, config }
    }
}

impl<S: FlowSource, C: ConfigProvider> Pipeline for SankeyPipeline<S, C> {
    fn extract(&self) -> Result<FlowTable> {
        self.source.load()
    }

    fn transform(&self, table: &FlowTable) -> Result<FlowGraph> {
        let colors = self.config.color_config()?;
        let mut graph = aggregate(&table.records);
        apply_colors(&mut graph, &colors, self.config.auto_colors());
        Ok(graph)
    }

    fn render(&self, table: &FlowTable, graph: &FlowGraph) -> Result<String> {
        let options = RenderOptions {
            data_mode: self.config.data_mode(),
            csv_path: table.path.clone(),
            columns: table.columns.clone(),
        };
        render(self.config.output(), graph, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::etl::SankeyEngine;
    use crate::core::loader::parse_flows;
    use crate::core::{ColorConfig, ColumnSelection, DataMode, OutputTarget};
    use crate::utils::error::SankeyError;
    use std::path::{Path, PathBuf};

    struct InMemorySource(&'static str);

    impl FlowSource for InMemorySource {
        fn load(&self) -> Result<FlowTable> {
            let mut table = parse_flows(self.0.as_bytes(), &ColumnSelection::default())?;
            table.path = Some(PathBuf::from("memory.csv"));
            Ok(table)
        }
    }

    struct StaticConfig {
        output: OutputTarget,
        colors: ColorConfig,
        auto_colors: bool,
        data_mode: DataMode,
    }

    impl StaticConfig {
        fn new(output: OutputTarget) -> Self {
            Self {
                output,
                colors: ColorConfig::default(),
                auto_colors: false,
                data_mode: DataMode::Inline,
            }
        }
    }

    impl ConfigProvider for StaticConfig {
        fn csv_path(&self) -> &Path {
            Path::new("memory.csv")
        }

        fn output(&self) -> OutputTarget {
            self.output
        }

        fn columns(&self) -> ColumnSelection {
            ColumnSelection::default()
        }

        fn color_config(&self) -> Result<ColorConfig> {
            Ok(self.colors.clone())
        }

        fn auto_colors(&self) -> bool {
            self.auto_colors
        }

        fn data_mode(&self) -> DataMode {
            self.data_mode
        }
    }

    #[test]
    fn test_pipeline_renders_sankeymatic() {
        let pipeline = SankeyPipeline::new(
            InMemorySource("source,target,value\nA,B,10\nB,C,5\n"),
            StaticConfig::new(OutputTarget::Sankeymatic),
        );
        let out = SankeyEngine::new(pipeline).run().unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.contains(&"A [10] B"));
        assert!(lines.contains(&"B [5] C"));
    }

    #[test]
    fn test_auto_colors_show_up_as_node_lines() {
        let mut config = StaticConfig::new(OutputTarget::Sankeymatic);
        config.auto_colors = true;
        let pipeline = SankeyPipeline::new(InMemorySource("source,target,value\nA,B,1\n"), config);

        let out = SankeyEngine::new(pipeline).run().unwrap();

        assert!(out.lines().any(|l| l == ":A #1f77b4"));
        assert!(out.lines().any(|l| l == ":B #ff7f0e"));
    }

    #[test]
    fn test_file_mode_points_scripts_at_the_source_path() {
        let mut config = StaticConfig::new(OutputTarget::Python);
        config.data_mode = DataMode::File;
        let pipeline = SankeyPipeline::new(InMemorySource("from,to,weight\nA,B,1\n"), config);

        let out = SankeyEngine::new(pipeline).run().unwrap();

        assert!(out.contains(r#"pd.read_csv("memory.csv")"#));
        assert!(out.contains(r#"value_col = "weight""#));
    }

    #[test]
    fn test_bad_row_aborts_the_run() {
        let pipeline = SankeyPipeline::new(
            InMemorySource("source,target,value\nA,B,1\nB,C,\n"),
            StaticConfig::new(OutputTarget::All),
        );
        let err = SankeyEngine::new(pipeline).run().unwrap_err();
        assert!(matches!(err, SankeyError::ParseError { line: 3, .. }));
    }
}
