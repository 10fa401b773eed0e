use crate::domain::model::{
    ColorConfig, ColumnSelection, DataMode, Dialect, FlowGraph, FlowTable, OutputTarget,
    RenderOptions,
};
use crate::utils::error::Result;
use std::path::Path;

/// Anything that can produce flow rows.
pub trait FlowSource {
    fn load(&self) -> Result<FlowTable>;
}

/// Turns a flow graph into one dialect's snippet.
pub trait Formatter {
    fn dialect(&self) -> Dialect;
    fn format(&self, graph: &FlowGraph, options: &RenderOptions) -> Result<String>;
}

pub trait ConfigProvider {
    fn csv_path(&self) -> &Path;
    fn output(&self) -> OutputTarget;
    fn columns(&self) -> ColumnSelection;
    fn color_config(&self) -> Result<ColorConfig>;
    fn auto_colors(&self) -> bool;
    fn data_mode(&self) -> DataMode;
}

pub trait Pipeline {
    fn extract(&self) -> Result<FlowTable>;
    fn transform(&self, table: &FlowTable) -> Result<FlowGraph>;
    fn render(&self, table: &FlowTable, graph: &FlowGraph) -> Result<String>;
}
