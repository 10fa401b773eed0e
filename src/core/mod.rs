pub mod aggregate;
pub mod dispatch;
pub mod etl;
pub mod loader;

pub use crate::domain::model::{
    ColorConfig, ColumnNames, ColumnSelection, DataMode, Dialect, FlowColor, FlowEdge, FlowGraph,
    FlowNode, FlowRecord, FlowTable, OutputTarget, RenderOptions,
};
pub use crate::domain::ports::{ConfigProvider, FlowSource, Formatter, Pipeline};
pub use crate::utils::error::Result;
