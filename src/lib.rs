pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::pipelines::SankeyPipeline;
pub use crate::core::{dispatch::render, etl::SankeyEngine, loader::CsvLoader};
pub use crate::domain::model::{ColorConfig, DataMode, FlowGraph, FlowRecord, OutputTarget};
pub use crate::utils::error::{Result, SankeyError};
