pub mod sankey_pipeline;

pub use sankey_pipeline::SankeyPipeline;
