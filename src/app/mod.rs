pub mod formatters;
pub mod pipelines;
