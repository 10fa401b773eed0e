// Domain layer: flow types and the traits the pipeline is built from.

pub mod model;
pub mod ports;
