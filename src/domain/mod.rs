// Domain layer: product records and the ports (traits) the pipeline is built on.

pub mod model;
pub mod ports;
