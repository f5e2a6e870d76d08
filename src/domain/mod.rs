// Domain layer: tabular output, typed response records and the ports the pipeline is built on.

pub mod model;
pub mod ports;
pub mod table;
