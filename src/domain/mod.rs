// Domain layer: the analysis record and the ports the dashboard talks through.

pub mod model;
pub mod ports;
