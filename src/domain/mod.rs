// Domain layer: report model and the provider port.

pub mod model;
pub mod ports;
