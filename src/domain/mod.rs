// Domain layer: phase model and ports (interfaces). No I/O here.

pub mod model;
pub mod ports;
