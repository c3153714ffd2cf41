// Domain layer: models and ports. The extraction and goal engines live in core.

pub mod model;
pub mod ports;
