// Domain layer: request/response models and ports (interfaces) for the NVP client.

pub mod model;
pub mod ports;
