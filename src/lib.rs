pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::auth::{NoAuthentication, SignatureAuthentication};
pub use config::GatewayConfig;
pub use crate::core::{
    client::{PayPalClient, API_VERSION},
    gateway::NvpGateway,
    methods::{CaptureOptions, RefundOptions},
};
pub use domain::model::{
    CompleteType, GatewayError, NvpRequest, NvpResponse, Parameters, PaymentAction, RefundType,
};
pub use domain::ports::AuthenticationStrategy;
pub use utils::error::{PayPalError, Result};
