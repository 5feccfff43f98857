pub mod client;
pub mod gateway;
pub mod methods;

pub use crate::domain::model::{NvpRequest, NvpResponse, Parameters};
pub use crate::domain::ports::{AuthenticationStrategy, ConfigProvider};
pub use crate::utils::error::Result;
