use crate::domain::model::NvpRequest;
use crate::utils::error::Result;
use std::time::Duration;

/// 在請求送出前注入驗證資訊（API 憑證、第三方授權等）
pub trait AuthenticationStrategy: Send + Sync {
    fn authenticate(&self, request: &mut NvpRequest) -> Result<()>;
}

impl<T: AuthenticationStrategy + ?Sized> AuthenticationStrategy for Box<T> {
    fn authenticate(&self, request: &mut NvpRequest) -> Result<()> {
        (**self).authenticate(request)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn is_sandbox(&self) -> bool;
    /// 明確指定的端點，優先於 sandbox 設定
    fn endpoint_override(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> Option<&str>;
}
