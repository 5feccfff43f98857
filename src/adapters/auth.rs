use crate::domain::model::NvpRequest;
use crate::domain::ports::AuthenticationStrategy;
use crate::utils::error::{PayPalError, Result};
use std::fmt;

/// API 簽章驗證：USER / PWD / SIGNATURE，選填 SUBJECT（代表其他商家帳號操作）
#[derive(Clone)]
pub struct SignatureAuthentication {
    username: String,
    password: String,
    signature: String,
    subject: Option<String>,
}

impl SignatureAuthentication {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            signature: signature.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for SignatureAuthentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureAuthentication")
            .field("username", &self.username)
            .field("password", &"***")
            .field("signature", &"***")
            .field("subject", &self.subject)
            .finish()
    }
}

impl AuthenticationStrategy for SignatureAuthentication {
    fn authenticate(&self, request: &mut NvpRequest) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() || self.signature.is_empty() {
            return Err(PayPalError::ValidationError {
                message: "API username, password and signature must all be set".to_string(),
            });
        }

        request.set_parameter("USER", self.username.as_str());
        request.set_parameter("PWD", self.password.as_str());
        request.set_parameter("SIGNATURE", self.signature.as_str());
        if let Some(subject) = &self.subject {
            request.set_parameter("SUBJECT", subject.as_str());
        }
        Ok(())
    }
}

/// 不加入任何憑證（用於測試或由外層代理補上驗證的情況）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthentication;

impl AuthenticationStrategy for NoAuthentication {
    fn authenticate(&self, _request: &mut NvpRequest) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Parameters;

    fn empty_request() -> NvpRequest {
        NvpRequest::post("https://api-3t.sandbox.paypal.com/nvp", Parameters::new())
    }

    #[test]
    fn test_signature_authentication_sets_credentials() {
        let auth = SignatureAuthentication::new("seller_api1.example.com", "pwd", "sig");
        let mut request = empty_request();
        auth.authenticate(&mut request).unwrap();

        assert_eq!(request.parameters["USER"], "seller_api1.example.com");
        assert_eq!(request.parameters["PWD"], "pwd");
        assert_eq!(request.parameters["SIGNATURE"], "sig");
        assert!(!request.parameters.contains_key("SUBJECT"));
    }

    #[test]
    fn test_subject_is_added_for_third_party_calls() {
        let auth = SignatureAuthentication::new("u", "p", "s").with_subject("merchant@example.com");
        let mut request = empty_request();
        auth.authenticate(&mut request).unwrap();
        assert_eq!(request.parameters["SUBJECT"], "merchant@example.com");
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let auth = SignatureAuthentication::new("u", "", "s");
        let mut request = empty_request();
        assert!(matches!(
            auth.authenticate(&mut request),
            Err(PayPalError::ValidationError { .. })
        ));
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let auth = SignatureAuthentication::new("u", "top-secret-pwd", "top-secret-sig");
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("\"u\""));
    }

    #[test]
    fn test_no_authentication_leaves_request_untouched() {
        let mut request = empty_request();
        NoAuthentication.authenticate(&mut request).unwrap();
        assert!(request.parameters.is_empty());
        assert!(request.headers.is_empty());
    }
}
