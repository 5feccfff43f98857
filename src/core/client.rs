use crate::core::gateway::NvpGateway;
use crate::domain::model::{NvpRequest, NvpResponse, Parameters};
use crate::domain::ports::{AuthenticationStrategy, ConfigProvider};
use crate::utils::error::{PayPalError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const API_VERSION: &str = "65.1";

pub const LIVE_ENDPOINT: &str = "https://api-3t.paypal.com/nvp";
pub const SANDBOX_ENDPOINT: &str = "https://api-3t.sandbox.paypal.com/nvp";

const LIVE_CHECKOUT_URL: &str = "https://www.paypal.com/cgi-bin/webscr";
const SANDBOX_CHECKOUT_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr";

/// 透過 HTTP POST 呼叫 PayPal NVP API 的客戶端
pub struct PayPalClient<A: AuthenticationStrategy> {
    authentication: A,
    endpoint: String,
    sandbox: bool,
    client: Client,
}

impl<A: AuthenticationStrategy> PayPalClient<A> {
    pub fn new(authentication: A, sandbox: bool) -> Self {
        Self {
            authentication,
            endpoint: default_endpoint(sandbox).to_string(),
            sandbox,
            client: Client::new(),
        }
    }

    /// 依設定建立客戶端（端點、逾時、User-Agent）
    pub fn from_config<C: ConfigProvider>(authentication: A, config: &C) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent.to_string());
        }
        let client = builder.build()?;

        let endpoint = config
            .endpoint_override()
            .map(str::to_string)
            .unwrap_or_else(|| default_endpoint(config.is_sandbox()).to_string());

        Ok(Self {
            authentication,
            endpoint,
            sandbox: config.is_sandbox(),
            client,
        })
    }

    /// 指定端點（例如測試用的模擬伺服器）
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    /// SetExpressCheckout 取得 token 後，買家需被導向的 PayPal 頁面
    pub fn express_checkout_url(&self, token: &str) -> String {
        let base = if self.sandbox {
            SANDBOX_CHECKOUT_URL
        } else {
            LIVE_CHECKOUT_URL
        };
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("cmd", "_express-checkout")
            .append_pair("token", token)
            .finish();
        format!("{}?{}", base, query)
    }

    /// 組出完整請求（含 VERSION 與驗證欄位），但不送出
    pub fn prepare(&self, mut parameters: Parameters) -> Result<NvpRequest> {
        parameters.insert("VERSION".to_string(), API_VERSION.to_string());

        let mut request = NvpRequest::post(self.endpoint.clone(), parameters);
        self.authentication.authenticate(&mut request)?;
        Ok(request)
    }

    async fn send(&self, request: &NvpRequest) -> Result<String> {
        let mut builder = self
            .client
            .post(&request.url)
            .form(&request.parameters);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(PayPalError::CommunicationError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

fn default_endpoint(sandbox: bool) -> &'static str {
    if sandbox {
        SANDBOX_ENDPOINT
    } else {
        LIVE_ENDPOINT
    }
}

#[async_trait]
impl<A: AuthenticationStrategy> NvpGateway for PayPalClient<A> {
    async fn request(&self, parameters: Parameters) -> Result<NvpResponse> {
        let request = self.prepare(parameters)?;

        tracing::debug!(
            "📡 Sending {} to {} with {:?}",
            request.method_name(),
            request.url,
            request.redacted_parameters()
        );

        let content = self.send(&request).await?;
        let response = NvpResponse::from_body(&content);

        if !response.is_success() {
            let response_code = response.ack().unwrap_or_default().to_string();
            let reason_code = response.get("L_ERRORCODE0").map(str::to_string);
            tracing::warn!(
                "❌ {} failed: {}",
                request.method_name(),
                response
            );
            return Err(PayPalError::FinancialError {
                response_code,
                reason_code,
                response: Box::new(response),
            });
        }

        tracing::debug!(
            "✅ {} succeeded (ACK={}, CORRELATIONID={})",
            request.method_name(),
            response.ack().unwrap_or_default(),
            response.correlation_id().unwrap_or("-")
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{NoAuthentication, SignatureAuthentication};

    #[test]
    fn test_endpoint_follows_sandbox_flag() {
        assert_eq!(PayPalClient::new(NoAuthentication, false).endpoint(), LIVE_ENDPOINT);
        assert_eq!(PayPalClient::new(NoAuthentication, true).endpoint(), SANDBOX_ENDPOINT);
        assert_eq!(
            PayPalClient::new(NoAuthentication, true)
                .with_endpoint("http://127.0.0.1:9/nvp")
                .endpoint(),
            "http://127.0.0.1:9/nvp"
        );
    }

    #[test]
    fn test_prepare_adds_version_and_credentials() {
        let auth = SignatureAuthentication::new("api_user", "api_pwd", "api_sig");
        let client = PayPalClient::new(auth, true);

        let mut params = Parameters::new();
        params.insert("METHOD".to_string(), "GetTransactionDetails".to_string());
        params.insert("VERSION".to_string(), "1.0".to_string());
        let request = client.prepare(params).unwrap();

        assert_eq!(request.url, SANDBOX_ENDPOINT);
        assert_eq!(request.parameters["VERSION"], API_VERSION);
        assert_eq!(request.parameters["USER"], "api_user");
        assert_eq!(request.parameters["PWD"], "api_pwd");
        assert_eq!(request.parameters["SIGNATURE"], "api_sig");
    }

    #[test]
    fn test_express_checkout_url() {
        let live = PayPalClient::new(NoAuthentication, false);
        assert_eq!(
            live.express_checkout_url("EC-60385559L1062554J"),
            "https://www.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-60385559L1062554J"
        );

        let sandbox = PayPalClient::new(NoAuthentication, true);
        assert!(sandbox
            .express_checkout_url("EC-1")
            .starts_with("https://www.sandbox.paypal.com/cgi-bin/webscr?"));
    }
}
