use crate::adapters::auth::SignatureAuthentication;
use crate::core::ConfigProvider;
use crate::utils::error::{PayPalError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub gateway: GatewaySettings,
    pub credentials: Option<CredentialsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub sandbox: Option<bool>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
    pub signature: String,
    pub subject: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("signature", &"***")
            .field("subject", &self.subject)
            .finish()
    }
}

impl GatewayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PayPalError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PayPalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PAYPAL_API_PASSWORD})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PayPalError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得簽章驗證策略；缺少 [credentials] 時回報錯誤
    pub fn authentication(&self) -> Result<SignatureAuthentication> {
        let credentials = validation::validate_required_field("credentials", &self.credentials)?;

        let auth = SignatureAuthentication::new(
            credentials.username.clone(),
            credentials.password.clone(),
            credentials.signature.clone(),
        );
        Ok(match &credentials.subject {
            Some(subject) => auth.with_subject(subject.clone()),
            None => auth,
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.gateway.endpoint {
            validation::validate_url("gateway.endpoint", endpoint)?;
        }

        if let Some(timeout) = self.gateway.timeout_seconds {
            validation::validate_range("gateway.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(credentials) = &self.credentials {
            validation::validate_non_empty_string("credentials.username", &credentials.username)?;
            validation::validate_non_empty_string("credentials.password", &credentials.password)?;
            validation::validate_non_empty_string(
                "credentials.signature",
                &credentials.signature,
            )?;
            for (field, value) in [
                ("credentials.username", &credentials.username),
                ("credentials.password", &credentials.password),
                ("credentials.signature", &credentials.signature),
            ] {
                validation::validate_substituted(field, value)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for GatewayConfig {
    fn is_sandbox(&self) -> bool {
        self.gateway.sandbox.unwrap_or(false)
    }

    fn endpoint_override(&self) -> Option<&str> {
        self.gateway.endpoint.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.gateway
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    fn user_agent(&self) -> Option<&str> {
        self.gateway.user_agent.as_deref()
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
