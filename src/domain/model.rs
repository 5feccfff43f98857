use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// NVP 請求欄位（依鍵排序，方便除錯與測試比對）
pub type Parameters = BTreeMap<String, String>;

/// 送往 NVP 端點的單一請求（一律以 POST 表單送出）
#[derive(Debug, Clone, PartialEq)]
pub struct NvpRequest {
    pub url: String,
    pub parameters: Parameters,
    pub headers: BTreeMap<String, String>,
}

impl NvpRequest {
    pub fn post(url: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            url: url.into(),
            parameters,
            headers: BTreeMap::new(),
        }
    }

    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn method_name(&self) -> &str {
        self.parameters
            .get("METHOD")
            .map(String::as_str)
            .unwrap_or("<none>")
    }

    /// 可安全寫入日誌的參數副本（憑證欄位以 *** 取代）
    pub fn redacted_parameters(&self) -> Parameters {
        self.parameters
            .iter()
            .map(|(key, value)| {
                let shown = if SENSITIVE_KEYS.contains(&key.as_str()) {
                    "***".to_string()
                } else {
                    value.clone()
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

const SENSITIVE_KEYS: &[&str] = &["PWD", "SIGNATURE", "ACCT", "CVV2"];

const SUCCESS_ACKS: &[&str] = &["Success", "SuccessWithWarning"];

/// 解析後的 NVP 回應內容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NvpResponse {
    pub body: BTreeMap<String, String>,
}

/// L_ERRORCODEn / L_SHORTMESSAGEn / L_LONGMESSAGEn / L_SEVERITYCODEn 的一組
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayError {
    pub code: String,
    pub short_message: Option<String>,
    pub long_message: Option<String>,
    pub severity: Option<String>,
}

impl NvpResponse {
    /// 將 application/x-www-form-urlencoded 內容解碼為扁平的鍵值表。
    /// 重複的鍵以最後一次出現為準。
    pub fn from_body(content: &str) -> Self {
        let body = url::form_urlencoded::parse(content.trim().as_bytes())
            .into_owned()
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { body }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.body.get(key).map(String::as_str)
    }

    pub fn ack(&self) -> Option<&str> {
        self.get("ACK")
    }

    pub fn is_success(&self) -> bool {
        self.ack().is_some_and(|ack| SUCCESS_ACKS.contains(&ack))
    }

    pub fn token(&self) -> Option<&str> {
        self.get("TOKEN")
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.get("CORRELATIONID")
    }

    pub fn version(&self) -> Option<&str> {
        self.get("VERSION")
    }

    pub fn build(&self) -> Option<&str> {
        self.get("BUILD")
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.get("TIMESTAMP")
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn errors(&self) -> Vec<GatewayError> {
        let mut errors = Vec::new();
        for index in 0.. {
            let Some(code) = self.get(&format!("L_ERRORCODE{}", index)) else {
                break;
            };
            let field = |name: &str| self.get(&format!("{}{}", name, index)).map(str::to_string);
            errors.push(GatewayError {
                code: code.to_string(),
                short_message: field("L_SHORTMESSAGE"),
                long_message: field("L_LONGMESSAGE"),
                severity: field("L_SEVERITYCODE"),
            });
        }
        errors
    }
}

impl fmt::Display for NvpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACK={}", self.ack().unwrap_or("<missing>"))?;
        if let Some(correlation_id) = self.correlation_id() {
            write!(f, ", CORRELATIONID={}", correlation_id)?;
        }
        for error in self.errors() {
            write!(f, "; [{}]", error.code)?;
            if let Some(message) = error.long_message.as_ref().or(error.short_message.as_ref()) {
                write!(f, " {}", message)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PaymentAction {
    Sale,
    Authorization,
    Order,
}

impl PaymentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentAction::Sale => "Sale",
            PaymentAction::Authorization => "Authorization",
            PaymentAction::Order => "Order",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CompleteType {
    Complete,
    NotComplete,
}

impl CompleteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompleteType::Complete => "Complete",
            CompleteType::NotComplete => "NotComplete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RefundType {
    Full,
    Partial,
}

impl RefundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundType::Full => "Full",
            RefundType::Partial => "Partial",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_encoded_body() {
        let response = NvpResponse::from_body(
            "TOKEN=EC%2d4RX68325WW573013K&TIMESTAMP=2011%2d05%2d03T12%3a34%3a56Z\
             &CORRELATIONID=a1b2c3d4e5f6&ACK=Success&VERSION=65%2e1&BUILD=1824201",
        );

        assert_eq!(response.token(), Some("EC-4RX68325WW573013K"));
        assert_eq!(response.correlation_id(), Some("a1b2c3d4e5f6"));
        assert_eq!(response.version(), Some("65.1"));
        assert_eq!(response.build(), Some("1824201"));
        assert!(response.is_success());
        assert_eq!(
            response.timestamp().map(|ts| ts.to_rfc3339()),
            Some("2011-05-03T12:34:56+00:00".to_string())
        );
    }

    #[test]
    fn test_plus_decodes_to_space_and_last_duplicate_wins() {
        let response = NvpResponse::from_body("NOTE=thank+you%21&AMT=1.00&AMT=2.00\n");
        assert_eq!(response.get("NOTE"), Some("thank you!"));
        assert_eq!(response.get("AMT"), Some("2.00"));
        assert_eq!(response.body.len(), 2);
    }

    #[test]
    fn test_success_values() {
        assert!(NvpResponse::from_body("ACK=Success").is_success());
        assert!(NvpResponse::from_body("ACK=SuccessWithWarning").is_success());
        assert!(!NvpResponse::from_body("ACK=Failure").is_success());
        assert!(!NvpResponse::from_body("ACK=FailureWithWarning").is_success());
        assert!(!NvpResponse::from_body("ACK=Warning").is_success());
        assert!(!NvpResponse::from_body("").is_success());
    }

    #[test]
    fn test_errors_are_read_in_index_order() {
        let response = NvpResponse::from_body(
            "ACK=Failure&L_ERRORCODE0=10413&L_SHORTMESSAGE0=Transaction+refused\
             &L_SEVERITYCODE0=Error&L_ERRORCODE1=10426&L_LONGMESSAGE1=Item+total+is+invalid\
             &L_ERRORCODE3=99999",
        );

        let errors = response.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "10413");
        assert_eq!(errors[0].short_message.as_deref(), Some("Transaction refused"));
        assert_eq!(errors[0].severity.as_deref(), Some("Error"));
        assert_eq!(errors[0].long_message, None);
        assert_eq!(errors[1].code, "10426");
        assert_eq!(errors[1].long_message.as_deref(), Some("Item total is invalid"));
    }

    #[test]
    fn test_display_summarises_ack_and_errors() {
        let response = NvpResponse::from_body(
            "ACK=Failure&CORRELATIONID=abc&L_ERRORCODE0=10002&L_SHORTMESSAGE0=Security+error",
        );
        assert_eq!(
            response.to_string(),
            "ACK=Failure, CORRELATIONID=abc; [10002] Security error"
        );
        assert_eq!(NvpResponse::default().to_string(), "ACK=<missing>");
    }

    #[test]
    fn test_response_serializes_as_flat_object() {
        let response = NvpResponse::from_body("ACK=Success&TOKEN=EC-1");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"ACK": "Success", "TOKEN": "EC-1"}));
    }

    #[test]
    fn test_redacted_parameters_hide_credentials() {
        let mut params = Parameters::new();
        params.insert("METHOD".to_string(), "DoCapture".to_string());
        params.insert("USER".to_string(), "api_user".to_string());
        params.insert("PWD".to_string(), "secret".to_string());
        params.insert("SIGNATURE".to_string(), "sig".to_string());
        let request = NvpRequest::post("https://example.com/nvp", params);

        let redacted = request.redacted_parameters();
        assert_eq!(redacted["PWD"], "***");
        assert_eq!(redacted["SIGNATURE"], "***");
        assert_eq!(redacted["USER"], "api_user");
        assert_eq!(request.method_name(), "DoCapture");
        assert_eq!(request.parameters["PWD"], "secret");
    }
}
