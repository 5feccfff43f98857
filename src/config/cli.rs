use crate::config::toml_config::{CredentialsConfig, GatewayConfig};
use crate::core::methods::{CaptureOptions, RefundOptions};
use crate::domain::model::{CompleteType, Parameters, PaymentAction, RefundType};
use crate::utils::error::{PayPalError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "paypal.toml";

#[derive(Debug, Parser)]
#[command(name = "paypal-nvp")]
#[command(about = "Call PayPal NVP API methods from the command line")]
pub struct CliConfig {
    /// Path to TOML configuration file [default: paypal.toml, skipped when absent]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use the sandbox endpoint (overrides the configuration file)
    #[arg(long, conflicts_with = "live")]
    pub sandbox: bool,

    /// Use the live endpoint (overrides the configuration file)
    #[arg(long)]
    pub live: bool,

    /// Explicit NVP endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, env = "PAYPAL_API_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "PAYPAL_API_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, env = "PAYPAL_API_SIGNATURE", hide_env_values = true)]
    pub signature: Option<String>,

    /// Email of the merchant account to act on behalf of
    #[arg(long)]
    pub subject: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Confirm that a postal address and email belong to a PayPal member
    AddressVerify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        zip: String,
    },
    /// Bill the outstanding amount of a recurring payments profile
    BillOutstandingAmount {
        #[arg(long)]
        profile_id: String,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Create a recurring payments profile from an Express Checkout token
    CreateRecurringPaymentsProfile {
        #[arg(long)]
        token: String,
    },
    /// Authorize an order
    DoAuthorization {
        #[arg(long)]
        transaction_id: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        transaction_entity: Option<String>,
        #[arg(long)]
        currency_code: Option<String>,
    },
    /// Capture an authorized payment
    DoCapture {
        #[arg(long)]
        authorization_id: String,
        #[arg(long)]
        amount: String,
        #[arg(long, value_enum, default_value = "complete")]
        complete_type: CompleteType,
        #[command(flatten)]
        options: CaptureArgs,
    },
    /// Process a direct (credit card) payment
    DoDirectPayment {
        #[arg(long)]
        ip_address: String,
        #[arg(long, value_enum)]
        payment_action: Option<PaymentAction>,
        #[arg(long)]
        return_fmf_details: Option<bool>,
    },
    /// Complete an Express Checkout payment
    DoExpressCheckoutPayment {
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: String,
        #[arg(long, value_enum, default_value = "sale")]
        payment_action: PaymentAction,
        #[arg(long)]
        payer_id: String,
        /// Extra NVP fields as KEY=VALUE
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    /// Start an Express Checkout payment and print the buyer redirect URL
    SetExpressCheckout {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        return_url: String,
        #[arg(long)]
        cancel_url: String,
        /// Extra NVP fields as KEY=VALUE
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    /// Fetch buyer and payment details for an Express Checkout token
    GetExpressCheckoutDetails {
        #[arg(long)]
        token: String,
    },
    /// Look up a transaction
    GetTransactionDetails {
        #[arg(long)]
        transaction_id: String,
    },
    /// Void an authorization
    DoVoid {
        #[arg(long)]
        authorization_id: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Refund a transaction
    RefundTransaction {
        #[arg(long)]
        transaction_id: String,
        #[arg(long, value_enum, default_value = "full")]
        refund_type: RefundType,
        #[command(flatten)]
        options: RefundArgs,
    },
    /// Send any NVP method with the given KEY=VALUE fields
    Raw {
        method: String,
        #[arg(value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
}

#[derive(Debug, Args)]
pub struct CaptureArgs {
    #[arg(long)]
    pub currency_code: Option<String>,
    #[arg(long)]
    pub invoice_number: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    #[arg(long)]
    pub soft_descriptor: Option<String>,
}

impl From<CaptureArgs> for CaptureOptions {
    fn from(args: CaptureArgs) -> Self {
        Self {
            currency_code: args.currency_code,
            invoice_number: args.invoice_number,
            note: args.note,
            soft_descriptor: args.soft_descriptor,
        }
    }
}

#[derive(Debug, Args)]
pub struct RefundArgs {
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub currency_code: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    #[arg(long)]
    pub invoice_id: Option<String>,
}

impl From<RefundArgs> for RefundOptions {
    fn from(args: RefundArgs) -> Self {
        Self {
            amount: args.amount,
            currency_code: args.currency_code,
            note: args.note,
            invoice_id: args.invoice_id,
        }
    }
}

pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

pub fn into_parameters(pairs: Vec<(String, String)>) -> Parameters {
    pairs.into_iter().collect()
}

impl CliConfig {
    /// 載入配置檔。明確指定的 --config 必須存在；
    /// 只有預設路徑不存在時才改用空白配置（僅靠命令列參數）
    pub fn load_config(&self) -> Result<GatewayConfig> {
        match &self.config {
            Some(path) => {
                if !Path::new(path).exists() {
                    return Err(PayPalError::ConfigError {
                        message: format!("config file '{}' does not exist", path),
                    });
                }
                tracing::info!("📁 Loading configuration from: {}", path);
                GatewayConfig::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_PATH);
                GatewayConfig::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                tracing::debug!(
                    "No config file at {}, using command line only",
                    DEFAULT_CONFIG_PATH
                );
                Ok(GatewayConfig::default())
            }
        }
    }

    /// 將命令列覆蓋設定套用到檔案配置上
    pub fn apply_overrides(&self, config: &mut GatewayConfig) -> Result<()> {
        if self.sandbox || self.live {
            config.gateway.sandbox = Some(self.sandbox);
            tracing::info!("🔧 Sandbox mode overridden to: {}", self.sandbox);
        }
        if let Some(endpoint) = &self.endpoint {
            config.gateway.endpoint = Some(endpoint.clone());
        }

        let file = config.credentials.take();
        let pick = |flag: &Option<String>, from_file: Option<&String>| {
            flag.clone().or_else(|| from_file.cloned())
        };
        let username = pick(&self.username, file.as_ref().map(|c| &c.username));
        let password = pick(&self.password, file.as_ref().map(|c| &c.password));
        let signature = pick(&self.signature, file.as_ref().map(|c| &c.signature));
        let subject = self
            .subject
            .clone()
            .or_else(|| file.as_ref().and_then(|c| c.subject.clone()));

        config.credentials = match (username, password, signature) {
            (None, None, None) => None,
            (Some(username), Some(password), Some(signature)) => Some(CredentialsConfig {
                username,
                password,
                signature,
                subject,
            }),
            (username, password, _) => {
                let missing = if username.is_none() {
                    "credentials.username"
                } else if password.is_none() {
                    "credentials.password"
                } else {
                    "credentials.signature"
                };
                return Err(PayPalError::MissingConfigError {
                    field: missing.to_string(),
                });
            }
        };

        Ok(())
    }
}
