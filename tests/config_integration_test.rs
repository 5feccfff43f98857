use anyhow::Result;
use httpmock::prelude::*;
use paypal_nvp::utils::validation::Validate;
use paypal_nvp::{GatewayConfig, NvpGateway, PayPalClient};
use tempfile::TempDir;

/// 從 TOML 檔案建立客戶端並呼叫模擬閘道
#[tokio::test]
async fn test_client_from_toml_config() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/nvp")
                .header("user-agent", "shop-backend/2.0")
                .x_www_form_urlencoded_tuple("METHOD", "AddressVerify")
                .x_www_form_urlencoded_tuple("EMAIL", "buyer@example.com")
                .x_www_form_urlencoded_tuple("USER", "seller_api1.example.com")
                .x_www_form_urlencoded_tuple("SUBJECT", "merchant@example.com");
            then.status(200).body(
                "CONFIRMATIONCODE=Confirmed&STREETMATCH=Matched&ZIPMATCH=Matched&ACK=Success",
            );
        })
        .await;

    std::env::set_var("PAYPAL_NVP_IT_SIGNATURE", "sig-from-env");

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("paypal.toml");
    let config_content = format!(
        r#"
[gateway]
sandbox = true
endpoint = "{}"
timeout_seconds = 5
user_agent = "shop-backend/2.0"

[credentials]
username = "seller_api1.example.com"
password = "api_pwd"
signature = "${{PAYPAL_NVP_IT_SIGNATURE}}"
subject = "merchant@example.com"
"#,
        server.url("/nvp")
    );
    tokio::fs::write(&config_path, config_content).await?;

    let config = GatewayConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(
        config.credentials.as_ref().map(|c| c.signature.as_str()),
        Some("sig-from-env")
    );

    let client = PayPalClient::from_config(config.authentication()?, &config)?;
    assert!(client.is_sandbox());
    assert_eq!(client.endpoint(), server.url("/nvp"));

    let response = client
        .address_verify("buyer@example.com", "1 Main St", "95131")
        .await?;

    api_mock.assert_async().await;
    assert_eq!(response.get("CONFIRMATIONCODE"), Some("Confirmed"));

    std::env::remove_var("PAYPAL_NVP_IT_SIGNATURE");
    Ok(())
}

#[test]
fn test_sandbox_config_without_endpoint_uses_sandbox_host() -> Result<()> {
    let config = GatewayConfig::from_toml_str(
        r#"
[gateway]
sandbox = true

[credentials]
username = "u"
password = "p"
signature = "s"
"#,
    )?;

    let client = PayPalClient::from_config(config.authentication()?, &config)?;
    assert_eq!(client.endpoint(), "https://api-3t.sandbox.paypal.com/nvp");
    Ok(())
}
