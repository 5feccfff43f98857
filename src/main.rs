use clap::Parser;
use paypal_nvp::config::cli::{into_parameters, Command};
use paypal_nvp::utils::error::ErrorSeverity;
use paypal_nvp::utils::{logger, validation};
use paypal_nvp::utils::validation::Validate;
use paypal_nvp::{
    CliConfig, NvpGateway, NvpResponse, PayPalClient, PayPalError,
    SignatureAuthentication,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting paypal-nvp");

    let config = cli.load_config().and_then(|mut config| {
        cli.apply_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    });
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let client = match config
        .authentication()
        .and_then(|auth| PayPalClient::from_config(auth, &config))
    {
        Ok(client) => client,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Using endpoint {}", client.endpoint());

    match run(&client, cli.command).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn run(
    client: &PayPalClient<SignatureAuthentication>,
    command: Command,
) -> paypal_nvp::Result<NvpResponse> {
    match command {
        Command::AddressVerify { email, street, zip } => {
            client.address_verify(&email, &street, &zip).await
        }
        Command::BillOutstandingAmount {
            profile_id,
            amount,
            note,
        } => {
            if let Some(amount) = &amount {
                validation::validate_amount("amount", amount)?;
            }
            client
                .bill_outstanding_amount(&profile_id, amount.as_deref(), note.as_deref())
                .await
        }
        Command::CreateRecurringPaymentsProfile { token } => {
            client.create_recurring_payments_profile(&token).await
        }
        Command::DoAuthorization {
            transaction_id,
            amount,
            transaction_entity,
            currency_code,
        } => {
            validation::validate_amount("amount", &amount)?;
            client
                .do_authorization(
                    &transaction_id,
                    &amount,
                    transaction_entity.as_deref(),
                    currency_code.as_deref(),
                )
                .await
        }
        Command::DoCapture {
            authorization_id,
            amount,
            complete_type,
            options,
        } => {
            validation::validate_amount("amount", &amount)?;
            client
                .do_capture(&authorization_id, &amount, complete_type, &options.into())
                .await
        }
        Command::DoDirectPayment {
            ip_address,
            payment_action,
            return_fmf_details,
        } => {
            client
                .do_direct_payment(&ip_address, payment_action, return_fmf_details)
                .await
        }
        Command::DoExpressCheckoutPayment {
            token,
            amount,
            payment_action,
            payer_id,
            params,
        } => {
            validation::validate_amount("amount", &amount)?;
            client
                .do_express_checkout_payment(
                    &token,
                    &amount,
                    payment_action,
                    &payer_id,
                    into_parameters(params),
                )
                .await
        }
        Command::SetExpressCheckout {
            amount,
            return_url,
            cancel_url,
            params,
        } => {
            validation::validate_amount("amount", &amount)?;
            validation::validate_url("return_url", &return_url)?;
            validation::validate_url("cancel_url", &cancel_url)?;
            let response = client
                .set_express_checkout(&amount, &return_url, &cancel_url, into_parameters(params))
                .await?;
            if let Some(token) = response.token() {
                tracing::info!("🔗 Redirect buyer to: {}", client.express_checkout_url(token));
            }
            Ok(response)
        }
        Command::GetExpressCheckoutDetails { token } => {
            client.get_express_checkout_details(&token).await
        }
        Command::GetTransactionDetails { transaction_id } => {
            client.get_transaction_details(&transaction_id).await
        }
        Command::DoVoid {
            authorization_id,
            note,
        } => client.do_void(&authorization_id, note.as_deref()).await,
        Command::RefundTransaction {
            transaction_id,
            refund_type,
            options,
        } => {
            if let Some(amount) = &options.amount {
                validation::validate_amount("amount", amount)?;
            }
            client
                .refund_transaction(&transaction_id, refund_type, &options.into())
                .await
        }
        Command::Raw { method, params } => {
            let mut parameters = into_parameters(params);
            parameters.insert("METHOD".to_string(), method);
            client.request(parameters).await
        }
    }
}

fn exit_with(e: PayPalError) -> ! {
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
