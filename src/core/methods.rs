//! 各 NVP 方法的參數組裝。
//!
//! 這些函式只負責產生參數表，不做任何 I/O；`VERSION` 與驗證欄位
//! 由 `PayPalClient` 在送出前補上。

use crate::domain::model::{CompleteType, Parameters, PaymentAction, RefundType};

/// DoCapture 的選填欄位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureOptions {
    pub currency_code: Option<String>,
    pub invoice_number: Option<String>,
    pub note: Option<String>,
    pub soft_descriptor: Option<String>,
}

/// RefundTransaction 的選填欄位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefundOptions {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
    pub note: Option<String>,
    pub invoice_id: Option<String>,
}

fn with_method(method: &str) -> Parameters {
    let mut parameters = Parameters::new();
    parameters.insert("METHOD".to_string(), method.to_string());
    parameters
}

fn set(parameters: &mut Parameters, key: &str, value: impl Into<String>) {
    parameters.insert(key.to_string(), value.into());
}

fn set_optional<S: AsRef<str>>(parameters: &mut Parameters, key: &str, value: Option<S>) {
    if let Some(value) = value {
        parameters.insert(key.to_string(), value.as_ref().to_string());
    }
}

/// 呼叫端的選填參數先放入，必要欄位後寫入以覆蓋同名鍵
fn merge_over(optional: Parameters, required: Parameters) -> Parameters {
    let mut merged = optional;
    merged.extend(required);
    merged
}

pub fn address_verify(email: &str, street: &str, postal_code: &str) -> Parameters {
    let mut parameters = with_method("AddressVerify");
    set(&mut parameters, "EMAIL", email);
    set(&mut parameters, "STREET", street);
    set(&mut parameters, "ZIP", postal_code);
    parameters
}

pub fn bill_outstanding_amount(
    profile_id: &str,
    amount: Option<&str>,
    note: Option<&str>,
) -> Parameters {
    let mut parameters = with_method("BillOutstandingAmount");
    set(&mut parameters, "PROFILEID", profile_id);
    set_optional(&mut parameters, "AMT", amount);
    set_optional(&mut parameters, "NOTE", note);
    parameters
}

pub fn create_recurring_payments_profile(token: &str) -> Parameters {
    let mut parameters = with_method("CreateRecurringPaymentsProfile");
    set(&mut parameters, "TOKEN", token);
    parameters
}

pub fn do_authorization(
    transaction_id: &str,
    amount: &str,
    transaction_entity: Option<&str>,
    currency_code: Option<&str>,
) -> Parameters {
    let mut parameters = with_method("DoAuthorization");
    set(&mut parameters, "TRANSACTIONID", transaction_id);
    set(&mut parameters, "AMT", amount);
    set_optional(&mut parameters, "TRANSACTIONENTITY", transaction_entity);
    set_optional(&mut parameters, "CURRENCYCODE", currency_code);
    parameters
}

pub fn do_capture(
    authorization_id: &str,
    amount: &str,
    complete_type: CompleteType,
    options: &CaptureOptions,
) -> Parameters {
    let mut parameters = with_method("DoCapture");
    set(&mut parameters, "AUTHORIZATIONID", authorization_id);
    set(&mut parameters, "AMT", amount);
    set(&mut parameters, "COMPLETETYPE", complete_type.as_str());
    set_optional(&mut parameters, "CURRENCYCODE", options.currency_code.as_ref());
    set_optional(&mut parameters, "INVNUM", options.invoice_number.as_ref());
    set_optional(&mut parameters, "NOTE", options.note.as_ref());
    set_optional(&mut parameters, "SOFTDESCRIPTOR", options.soft_descriptor.as_ref());
    parameters
}

pub fn do_direct_payment(
    ip_address: &str,
    payment_action: Option<PaymentAction>,
    return_fmf_details: Option<bool>,
) -> Parameters {
    let mut parameters = with_method("DoDirectPayment");
    set(&mut parameters, "IPADDRESS", ip_address);
    set_optional(
        &mut parameters,
        "PAYMENTACTION",
        payment_action.map(|action| action.as_str()),
    );
    set_optional(
        &mut parameters,
        "RETURNFMFDETAILS",
        return_fmf_details.map(|flag| if flag { "1" } else { "0" }),
    );
    parameters
}

pub fn do_express_checkout_payment(
    token: &str,
    amount: &str,
    payment_action: PaymentAction,
    payer_id: &str,
    optional: Parameters,
) -> Parameters {
    let mut required = with_method("DoExpressCheckoutPayment");
    set(&mut required, "TOKEN", token);
    set(&mut required, "PAYMENTREQUEST_0_AMT", amount);
    set(&mut required, "PAYMENTREQUEST_0_PAYMENTACTION", payment_action.as_str());
    set(&mut required, "PAYERID", payer_id);
    merge_over(optional, required)
}

pub fn set_express_checkout(
    amount: &str,
    return_url: &str,
    cancel_url: &str,
    optional: Parameters,
) -> Parameters {
    let mut required = with_method("SetExpressCheckout");
    set(&mut required, "PAYMENTREQUEST_0_AMT", amount);
    set(&mut required, "RETURNURL", return_url);
    set(&mut required, "CANCELURL", cancel_url);
    merge_over(optional, required)
}

pub fn get_express_checkout_details(token: &str) -> Parameters {
    let mut parameters = with_method("GetExpressCheckoutDetails");
    set(&mut parameters, "TOKEN", token);
    parameters
}

pub fn get_transaction_details(transaction_id: &str) -> Parameters {
    let mut parameters = with_method("GetTransactionDetails");
    set(&mut parameters, "TRANSACTIONID", transaction_id);
    parameters
}

pub fn do_void(authorization_id: &str, note: Option<&str>) -> Parameters {
    let mut parameters = with_method("DoVoid");
    set(&mut parameters, "AUTHORIZATIONID", authorization_id);
    set_optional(&mut parameters, "NOTE", note);
    parameters
}

pub fn refund_transaction(
    transaction_id: &str,
    refund_type: RefundType,
    options: &RefundOptions,
) -> Parameters {
    let mut parameters = with_method("RefundTransaction");
    set(&mut parameters, "TRANSACTIONID", transaction_id);
    set(&mut parameters, "REFUNDTYPE", refund_type.as_str());
    set_optional(&mut parameters, "AMT", options.amount.as_ref());
    set_optional(&mut parameters, "CURRENCYCODE", options.currency_code.as_ref());
    set_optional(&mut parameters, "NOTE", options.note.as_ref());
    set_optional(&mut parameters, "INVOICEID", options.invoice_id.as_ref());
    parameters
}
