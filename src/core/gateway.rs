use crate::core::methods::{self, CaptureOptions, RefundOptions};
use crate::domain::model::{CompleteType, NvpResponse, Parameters, PaymentAction, RefundType};
use crate::utils::error::Result;
use async_trait::async_trait;

/// NVP 閘道：實作者只需提供 `request`，其餘方法皆由參數組裝加上一次請求構成。
#[async_trait]
pub trait NvpGateway: Send + Sync {
    async fn request(&self, parameters: Parameters) -> Result<NvpResponse>;

    async fn address_verify(
        &self,
        email: &str,
        street: &str,
        postal_code: &str,
    ) -> Result<NvpResponse> {
        self.request(methods::address_verify(email, street, postal_code))
            .await
    }

    async fn bill_outstanding_amount(
        &self,
        profile_id: &str,
        amount: Option<&str>,
        note: Option<&str>,
    ) -> Result<NvpResponse> {
        self.request(methods::bill_outstanding_amount(profile_id, amount, note))
            .await
    }

    async fn create_recurring_payments_profile(&self, token: &str) -> Result<NvpResponse> {
        self.request(methods::create_recurring_payments_profile(token))
            .await
    }

    async fn do_authorization(
        &self,
        transaction_id: &str,
        amount: &str,
        transaction_entity: Option<&str>,
        currency_code: Option<&str>,
    ) -> Result<NvpResponse> {
        self.request(methods::do_authorization(
            transaction_id,
            amount,
            transaction_entity,
            currency_code,
        ))
        .await
    }

    async fn do_capture(
        &self,
        authorization_id: &str,
        amount: &str,
        complete_type: CompleteType,
        options: &CaptureOptions,
    ) -> Result<NvpResponse> {
        self.request(methods::do_capture(
            authorization_id,
            amount,
            complete_type,
            options,
        ))
        .await
    }

    async fn do_direct_payment(
        &self,
        ip_address: &str,
        payment_action: Option<PaymentAction>,
        return_fmf_details: Option<bool>,
    ) -> Result<NvpResponse> {
        self.request(methods::do_direct_payment(
            ip_address,
            payment_action,
            return_fmf_details,
        ))
        .await
    }

    async fn do_express_checkout_payment(
        &self,
        token: &str,
        amount: &str,
        payment_action: PaymentAction,
        payer_id: &str,
        optional: Parameters,
    ) -> Result<NvpResponse> {
        self.request(methods::do_express_checkout_payment(
            token,
            amount,
            payment_action,
            payer_id,
            optional,
        ))
        .await
    }

    /// 開始 Express Checkout 流程。選填欄位請參考 PayPal 的 SetExpressCheckout 文件。
    async fn set_express_checkout(
        &self,
        amount: &str,
        return_url: &str,
        cancel_url: &str,
        optional: Parameters,
    ) -> Result<NvpResponse> {
        self.request(methods::set_express_checkout(
            amount, return_url, cancel_url, optional,
        ))
        .await
    }

    async fn get_express_checkout_details(&self, token: &str) -> Result<NvpResponse> {
        self.request(methods::get_express_checkout_details(token))
            .await
    }

    async fn get_transaction_details(&self, transaction_id: &str) -> Result<NvpResponse> {
        self.request(methods::get_transaction_details(transaction_id))
            .await
    }

    async fn do_void(&self, authorization_id: &str, note: Option<&str>) -> Result<NvpResponse> {
        self.request(methods::do_void(authorization_id, note)).await
    }

    async fn refund_transaction(
        &self,
        transaction_id: &str,
        refund_type: RefundType,
        options: &RefundOptions,
    ) -> Result<NvpResponse> {
        self.request(methods::refund_transaction(
            transaction_id,
            refund_type,
            options,
        ))
        .await
    }
}
