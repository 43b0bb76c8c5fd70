use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::payments::PaymentRequest;

impl ApiClient {
    /// `POST /payment/create`. Returns the payment page URL.
    pub async fn create_payment(&self, request: &PaymentRequest) -> ClientResult<String> {
        let body = self
            .send_raw(self.post("/payment/create").json(request))
            .await?;
        payment_url(&body)
    }
}

/// The API answers with the URL either as a JSON string or as plain text.
fn payment_url(body: &[u8]) -> ClientResult<String> {
    let url = serde_json::from_slice::<String>(body)
        .ok()
        .or_else(|| std::str::from_utf8(body).ok().map(|s| s.trim().to_string()))
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"));
    url.ok_or_else(|| ClientError::Decode("no payment URL in response".to_string()))
}
