use chrono::{DateTime, Utc};
use serde::Serialize;

/// `POST /payment/create`. The API answers with the payment page URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: f64,
    pub order_id: String,
    pub gig_id: String,
    pub requirements: String,
}

impl PaymentRequest {
    pub fn for_gig(gig_id: &str, amount: f64, now: DateTime<Utc>) -> Self {
        Self {
            amount,
            order_id: order_id(gig_id, now),
            gig_id: gig_id.to_string(),
            requirements: String::new(),
        }
    }
}

pub fn order_id(gig_id: &str, now: DateTime<Utc>) -> String {
    format!("ORDER_{gig_id}_{}", now.timestamp_millis())
}
