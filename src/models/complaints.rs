use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub const MAX_DESCRIPTION_CHARS: usize = 255;

/// Report reasons the API accepts. The serialized values are the API's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportReason {
    #[serde(rename = "dịch vụ bị cấm")]
    ProhibitedService,
    #[serde(rename = "nội dung không phù hợp")]
    InappropriateContent,
    #[serde(rename = "không nguyên bản")]
    NotOriginal,
    #[serde(rename = "vi phạm quyền sở hữu trí tuệ")]
    IntellectualProperty,
    #[serde(rename = "khác")]
    Other,
}

/// `POST /complaint/{gigId}/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complaint {
    pub reason: ReportReason,
    pub description: String,
}

impl Complaint {
    pub fn new(reason: ReportReason, description: impl Into<String>) -> ClientResult<Self> {
        let description = description.into();
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ClientError::Validation(format!(
                "Description must not exceed {MAX_DESCRIPTION_CHARS} characters"
            )));
        }
        Ok(Self {
            reason,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_limit_counts_characters() {
        assert!(Complaint::new(ReportReason::Other, "é".repeat(255)).is_ok());
        assert!(matches!(
            Complaint::new(ReportReason::Other, "a".repeat(256)),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn reason_uses_api_value() {
        let complaint = Complaint::new(ReportReason::NotOriginal, "copied").unwrap();
        let json = serde_json::to_value(&complaint).unwrap();
        assert_eq!(json["reason"], "không nguyên bản");
        assert_eq!(json["description"], "copied");
    }
}
