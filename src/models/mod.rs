pub mod categories;
pub mod complaints;
pub mod conversations;
pub mod favorites;
pub mod gigs;
pub mod payments;
pub mod reviews;
pub mod search;
pub mod users;

use serde::Deserialize;

/// Results per search page.
pub const PAGE_SIZE: u32 = 10;

/// Fields every JSON response from the marketplace API may carry.
///
/// A 2xx body with `error: true` is still a failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub error: bool,
    pub message: Option<String>,
}

impl Envelope {
    pub fn rejection(&self, fallback: &str) -> Option<String> {
        self.error
            .then(|| self.message.clone().unwrap_or_else(|| fallback.to_string()))
    }
}

/// Decimal fields arrive as numbers, numeric strings, or Mongo
/// `{ "$numberDecimal": "…" }` objects.
pub mod decimal {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Wrapped {
            #[serde(rename = "$numberDecimal")]
            number_decimal: String,
        },
    }

    impl Raw {
        fn value(self) -> Result<f64, String> {
            let text = match self {
                Raw::Number(n) => return Ok(n),
                Raw::Text(s) | Raw::Wrapped { number_decimal: s } => s,
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|e| format!("invalid decimal {text:?}: {e}"))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Raw::deserialize(deserializer)?.value().map_err(D::Error::custom)
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Raw>::deserialize(deserializer)?
            .map(Raw::value)
            .transpose()
            .map_err(D::Error::custom)
    }

}
